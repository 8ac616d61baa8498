use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glob::glob;
use log::info;
use lt8920_core::registers::REGISTERS;
use lt8920_core::{AnnotationClass, DecoderOptions, Report};

#[derive(Parser, Debug)]
#[command(name = "lt8920")]
#[command(version)]
#[command(
    about = "Offline decoder for LT8920 SPI traces (register access and FIFO transmissions).",
    long_about = None,
    after_help = "Examples:\n  lt8920 decode capture.jsonl -o report.json\n  lt8920 decode capture.jsonl --stdout --format text\n  lt8920 registers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a framed SPI trace (JSON Lines) into annotations.
    #[command(alias = "analyze")]
    Decode {
        /// Path to a .jsonl trace file
        input: PathBuf,

        /// Output report path
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write the report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if warnings were emitted
        #[arg(long)]
        strict: bool,

        /// Annotate every byte written to the FIFO
        #[arg(long)]
        fifo_payload: bool,

        /// Decode read responses from the tx bytes (reference tool behavior)
        #[arg(long)]
        legacy_read_view: bool,
    },
    /// List the register catalog.
    Registers,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

struct DecodeArgs {
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    format: OutputFormat,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
    options: DecoderOptions,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decode {
            input,
            report,
            stdout,
            format,
            pretty,
            compact,
            quiet,
            strict,
            fifo_payload,
            legacy_read_view,
        } => cmd_decode(DecodeArgs {
            input,
            report,
            stdout,
            format,
            pretty,
            compact,
            quiet,
            strict,
            options: DecoderOptions {
                fifo_payload_annotations: fifo_payload,
                legacy_read_view,
            },
        }),
        Commands::Registers => {
            print!("{}", render_registers());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_decode(args: DecodeArgs) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;

    let report_path = if args.stdout {
        None
    } else {
        Some(args.report.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    if let Some(report_path) = report_path.as_ref() {
        let report_dir = report_path
            .parent()
            .map(|parent| {
                if parent.as_os_str().is_empty() {
                    fs::canonicalize(".")
                } else {
                    fs::canonicalize(parent)
                }
            })
            .transpose()
            .ok()
            .flatten();
        if let Some(report_dir) = report_dir {
            let report_target = report_dir.join(
                report_path
                    .file_name()
                    .ok_or_else(|| anyhow::anyhow!("Invalid report path"))?,
            );
            if report_target == input_abs {
                return Err(CliError::new(
                    format!(
                        "report path must differ from input: {}",
                        report_path.display()
                    ),
                    Some("choose a different output path".to_string()),
                ));
            }
        }
    }

    info!("decoding {}", resolved_input.display());
    let rep = lt8920_core::analyze_trace_file(&resolved_input, args.options)
        .context("trace decoding failed")?;
    let output = match args.format {
        OutputFormat::Json => serialize_report(&rep, args.pretty, args.compact)?,
        OutputFormat::Text => render_text(&rep),
    };

    match report_path {
        None => print!("{}", output),
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&path, output)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            if !args.quiet {
                eprintln!("OK: report written -> {}", path.display());
            }
        }
    }

    if args.strict && rep.summary.warnings > 0 {
        return Err(CliError::new(
            format!("{} warning annotation(s) emitted", rep.summary.warnings),
            Some("use --format text to inspect".to_string()),
        ));
    }
    Ok(())
}

fn serialize_report(rep: &Report, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn render_text(rep: &Report) -> String {
    let mut out = String::new();
    for ann in &rep.annotations {
        let label = match (ann.class, ann.short_code.as_deref()) {
            (AnnotationClass::Warning, Some(code)) => format!("{} [{}]", ann.text, code),
            _ => ann.text.clone(),
        };
        out.push_str(&format!(
            "{}-{} {}/{}: {}\n",
            ann.start_sample,
            ann.end_sample,
            ann.class.row().id(),
            ann.class.display_name(),
            label
        ));
    }
    out
}

fn render_registers() -> String {
    let mut out = String::new();
    for layout in REGISTERS {
        let fields = layout
            .fields
            .iter()
            .map(|field| format!("{}:{}", field.name, field.width))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!(
            "0x{:02X} {} ({} bytes): {}\n",
            layout.address, layout.name, layout.byte_length, fields
        ));
    }
    out
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .jsonl trace file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .jsonl trace file".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "jsonl" && ext != "ndjson" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .jsonl or .ndjson trace file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected .jsonl".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single trace file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
