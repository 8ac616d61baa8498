//! Rewrites `tests/golden/<case>/expected_report.json` from each case's
//! `input.jsonl`. Run from the workspace root after an intended output change.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use lt8920_core::{DecoderOptions, Report, analyze_trace_file};

const GOLDEN_ROOT: &str = "tests/golden";

const DEFAULT: DecoderOptions = DecoderOptions {
    fifo_payload_annotations: false,
    legacy_read_view: false,
};

/// Every golden case with the decoder options it is recorded under. Keep in
/// sync with `tests/golden.rs`.
const CASES: &[(&str, DecoderOptions)] = &[
    ("fifo_transmit", DEFAULT),
    ("register_probe", DEFAULT),
    (
        "fifo_payload",
        DecoderOptions {
            fifo_payload_annotations: true,
            legacy_read_view: false,
        },
    ),
];

fn main() -> ExitCode {
    let mut failed = false;
    for (case, options) in CASES {
        match regenerate_case(case, *options) {
            Ok(report) => eprintln!(
                "{case}: {} annotations, {} warnings",
                report.annotations.len(),
                report.summary.warnings
            ),
            Err(message) => {
                eprintln!("error: {case}: {message}");
                failed = true;
            }
        }
    }
    if failed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn regenerate_case(case: &str, options: DecoderOptions) -> Result<Report, String> {
    let dir = Path::new(GOLDEN_ROOT).join(case);
    let input = dir.join("input.jsonl");
    let report = analyze_trace_file(&input, options)
        .map_err(|err| format!("decoding {} failed: {err}", input.display()))?;

    let json = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("JSON serialization failed: {err}"))?;
    let output = dir.join("expected_report.json");
    fs::write(&output, json).map_err(|err| format!("writing {} failed: {err}", output.display()))?;
    Ok(report)
}
