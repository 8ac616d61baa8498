use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("lt8920"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn sample_trace() -> std::path::PathBuf {
    repo_root()
        .join("tests")
        .join("golden")
        .join("fifo_transmit")
        .join("input.jsonl")
}

#[test]
fn help_supports_decode_and_analyze() {
    cmd().arg("decode").arg("--help").assert().success();
    cmd().arg("analyze").arg("--help").assert().success();
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.jsonl");
    let report = temp.path().join("report.json");

    cmd()
        .arg("decode")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn rejects_unsupported_extension() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("capture.csv");
    std::fs::write(&input, "").expect("write input");

    cmd()
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("unsupported input format"));
}

#[test]
fn stdout_outputs_json() {
    let assert = cmd()
        .arg("decode")
        .arg(sample_trace())
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["summary"]["transmissions"], 2);
    assert_eq!(value["annotations"][5]["text"], "02 A5");
}

#[test]
fn text_format_lists_annotations() {
    cmd()
        .arg("decode")
        .arg(sample_trace())
        .arg("--stdout")
        .arg("--format")
        .arg("text")
        .assert()
        .success()
        .stdout(
            contains("428-478 transmissions/Transmission: 02 A5")
                .and(contains("warnings/Warning: Unknown Register Address: 7F [UNK]")),
        );
}

#[test]
fn fifo_payload_flag_adds_payload_annotations() {
    let assert = cmd()
        .arg("decode")
        .arg(sample_trace())
        .arg("--stdout")
        .arg("--fifo-payload")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    let payload: Vec<_> = value["annotations"]
        .as_array()
        .expect("annotations")
        .iter()
        .filter(|ann| ann["class"] == "fifo")
        .map(|ann| ann["text"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(payload, vec!["02", "A5"]);
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("decode")
        .arg(sample_trace())
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("decode")
        .arg(sample_trace())
        .arg("-o")
        .arg(report)
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn writes_report_and_reports_ok() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("out").join("report.json");

    cmd()
        .arg("decode")
        .arg(sample_trace())
        .arg("-o")
        .arg(&report)
        .assert()
        .success()
        .stderr(contains("OK: report written"));

    let json = std::fs::read_to_string(&report).expect("read report");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["tool"]["name"], "lt8920");
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("decode")
        .arg(sample_trace())
        .arg("-o")
        .arg(report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());
}

#[test]
fn strict_fails_when_warnings_present() {
    cmd()
        .arg("decode")
        .arg(sample_trace())
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("warning annotation(s) emitted"));
}

#[test]
fn strict_passes_on_clean_trace() {
    let input = repo_root()
        .join("tests")
        .join("golden")
        .join("register_probe")
        .join("input.jsonl");
    cmd()
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .success();
}

#[test]
fn registers_lists_catalog() {
    cmd()
        .arg("registers")
        .assert()
        .success()
        .stdout(
            contains("0x07 RxTxConfig (2 bytes): _:7 TX_EN:1 RX_EN:1 RF_PLL_CH_NO:7")
                .and(contains("0x34 FIFOStatus")),
        );
}
