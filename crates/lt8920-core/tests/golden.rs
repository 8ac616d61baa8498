use std::fs;
use std::path::Path;

use lt8920_core::{AnnotationClass, DecoderOptions, Report, analyze_trace_file};

fn load_expected_report(dir: &str) -> Report {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
    let expected_path = root.join(dir).join("expected_report.json");

    let expected_json = fs::read_to_string(&expected_path).expect("read expected_report.json");
    serde_json::from_str(&expected_json).expect("parse expected report")
}

fn run_golden(dir: &str, options: DecoderOptions) {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
    let input = root.join(dir).join("input.jsonl");
    let expected = load_expected_report(dir);

    let mut actual = analyze_trace_file(&input, options).expect("analyze trace");
    actual.input.path = expected.input.path.clone();
    actual.tool.version = expected.tool.version.clone();

    let actual_value = serde_json::to_value(actual).expect("serialize actual");
    let expected_value = serde_json::to_value(expected).expect("serialize expected");

    assert_eq!(actual_value, expected_value, "golden mismatch in {dir}");
}

#[test]
fn golden_fifo_transmit() {
    run_golden("tests/golden/fifo_transmit", DecoderOptions::default());
}

#[test]
fn golden_register_probe() {
    run_golden("tests/golden/register_probe", DecoderOptions::default());
}

#[test]
fn golden_fifo_payload() {
    let options = DecoderOptions {
        fifo_payload_annotations: true,
        ..DecoderOptions::default()
    };
    run_golden("tests/golden/fifo_payload", options);
}

#[test]
fn golden_fifo_transmit_has_transmissions() {
    let report = load_expected_report("tests/golden/fifo_transmit");
    let sent: Vec<_> = report
        .annotations
        .iter()
        .filter(|ann| ann.class == AnnotationClass::Transmission)
        .map(|ann| ann.text.as_str())
        .collect();
    assert_eq!(sent, vec!["02 A5", ""]);
    assert_eq!(report.summary.warnings, 2);
}

#[test]
fn golden_fifo_payload_reads_zero_without_rx() {
    let report = load_expected_report("tests/golden/fifo_payload");
    let payload: Vec<_> = report
        .annotations
        .iter()
        .filter(|ann| ann.class == AnnotationClass::FifoData)
        .map(|ann| ann.text.as_str())
        .collect();
    assert_eq!(payload, vec!["48", "69"]);
    let read = report
        .annotations
        .iter()
        .find(|ann| ann.class == AnnotationClass::RegRead)
        .expect("read annotation");
    assert_eq!(read.text, "RSSI(RAW_RSSI=0)");
}
