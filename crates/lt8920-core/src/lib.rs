//! LT8920 core library for offline SPI trace decoding.
//!
//! This crate interprets framed bus transactions captured from an LT8920
//! 2.4 GHz transceiver: each transaction is resolved against a static register
//! catalog (`registers`), classified as a read or write (`classifier`), and
//! folded into a small model of the transmit FIFO (`decoder`). The decoder
//! reports human-readable annotations, plus a synthesized transmission
//! annotation whenever `TX_EN` is set.
//!
//! Decoding is byte-oriented and side-effect free; reading traces from files
//! lives in `source` and `analysis`.
//!
//! Invariants:
//! - Annotations are emitted in transaction order and are deterministic.
//! - Protocol anomalies (short transfers, unknown registers) become warning
//!   annotations; only framing-contract violations surface as errors.
//! - FIFO state belongs to one `Lt8920Decoder`; instances never share state.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use lt8920_core::{DecoderOptions, analyze_trace_file};
//!
//! let report = analyze_trace_file(Path::new("capture.jsonl"), DecoderOptions::default())?;
//! println!("annotations: {}", report.annotations.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod analysis;
pub mod annotation;
pub mod classifier;
pub mod decoder;
pub mod fifo;
pub mod registers;
pub mod source;
pub mod transaction;

pub use analysis::{AnalysisError, analyze_source, analyze_trace_file};
pub use annotation::{Annotation, AnnotationClass, AnnotationRow, AnnotationSink};
pub use classifier::{AccessSpans, Direction, RegisterAccess, classify};
pub use decoder::{DecodeError, DecoderOptions, Lt8920Decoder, TRANSMISSION_SAMPLES_PER_CHAR};
pub use fifo::FifoState;
pub use source::{IterSource, JsonLinesSource, SourceError, TransactionSource};
pub use transaction::{BusTransaction, ByteEvent, FramingError, SampleRange, TransactionKind};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Decoded trace with every annotation in emission order.
///
/// # Examples
/// ```
/// use lt8920_core::make_stub_report;
///
/// let report = make_stub_report("capture.jsonl", 123);
/// assert_eq!(report.report_version, lt8920_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Input trace metadata.
    pub input: InputInfo,
    /// Transaction and annotation counters.
    pub summary: DecodeSummary,
    /// Annotations in emission order.
    pub annotations: Vec<Annotation>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "lt8920").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input trace metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the analyzer.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Counters gathered over one decode pass.
///
/// # Examples
/// ```
/// use lt8920_core::DecodeSummary;
///
/// let summary = DecodeSummary::default();
/// assert_eq!(summary.transactions_total, 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeSummary {
    /// Transactions of any kind read from the source.
    pub transactions_total: u64,
    /// Transactions of kind `TRANSFER`.
    pub transfers_total: u64,
    /// Transfers resolved as register writes.
    pub register_writes: u64,
    /// Transfers resolved as register reads.
    pub register_reads: u64,
    /// Synthesized transmission annotations.
    pub transmissions: u64,
    /// Warning annotations (incomplete transfers, unknown registers).
    pub warnings: u64,
}

/// Build a stub report with base fields filled and empty aggregates.
///
/// # Examples
/// ```
/// use lt8920_core::make_stub_report;
///
/// let report = make_stub_report("capture.jsonl", 123);
/// assert_eq!(report.input.bytes, 123);
/// assert!(report.annotations.is_empty());
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "lt8920".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        summary: DecodeSummary::default(),
        annotations: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_omits_short_code_when_none() {
        let mut report = make_stub_report("capture.jsonl", 1);
        report.annotations = vec![
            Annotation::new(
                SampleRange::new(0, 10),
                AnnotationClass::RegWrite,
                "write FIFO(TXRX_FIFO_REG=0)",
            ),
            Annotation::warning(SampleRange::new(20, 30), "Incomplete Transfer", "INC"),
        ];

        let value = serde_json::to_value(&report).expect("report json");
        let annotations = value["annotations"].as_array().expect("annotations");
        assert!(annotations[0].get("short_code").is_none());
        assert_eq!(annotations[1]["short_code"], "INC");
        assert_eq!(annotations[1]["class"], "warning");
        assert_eq!(value["tool"]["name"], "lt8920");
    }
}
