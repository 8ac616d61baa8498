use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::annotation::{Annotation, AnnotationClass};
use crate::classifier::Direction;
use crate::decoder::{DecodeError, DecoderOptions, Lt8920Decoder};
use crate::source::{JsonLinesSource, SourceError, TransactionSource};
use crate::{DecodeSummary, Report, make_stub_report};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Decode error in transaction {index}: {source}")]
    Decode {
        index: u64,
        #[source]
        source: DecodeError,
    },
}

/// Decode a JSON Lines trace file into a report.
///
/// # Errors
/// Returns `AnalysisError` when the file cannot be read or parsed, or when a
/// transaction violates the framing contract.
pub fn analyze_trace_file(path: &Path, options: DecoderOptions) -> Result<Report, AnalysisError> {
    let file = File::open(path)?;
    let bytes = file.metadata()?.len();
    let source = JsonLinesSource::new(BufReader::new(file));
    let mut report = analyze_source(source, options)?;
    report.input.path = path.display().to_string();
    report.input.bytes = bytes;
    Ok(report)
}

/// Run every transaction of `source` through a fresh decoder.
///
/// # Errors
/// Returns `AnalysisError` on source failures or framing violations.
pub fn analyze_source<S: TransactionSource>(
    mut source: S,
    options: DecoderOptions,
) -> Result<Report, AnalysisError> {
    let mut decoder = Lt8920Decoder::new(options);
    let mut annotations: Vec<Annotation> = Vec::new();
    let mut summary = DecodeSummary::default();

    while let Some(transaction) = source.next_transaction()? {
        let index = summary.transactions_total;
        summary.transactions_total += 1;
        if transaction.is_transfer() {
            summary.transfers_total += 1;
        }
        let access = decoder
            .decode(&transaction, &mut annotations)
            .map_err(|source| AnalysisError::Decode { index, source })?;
        match access.map(|access| access.direction) {
            Some(Direction::Write) => summary.register_writes += 1,
            Some(Direction::Read) => summary.register_reads += 1,
            None => {}
        }
    }

    summary.transmissions = count_class(&annotations, AnnotationClass::Transmission);
    summary.warnings = count_class(&annotations, AnnotationClass::Warning);
    debug!(
        "decoded {} transactions into {} annotations",
        summary.transactions_total,
        annotations.len()
    );

    let mut report = make_stub_report("", 0);
    report.summary = summary;
    report.annotations = annotations;
    Ok(report)
}

fn count_class(annotations: &[Annotation], class: AnnotationClass) -> u64 {
    annotations.iter().filter(|ann| ann.class == class).count() as u64
}

#[cfg(test)]
mod tests {
    use super::{AnalysisError, analyze_source};
    use crate::decoder::DecoderOptions;
    use crate::source::IterSource;
    use crate::transaction::{BusTransaction, ByteEvent, TransactionKind};

    fn transfer(values: &[u8], base: u64) -> BusTransaction {
        let tx = values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let start = base + i as u64 * 10;
                ByteEvent::new(*value, start, start + 8)
            })
            .collect();
        BusTransaction::transfer(tx, Vec::new())
    }

    #[test]
    fn summarizes_a_session() {
        let mut cs = transfer(&[0x00], 0);
        cs.kind = TransactionKind::CsChange;
        let transactions = vec![
            cs,
            transfer(&[0x32, 0x11], 100),
            transfer(&[0x32, 0x22], 200),
            transfer(&[0x80 | 0x30, 0x00, 0x00], 300),
            transfer(&[0x07, 0x01, 0x00], 400),
            transfer(&[0x7F, 0x00], 500),
            transfer(&[0x07], 600),
        ];
        let report = analyze_source(IterSource::new(transactions), DecoderOptions::default())
            .unwrap();

        let summary = &report.summary;
        assert_eq!(summary.transactions_total, 7);
        assert_eq!(summary.transfers_total, 6);
        assert_eq!(summary.register_writes, 3);
        assert_eq!(summary.register_reads, 1);
        assert_eq!(summary.transmissions, 1);
        assert_eq!(summary.warnings, 2);
        assert_eq!(report.annotations.len(), 8);
    }

    #[test]
    fn framing_violation_names_transaction() {
        let mut bad = transfer(&[0x07, 0x00, 0x00], 100);
        bad.rx = vec![ByteEvent::new(0, 100, 108)];
        let transactions = vec![transfer(&[0x32, 0x11], 0), bad];
        let err = analyze_source(IterSource::new(transactions), DecoderOptions::default())
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Decode { index: 1, .. }));
        assert!(err.to_string().contains("transaction 1"));
    }
}
