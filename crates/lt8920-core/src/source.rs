//! Transaction sources.
//!
//! The bus-framing layer hands transactions over as JSON Lines: one
//! `BusTransaction` object per line. Blank lines and `#` comments are skipped.

use std::io::BufRead;

use thiserror::Error;

use crate::transaction::BusTransaction;

pub trait TransactionSource {
    fn next_transaction(&mut self) -> Result<Option<BusTransaction>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("trace parse error (line {line}): {message}")]
    Parse { line: usize, message: String },
}

/// Reads one JSON transaction per line from any buffered reader.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use lt8920_core::{JsonLinesSource, TransactionSource};
///
/// let trace = r#"{"kind":"TRANSFER","start_sample":0,"end_sample":16,"tx":[{"value":50,"start":0,"end":8},{"value":17,"start":8,"end":16}]}"#;
/// let mut source = JsonLinesSource::new(Cursor::new(trace));
/// let transaction = source.next_transaction()?.unwrap();
/// assert_eq!(transaction.tx.len(), 2);
/// assert!(source.next_transaction()?.is_none());
/// # Ok::<(), lt8920_core::SourceError>(())
/// ```
pub struct JsonLinesSource<R> {
    reader: R,
    line: usize,
    buffer: String,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buffer: String::new(),
        }
    }

    /// Number of lines consumed so far.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> TransactionSource for JsonLinesSource<R> {
    fn next_transaction(&mut self) -> Result<Option<BusTransaction>, SourceError> {
        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            let trimmed = self.buffer.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return serde_json::from_str(trimmed)
                .map(Some)
                .map_err(|err| SourceError::Parse {
                    line: self.line,
                    message: err.to_string(),
                });
        }
    }
}

/// Adapts an in-memory sequence of transactions.
pub struct IterSource<I> {
    inner: I,
}

impl<I: Iterator<Item = BusTransaction>> IterSource<I> {
    pub fn new(inner: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            inner: inner.into_iter(),
        }
    }
}

impl<I: Iterator<Item = BusTransaction>> TransactionSource for IterSource<I> {
    fn next_transaction(&mut self) -> Result<Option<BusTransaction>, SourceError> {
        Ok(self.inner.next())
    }
}
