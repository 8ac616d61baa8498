//! Bus transactions as handed over by the framing layer.
//!
//! A transaction pairs the bytes driven by the host (`tx`) with the bytes
//! sampled back from the device (`rx`). Every byte carries its own sample
//! range so annotations can point at individual bytes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inclusive-start sample range on the capture timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRange {
    pub start: u64,
    pub end: u64,
}

impl SampleRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }
}

/// One byte on the wire with its sample range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteEvent {
    pub value: u8,
    pub start: u64,
    pub end: u64,
}

impl ByteEvent {
    pub fn new(value: u8, start: u64, end: u64) -> Self {
        Self { value, start, end }
    }

    pub fn span(&self) -> SampleRange {
        SampleRange::new(self.start, self.end)
    }
}

/// Packet type reported by the framing layer. Only `Transfer` is decoded.
///
/// # Examples
/// ```
/// use lt8920_core::TransactionKind;
///
/// assert_eq!(TransactionKind::from("TRANSFER".to_string()), TransactionKind::Transfer);
/// assert_eq!(String::from(TransactionKind::CsChange), "CS-CHANGE");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionKind {
    Transfer,
    CsChange,
    Other(String),
}

impl From<String> for TransactionKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "TRANSFER" => TransactionKind::Transfer,
            "CS-CHANGE" => TransactionKind::CsChange,
            _ => TransactionKind::Other(value),
        }
    }
}

impl From<TransactionKind> for String {
    fn from(value: TransactionKind) -> Self {
        match value {
            TransactionKind::Transfer => "TRANSFER".to_string(),
            TransactionKind::CsChange => "CS-CHANGE".to_string(),
            TransactionKind::Other(other) => other,
        }
    }
}

/// One framed bus exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusTransaction {
    pub kind: TransactionKind,
    pub start_sample: u64,
    pub end_sample: u64,
    #[serde(default)]
    pub tx: Vec<ByteEvent>,
    #[serde(default)]
    pub rx: Vec<ByteEvent>,
}

impl BusTransaction {
    /// Build a `TRANSFER` whose sample range spans its tx bytes.
    ///
    /// # Examples
    /// ```
    /// use lt8920_core::{BusTransaction, ByteEvent};
    ///
    /// let tx = vec![ByteEvent::new(0x07, 0, 8), ByteEvent::new(0x00, 8, 16)];
    /// let transaction = BusTransaction::transfer(tx, Vec::new());
    /// assert_eq!(transaction.span().end, 16);
    /// ```
    pub fn transfer(tx: Vec<ByteEvent>, rx: Vec<ByteEvent>) -> Self {
        let start_sample = tx.first().map(|event| event.start).unwrap_or(0);
        let end_sample = tx.last().map(|event| event.end).unwrap_or(start_sample);
        Self {
            kind: TransactionKind::Transfer,
            start_sample,
            end_sample,
            tx,
            rx,
        }
    }

    pub fn is_transfer(&self) -> bool {
        self.kind == TransactionKind::Transfer
    }

    pub fn span(&self) -> SampleRange {
        SampleRange::new(self.start_sample, self.end_sample)
    }

    /// Check the framing layer's contract: paired tx/rx streams and ordered
    /// byte ranges. An empty rx stream is accepted (write-only captures).
    ///
    /// # Errors
    /// Returns `FramingError` describing the first violation found.
    pub fn validate(&self) -> Result<(), FramingError> {
        if !self.rx.is_empty() && self.rx.len() != self.tx.len() {
            return Err(FramingError::MismatchedLengths {
                tx: self.tx.len(),
                rx: self.rx.len(),
            });
        }
        if self.start_sample > self.end_sample {
            return Err(FramingError::InvertedTransaction {
                start: self.start_sample,
                end: self.end_sample,
            });
        }
        validate_events(&self.tx)?;
        validate_events(&self.rx)
    }
}

fn validate_events(events: &[ByteEvent]) -> Result<(), FramingError> {
    for (index, event) in events.iter().enumerate() {
        if event.start > event.end {
            return Err(FramingError::InvertedSpan {
                index,
                start: event.start,
                end: event.end,
            });
        }
    }
    if let Some(index) = events
        .windows(2)
        .position(|pair| pair[1].start < pair[0].start)
    {
        return Err(FramingError::NonMonotonic { index: index + 1 });
    }
    Ok(())
}

/// Violations of the framing layer's contract. These indicate a bug
/// upstream, not a protocol anomaly on the bus.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FramingError {
    #[error("tx/rx length mismatch: {tx} tx bytes, {rx} rx bytes")]
    MismatchedLengths { tx: usize, rx: usize },
    #[error("transaction ends before it starts: {start}..{end}")]
    InvertedTransaction { start: u64, end: u64 },
    #[error("byte {index} ends before it starts: {start}..{end}")]
    InvertedSpan { index: usize, start: u64, end: u64 },
    #[error("byte {index} starts before the previous byte")]
    NonMonotonic { index: usize },
}
