//! Turns one bus transaction into a register access plus its annotations.
//!
//! The first tx byte carries the direction (bit 7 set = read) and the 7-bit
//! register address; the remaining bytes are the register payload. Short
//! transfers and unknown addresses are reported as warnings and produce no
//! access.

use log::debug;

use crate::annotation::{Annotation, AnnotationClass, AnnotationSink};
use crate::decoder::{DecodeError, DecoderOptions};
use crate::registers::{DecodedRegister, RegisterError, RegisterLayout, decode, lookup};
use crate::transaction::{BusTransaction, ByteEvent, SampleRange};

const READ_FLAG: u8 = 0x80;
const ADDRESS_MASK: u8 = 0x7F;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Write,
    Read,
}

/// Sample ranges of the parts of a register access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessSpans {
    pub transaction: SampleRange,
    pub address: SampleRange,
    pub payload: SampleRange,
    pub response: SampleRange,
}

/// A transaction resolved against the register catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterAccess {
    pub direction: Direction,
    pub address: u8,
    pub layout: &'static RegisterLayout,
    /// Register as driven by the host.
    pub write_view: DecodedRegister,
    /// Register as returned by the device.
    pub read_view: DecodedRegister,
    /// Tx bytes following the address byte.
    pub payload: Vec<ByteEvent>,
    pub spans: AccessSpans,
}

impl RegisterAccess {
    pub fn is_write(&self) -> bool {
        self.direction == Direction::Write
    }

    pub fn payload_bytes(&self) -> Vec<u8> {
        self.payload.iter().map(|event| event.value).collect()
    }
}

/// Classify `transaction`, reporting its annotations to `sink`.
///
/// Returns `Ok(None)` for transactions that are ignored (non-transfers) or
/// rejected with a warning annotation.
///
/// # Errors
/// Returns `DecodeError::Framing` when the transaction violates the framing
/// contract (see `BusTransaction::validate`).
pub fn classify<S: AnnotationSink + ?Sized>(
    transaction: &BusTransaction,
    options: &DecoderOptions,
    sink: &mut S,
) -> Result<Option<RegisterAccess>, DecodeError> {
    if !transaction.is_transfer() {
        return Ok(None);
    }
    transaction.validate()?;

    let (command, tx_payload) = match transaction.tx.split_first() {
        Some((command, rest)) if !rest.is_empty() => (command, rest),
        _ => {
            debug!(
                "incomplete transfer at {}..{}",
                transaction.start_sample, transaction.end_sample
            );
            sink.put(Annotation::warning(
                transaction.span(),
                "Incomplete Transfer",
                "INC",
            ));
            return Ok(None);
        }
    };

    let direction = if command.value & READ_FLAG == 0 {
        Direction::Write
    } else {
        Direction::Read
    };
    let address = command.value & ADDRESS_MASK;

    let Ok(layout) = lookup(address) else {
        debug!("unknown register {address:02X} at sample {}", command.start);
        sink.put(Annotation::warning(
            command.span(),
            format!("Unknown Register Address: {address:02X}"),
            "UNK",
        ));
        return Ok(None);
    };

    // Without rx the device's reply was not captured: zeros over the tx slots.
    let rx_payload = transaction.rx.get(1..).unwrap_or_default();
    let (read_bytes, response_events) = if options.legacy_read_view {
        (tx_payload, tx_payload)
    } else if rx_payload.is_empty() {
        (&[][..], tx_payload)
    } else {
        (rx_payload, rx_payload)
    };

    // Catalog layouts are at most 8 bytes and the buffer is sized to fit, so
    // these only fail for a malformed catalog entry.
    let write_view = decode_fitted(layout, tx_payload)?;
    let read_view = decode_fitted(layout, read_bytes)?;

    let spans = AccessSpans {
        transaction: transaction.span(),
        address: command.span(),
        payload: events_span(tx_payload),
        response: events_span(response_events),
    };

    match direction {
        Direction::Write => {
            sink.put(Annotation::new(
                spans.transaction,
                AnnotationClass::RegWrite,
                format!("write {}", write_view.render_full()),
            ));
        }
        Direction::Read => {
            sink.put(Annotation::new(
                spans.address,
                AnnotationClass::RegWrite,
                format!("read {}", write_view.render_short()),
            ));
            sink.put(Annotation::new(
                spans.response,
                AnnotationClass::RegRead,
                read_view.render_full(),
            ));
        }
    }

    Ok(Some(RegisterAccess {
        direction,
        address,
        layout,
        write_view,
        read_view,
        payload: tx_payload.to_vec(),
        spans,
    }))
}

/// Decode a payload that may be shorter or longer than the register: extra
/// bytes are ignored, missing trailing bytes read as zero.
fn decode_fitted(
    layout: &'static RegisterLayout,
    events: &[ByteEvent],
) -> Result<DecodedRegister, RegisterError> {
    let mut buffer = vec![0u8; layout.byte_length];
    for (slot, event) in buffer.iter_mut().zip(events) {
        *slot = event.value;
    }
    decode(layout, &buffer)
}

fn events_span(events: &[ByteEvent]) -> SampleRange {
    match (events.first(), events.last()) {
        (Some(first), Some(last)) => SampleRange::new(first.start, last.end),
        _ => SampleRange::new(0, 0),
    }
}
