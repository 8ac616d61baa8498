//! Protocol state machine: folds classified accesses into the FIFO model and
//! synthesizes transmission annotations.

use log::{debug, trace};
use thiserror::Error;

use crate::annotation::{Annotation, AnnotationClass, AnnotationSink};
use crate::classifier::{RegisterAccess, classify};
use crate::fifo::FifoState;
use crate::registers::{FIFO_ADDRESS, FIFO_STATUS_ADDRESS, RX_TX_CONFIG_ADDRESS, RegisterError};
use crate::transaction::{BusTransaction, FramingError, SampleRange};

/// Display width, in samples, given to each character of a transmission
/// annotation. Cosmetic only; it has no protocol meaning.
pub const TRANSMISSION_SAMPLES_PER_CHAR: u64 = 10;

/// Presentation and compatibility switches. Defaults reproduce the reference
/// trace output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Emit one `FIFO_DATA` annotation per byte written to the FIFO.
    pub fifo_payload_annotations: bool,
    /// Decode the read view from the tx payload instead of the rx payload.
    pub legacy_read_view: bool,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),
    #[error("register error: {0}")]
    Register(#[from] RegisterError),
}

/// Stateful LT8920 decoder. One instance per capture session.
///
/// # Examples
/// ```
/// use lt8920_core::{Annotation, BusTransaction, ByteEvent, Lt8920Decoder};
///
/// let mut decoder = Lt8920Decoder::default();
/// let mut annotations: Vec<Annotation> = Vec::new();
///
/// let fifo = BusTransaction::transfer(
///     vec![ByteEvent::new(0x32, 0, 8), ByteEvent::new(0x11, 8, 16)],
///     Vec::new(),
/// );
/// let transmit = BusTransaction::transfer(
///     vec![
///         ByteEvent::new(0x07, 20, 28),
///         ByteEvent::new(0x01, 28, 36),
///         ByteEvent::new(0x00, 36, 44),
///     ],
///     Vec::new(),
/// );
/// decoder.decode(&fifo, &mut annotations)?;
/// decoder.decode(&transmit, &mut annotations)?;
///
/// let last = annotations.last().unwrap();
/// assert_eq!(last.text, "11");
/// assert_eq!((last.start_sample, last.end_sample), (44, 64));
/// # Ok::<(), lt8920_core::DecodeError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Lt8920Decoder {
    options: DecoderOptions,
    fifo: FifoState,
}

impl Lt8920Decoder {
    pub fn new(options: DecoderOptions) -> Self {
        Self {
            options,
            fifo: FifoState::new(),
        }
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    pub fn fifo(&self) -> &FifoState {
        &self.fifo
    }

    /// Forget all FIFO state. Call between transactions only.
    pub fn reset(&mut self) {
        self.fifo = FifoState::new();
    }

    /// Decode one transaction, reporting annotations to `sink`.
    ///
    /// Returns the resolved register access, if the transaction was one.
    ///
    /// # Errors
    /// Returns `DecodeError::Framing` when the transaction violates the
    /// framing contract; the FIFO state is left untouched in that case.
    pub fn decode<S: AnnotationSink + ?Sized>(
        &mut self,
        transaction: &BusTransaction,
        sink: &mut S,
    ) -> Result<Option<RegisterAccess>, DecodeError> {
        trace!(
            "transaction {:?} at {}..{} ({} tx bytes)",
            transaction.kind,
            transaction.start_sample,
            transaction.end_sample,
            transaction.tx.len()
        );
        let Some(access) = classify(transaction, &self.options, sink)? else {
            return Ok(None);
        };
        if access.is_write() {
            self.apply_write(&access, sink);
        }
        Ok(Some(access))
    }

    fn apply_write<S: AnnotationSink + ?Sized>(&mut self, access: &RegisterAccess, sink: &mut S) {
        match access.address {
            FIFO_ADDRESS => {
                if self.options.fifo_payload_annotations {
                    for event in &access.payload {
                        sink.put(Annotation::new(
                            event.span(),
                            AnnotationClass::FifoData,
                            format!("{:02X}", event.value),
                        ));
                    }
                }
                let bytes = access.payload_bytes();
                self.fifo.write(&bytes);
                debug!(
                    "fifo write of {} bytes, pointer now {}",
                    bytes.len(),
                    self.fifo.write_pointer()
                );
            }
            RX_TX_CONFIG_ADDRESS if access.write_view.get("TX_EN") == Some(1) => {
                let text = self.fifo.render();
                let start = access.spans.transaction.end;
                let width = TRANSMISSION_SAMPLES_PER_CHAR.saturating_mul(text.len() as u64);
                debug!("transmission of {} bytes at {start}", self.fifo.buffer().len());
                sink.put(Annotation::new(
                    SampleRange::new(start, start.saturating_add(width)),
                    AnnotationClass::Transmission,
                    text,
                ));
            }
            FIFO_STATUS_ADDRESS if access.write_view.get("CLR_W_PTR") == Some(1) => {
                debug!("fifo write pointer cleared");
                self.fifo.clear_write_pointer();
            }
            _ => {}
        }
    }
}
