//! Transmit FIFO model, reconstructed from observed register writes.

/// Bytes written to the FIFO data register since the last pointer clear.
///
/// Writes insert at `write_pointer`, which then advances, mirroring the
/// device's pointer-indexed FIFO rather than a plain append.
///
/// # Examples
/// ```
/// use lt8920_core::FifoState;
///
/// let mut fifo = FifoState::new();
/// fifo.write(&[0x11, 0x22]);
/// assert_eq!(fifo.render(), "11 22");
/// fifo.clear_write_pointer();
/// assert_eq!(fifo.render(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FifoState {
    buffer: Vec<u8>,
    write_pointer: usize,
}

impl FifoState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn write_pointer(&self) -> usize {
        self.write_pointer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            let at = self.write_pointer.min(self.buffer.len());
            self.buffer.insert(at, byte);
            self.write_pointer = at + 1;
        }
    }

    /// `CLR_W_PTR`: rewind the write pointer and drop the buffered bytes.
    pub fn clear_write_pointer(&mut self) {
        self.write_pointer = 0;
        self.buffer.clear();
    }

    /// Space-separated uppercase hex, e.g. `"11 22"`.
    pub fn render(&self) -> String {
        self.buffer
            .iter()
            .map(|byte| format!("{byte:02X}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
