use super::error::RegisterError;

/// Widest register the cursor can hold.
pub const MAX_BYTE_LENGTH: usize = 8;

/// Consumes bitfields from a big-endian word, most-significant bit first.
pub struct BitReader {
    word: u64,
    remaining: u32,
}

impl BitReader {
    /// Assemble `bytes` big-endian into a single word.
    ///
    /// # Errors
    /// Returns `RegisterError::TooWide` when `bytes` does not fit in 64 bits.
    pub fn new(bytes: &[u8]) -> Result<Self, RegisterError> {
        if bytes.len() > MAX_BYTE_LENGTH {
            return Err(RegisterError::TooWide {
                byte_length: bytes.len(),
            });
        }
        let word = bytes
            .iter()
            .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte));
        Ok(Self {
            word,
            remaining: (bytes.len() * 8) as u32,
        })
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Take the next `width` bits. Reading past the end yields zero bits;
    /// only caller-built layouts whose fields overrun `byte_length` get there.
    pub fn take(&mut self, width: u8) -> u64 {
        let width = u32::from(width).min(self.remaining);
        if width == 0 {
            return 0;
        }
        self.remaining -= width;
        let mask = if width >= 64 {
            u64::MAX
        } else {
            (1u64 << width) - 1
        };
        (self.word >> self.remaining) & mask
    }
}

#[cfg(test)]
mod tests {
    use super::BitReader;
    use crate::registers::error::RegisterError;

    #[test]
    fn takes_fields_msb_first() {
        let mut reader = BitReader::new(&[0b1010_0000, 0x0F]).unwrap();
        assert_eq!(reader.take(1), 1);
        assert_eq!(reader.take(2), 0b01);
        assert_eq!(reader.take(5), 0);
        assert_eq!(reader.take(8), 0x0F);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn exhausted_reader_yields_zero() {
        let mut reader = BitReader::new(&[0xFF]).unwrap();
        assert_eq!(reader.take(8), 0xFF);
        assert_eq!(reader.take(4), 0);
    }

    #[test]
    fn full_width_word() {
        let mut reader = BitReader::new(&[0xFF; 8]).unwrap();
        assert_eq!(reader.take(64), u64::MAX);
    }

    #[test]
    fn rejects_wide_buffers() {
        let err = BitReader::new(&[0u8; 9]).err().unwrap();
        assert_eq!(err, RegisterError::TooWide { byte_length: 9 });
    }
}
