use thiserror::Error;

/// Errors returned by register lookup and decoding.
///
/// # Examples
/// ```
/// use lt8920_core::registers::RegisterError;
///
/// let err = RegisterError::UnknownRegister { address: 0x7F };
/// assert!(err.to_string().contains("7F"));
/// ```
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegisterError {
    #[error("unknown register address: {address:02X}")]
    UnknownRegister { address: u8 },
    #[error("register length mismatch: need {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    /// Only caller-built layouts reach this; catalog registers are 2 bytes.
    #[error("register too wide: {byte_length} bytes")]
    TooWide { byte_length: usize },
}
