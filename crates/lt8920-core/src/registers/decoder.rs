use super::error::RegisterError;
use super::layout::{RESERVED, RegisterLayout};
use super::reader::BitReader;

/// Decoded value of one field, padding included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldValue {
    pub name: &'static str,
    pub value: u64,
}

/// A byte buffer interpreted through a register layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRegister {
    layout: &'static RegisterLayout,
    values: Vec<FieldValue>,
}

impl DecodedRegister {
    pub fn layout(&self) -> &'static RegisterLayout {
        self.layout
    }

    pub fn name(&self) -> &'static str {
        self.layout.name
    }

    pub fn address(&self) -> u8 {
        self.layout.address
    }

    /// Value of a named field. Padding is never returned.
    pub fn get(&self, name: &str) -> Option<u64> {
        self.named_values()
            .find(|field| field.name == name)
            .map(|field| field.value)
    }

    /// Named field values in declared order.
    pub fn named_values(&self) -> impl Iterator<Item = &FieldValue> {
        self.values
            .iter()
            .filter(|field| field.name != RESERVED)
    }

    /// Register name followed by every named field, e.g.
    /// `RxTxConfig(TX_EN=1, RX_EN=0, RF_PLL_CH_NO=5)`.
    pub fn render_full(&self) -> String {
        let values = self
            .named_values()
            .map(|field| format!("{}={}", field.name, field.value))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.layout.name, values)
    }

    /// Register name only.
    pub fn render_short(&self) -> &'static str {
        self.layout.name
    }
}

/// Decode `bytes` through `layout`.
///
/// # Examples
/// ```
/// use lt8920_core::registers::{decode, lookup};
///
/// let layout = lookup(0x07).unwrap();
/// let reg = decode(layout, &[0x01, 0x85]).unwrap();
/// assert_eq!(reg.get("TX_EN"), Some(1));
/// assert_eq!(reg.get("RX_EN"), Some(1));
/// assert_eq!(reg.get("RF_PLL_CH_NO"), Some(5));
/// assert_eq!(reg.render_full(), "RxTxConfig(TX_EN=1, RX_EN=1, RF_PLL_CH_NO=5)");
/// ```
///
/// # Errors
/// Returns `RegisterError::LengthMismatch` when `bytes` is not exactly
/// `layout.byte_length` long, and `RegisterError::TooWide` for layouts wider
/// than 64 bits.
pub fn decode(
    layout: &'static RegisterLayout,
    bytes: &[u8],
) -> Result<DecodedRegister, RegisterError> {
    if bytes.len() != layout.byte_length {
        return Err(RegisterError::LengthMismatch {
            expected: layout.byte_length,
            actual: bytes.len(),
        });
    }
    let mut reader = BitReader::new(bytes)?;
    let values = layout
        .fields
        .iter()
        .map(|field| FieldValue {
            name: field.name,
            value: reader.take(field.width),
        })
        .collect();
    Ok(DecodedRegister { layout, values })
}
