/// Name used for padding fields. Padding is decoded but never exposed by name.
pub const RESERVED: &str = "_";

/// Default register width on the LT8920 bus.
pub const DEFAULT_BYTE_LENGTH: usize = 2;

/// One named bitfield within a register, `width` bits wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub width: u8,
}

impl Field {
    pub const fn new(name: &'static str, width: u8) -> Self {
        Self { name, width }
    }

    pub const fn reserved(width: u8) -> Self {
        Self::new(RESERVED, width)
    }

    pub fn is_reserved(&self) -> bool {
        self.name == RESERVED
    }
}

/// Static bit layout of one register address.
///
/// Fields are listed most-significant first and their widths sum to
/// `byte_length * 8`.
///
/// # Examples
/// ```
/// use lt8920_core::registers::{Field, RegisterLayout};
///
/// const FIELDS: &[Field] = &[Field::new("HIGH", 8), Field::new("LOW", 8)];
/// let layout = RegisterLayout::new(0x10, "Example", FIELDS);
/// assert_eq!(layout.bit_length(), 16);
/// assert_eq!(layout.field_bits(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterLayout {
    /// 7-bit register address.
    pub address: u8,
    /// Register type name used in annotation text.
    pub name: &'static str,
    /// Payload length in bytes.
    pub byte_length: usize,
    /// Ordered fields, most-significant first.
    pub fields: &'static [Field],
}

impl RegisterLayout {
    pub const fn new(address: u8, name: &'static str, fields: &'static [Field]) -> Self {
        Self {
            address,
            name,
            byte_length: DEFAULT_BYTE_LENGTH,
            fields,
        }
    }

    pub fn bit_length(&self) -> u32 {
        (self.byte_length * 8) as u32
    }

    /// Sum of all declared field widths, padding included.
    pub fn field_bits(&self) -> u32 {
        self.fields.iter().map(|field| u32::from(field.width)).sum()
    }

    /// Fields that carry a name, in declared order.
    pub fn named_fields(&self) -> impl Iterator<Item = &'static Field> {
        self.fields.iter().filter(|field| !field.is_reserved())
    }
}

#[cfg(test)]
mod tests {
    use super::{Field, RegisterLayout};

    const FIELDS: &[Field] = &[
        Field::reserved(3),
        Field::new("FLAG", 1),
        Field::reserved(12),
    ];

    #[test]
    fn named_fields_skip_padding() {
        let layout = RegisterLayout::new(0x03, "Example", FIELDS);
        let names: Vec<_> = layout.named_fields().map(|field| field.name).collect();
        assert_eq!(names, vec!["FLAG"]);
    }

    #[test]
    fn default_layout_is_two_bytes() {
        let layout = RegisterLayout::new(0x03, "Example", FIELDS);
        assert_eq!(layout.byte_length, 2);
        assert_eq!(layout.field_bits(), layout.bit_length());
    }
}
