//! LT8920 register catalog and bitfield decoding.
//!
//! The module follows a layered structure:
//! - `layout`: field and register descriptors (data only)
//! - `catalog`: the static address -> layout table (source of truth)
//! - `reader`: MSB-first bit extraction over a big-endian word
//! - `decoder`: decoding a byte buffer into named field values and rendering
//! - `error`: explicit, actionable errors
//!
//! Every register is described by data, not by a dedicated type: a single
//! generic routine decodes any layout. Field widths are packed
//! most-significant-bit first, so the first declared field occupies the top
//! bits of the first byte.

pub mod catalog;
pub mod decoder;
pub mod error;
pub mod layout;
pub mod reader;

pub use catalog::{
    FIFO_ADDRESS, FIFO_STATUS_ADDRESS, REGISTERS, RX_TX_CONFIG_ADDRESS, lookup,
};
pub use decoder::{DecodedRegister, FieldValue, decode};
pub use error::RegisterError;
pub use layout::{Field, RESERVED, RegisterLayout};
