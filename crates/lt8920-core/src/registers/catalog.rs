//! Static register table for the LT8920.
//!
//! Entries are sorted by address; `lookup` relies on that ordering. Field
//! lists follow the datasheet bit assignments, most-significant bit first.

use super::error::RegisterError;
use super::layout::{Field, RegisterLayout};

/// FIFO data register; writes push payload bytes into the transmit FIFO.
pub const FIFO_ADDRESS: u8 = 0x32;
/// RX/TX configuration register; `TX_EN = 1` starts a transmission.
pub const RX_TX_CONFIG_ADDRESS: u8 = 0x07;
/// FIFO pointer register; `CLR_W_PTR = 1` empties the transmit FIFO.
pub const FIFO_STATUS_ADDRESS: u8 = 0x34;

const fn f(name: &'static str, width: u8) -> Field {
    Field::new(name, width)
}

const fn pad(width: u8) -> Field {
    Field::reserved(width)
}

pub static REGISTERS: &[RegisterLayout] = &[
    RegisterLayout::new(0x03, "SynthLock", &[pad(3), f("RF_SYNTH_LOCK", 1), pad(12)]),
    RegisterLayout::new(0x06, "RSSI", &[f("RAW_RSSI", 6), pad(10)]),
    RegisterLayout::new(
        RX_TX_CONFIG_ADDRESS,
        "RxTxConfig",
        &[pad(7), f("TX_EN", 1), f("RX_EN", 1), f("RF_PLL_CH_NO", 7)],
    ),
    RegisterLayout::new(
        0x09,
        "PAConfig",
        &[f("PA_PWCTR", 4), pad(1), f("PA_GN", 4), pad(7)],
    ),
    RegisterLayout::new(0x0A, "XTALConfig", &[pad(15), f("XTAL_OSC_EN", 1)]),
    RegisterLayout::new(0x0B, "RSSIConfig", &[pad(7), f("RSSI_PDN", 1), pad(8)]),
    RegisterLayout::new(0x17, "VCOConfig", &[pad(13), f("TxRx_VCO_CAL_EN", 1), pad(2)]),
    RegisterLayout::new(0x1B, "XTALTrim", &[pad(10), f("XI_trim", 6)]),
    RegisterLayout::new(
        0x1D,
        "VersionInfo",
        &[pad(8), f("RF_VER_ID", 4), pad(1), f("DIGITAL_VER_ID", 3)],
    ),
    RegisterLayout::new(0x1E, "IDCodeLower", &[f("ID_CODE_L", 16)]),
    RegisterLayout::new(0x1F, "IDCodeUpper", &[f("RF_CODE_ID", 4), f("ID_CODE_M", 12)]),
    RegisterLayout::new(
        0x20,
        "FormatConfig",
        &[
            f("PREAMBLE_LEN", 3),
            f("SYNCWORD_LEN", 2),
            f("TRAILER_LEN", 3),
            f("DATA_PACKET_TYPE", 2),
            f("FEC_TYPE", 2),
            f("BRCLK_SEL", 3),
            pad(1),
        ],
    ),
    RegisterLayout::new(
        0x21,
        "DelayConfig33",
        &[
            f("VCO_ON_DELAY_CNT", 8),
            f("TX_PA_OFF_DELAY", 2),
            f("TX_PA_ON_DELAY", 6),
        ],
    ),
    RegisterLayout::new(
        0x22,
        "DelayConfig34",
        &[
            f("BPKTCTL_DIRECT", 1),
            f("TX_CW_DLY", 7),
            pad(2),
            f("TX_SW_ON_DELAY", 6),
        ],
    ),
    RegisterLayout::new(
        0x23,
        "PowerConfig",
        &[
            f("POWER_DOWN", 1),
            f("SLEEP_MODE", 1),
            pad(1),
            f("BRCLK_ON_SLEEP", 1),
            f("TRANSMIT_TIMES", 4),
            f("MISO_TRI_OPT", 1),
            f("SCRAMBLE_DATA", 7),
        ],
    ),
    RegisterLayout::new(0x24, "SyncWord0", &[f("SYNC_WORD", 16)]),
    RegisterLayout::new(0x25, "SyncWord1", &[f("SYNC_WORD", 16)]),
    RegisterLayout::new(0x26, "SyncWord2", &[f("SYNC_WORD", 16)]),
    RegisterLayout::new(0x27, "SyncWord3", &[f("SYNC_WORD", 16)]),
    RegisterLayout::new(
        0x28,
        "FIFOThresholdConfig",
        &[
            f("FIFO_EMPTY_THRESHOLD", 5),
            f("FIFO_FULL_THRESHOLD", 5),
            f("SYNCWORD_THRESHOLD", 6),
        ],
    ),
    RegisterLayout::new(
        0x29,
        "FramerConfig",
        &[
            f("CRC_ON", 1),
            f("SCRAMBLE_ON", 1),
            f("PACK_LENGTH_EN", 1),
            f("FW_TERM_TX", 1),
            f("AUTO_ACK", 1),
            f("PKT_FIFO_POLARITY", 1),
            pad(2),
            f("CRC_INITIAL_DATA", 8),
        ],
    ),
    RegisterLayout::new(
        0x2A,
        "RSSIScanConfig",
        &[f("SCAN_RSSI_CH_NO", 6), pad(2), f("RX_ACK_TIME", 8)],
    ),
    RegisterLayout::new(
        0x2B,
        "RSSIScanControl",
        &[
            f("SCAN_RSSI_EN", 1),
            f("SCAN_STRT_CH_OFFST", 7),
            f("WAIT_RSSI_SCAN_TIM", 8),
        ],
    ),
    RegisterLayout::new(0x2C, "DatarateConfig", &[f("DATARATE", 8), pad(8)]),
    RegisterLayout::new(0x2D, "OptionConfig", &[f("OPTION", 16)]),
    RegisterLayout::new(
        0x30,
        "Flags",
        &[
            f("CRC_ERROR", 1),
            f("FEC23_ERROR", 1),
            f("FRAMER_ST", 6),
            f("SYNCWORD_RECV", 1),
            f("PKT_FLAG", 1),
            f("FIFO_FLAG", 1),
            pad(5),
        ],
    ),
    RegisterLayout::new(FIFO_ADDRESS, "FIFO", &[f("TXRX_FIFO_REG", 16)]),
    RegisterLayout::new(
        FIFO_STATUS_ADDRESS,
        "FIFOStatus",
        &[
            f("CLR_W_PTR", 1),
            pad(1),
            f("FIFO_WR_PTR", 6),
            f("CLR_R_PTR", 1),
            pad(1),
            f("FIFO_RD_PTR", 6),
        ],
    ),
];

/// Resolve the layout registered for a 7-bit address.
///
/// # Examples
/// ```
/// use lt8920_core::registers::lookup;
///
/// let layout = lookup(0x07).unwrap();
/// assert_eq!(layout.name, "RxTxConfig");
/// assert!(lookup(0x7F).is_err());
/// ```
///
/// # Errors
/// Returns `RegisterError::UnknownRegister` when no layout exists for the
/// address.
pub fn lookup(address: u8) -> Result<&'static RegisterLayout, RegisterError> {
    REGISTERS
        .binary_search_by_key(&address, |layout| layout.address)
        .map(|index| &REGISTERS[index])
        .map_err(|_| RegisterError::UnknownRegister { address })
}

#[cfg(test)]
mod tests {
    use super::{REGISTERS, lookup};
    use crate::registers::error::RegisterError;

    const KNOWN: &[u8] = &[
        0x03, 0x06, 0x07, 0x09, 0x0A, 0x0B, 0x17, 0x1B, 0x1D, 0x1E, 0x1F, 0x20, 0x21, 0x22, 0x23,
        0x24, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2A, 0x2B, 0x2C, 0x2D, 0x30, 0x32, 0x34,
    ];

    #[test]
    fn every_known_address_resolves_with_exact_width() {
        for &address in KNOWN {
            let layout = lookup(address).unwrap();
            assert_eq!(layout.address, address);
            assert_eq!(
                layout.field_bits(),
                layout.bit_length(),
                "field widths of {} do not cover the register",
                layout.name
            );
        }
        assert_eq!(REGISTERS.len(), KNOWN.len());
    }

    #[test]
    fn table_is_sorted_and_unique() {
        assert!(
            REGISTERS
                .windows(2)
                .all(|pair| pair[0].address < pair[1].address)
        );
    }

    #[test]
    fn addresses_fit_in_seven_bits() {
        assert!(REGISTERS.iter().all(|layout| layout.address <= 0x7F));
    }

    #[test]
    fn unknown_address_is_rejected() {
        let err = lookup(0x7F).unwrap_err();
        assert!(matches!(err, RegisterError::UnknownRegister { address: 0x7F }));
        assert!(lookup(0x00).is_err());
        assert!(lookup(0x33).is_err());
    }
}
