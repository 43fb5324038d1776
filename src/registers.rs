//! BMP581 register map and bit-level contracts.
//!
//! Only the registers this driver touches are listed. The measurement lanes
//! (0x20–0x22) and `INT_STATUS` (0x27) are close enough in the address space
//! that one burst read covers both, which is what [`crate::Bmp581`] relies on
//! to pick up a power-on reset in the same transaction as the sample.

/// BMP581 I2C address with the ADR jumper in its default position.
pub const I2C_ADDR: u8 = 0x47;

// =============================================================================
// Register Addresses
// =============================================================================

pub const REG_CHIP_ID: u8 = 0x01;
pub const REG_INT_SOURCE: u8 = 0x15;
pub const REG_PRESS_DATA_XLSB: u8 = 0x20;
pub const REG_PRESS_DATA_LSB: u8 = 0x21;
pub const REG_PRESS_DATA_MSB: u8 = 0x22;
// 0x23–0x26 are reserved and only ever show up inside burst reads.
pub const REG_INT_STATUS: u8 = 0x27;
pub const REG_STATUS: u8 = 0x28;
pub const REG_OSR_CONFIG: u8 = 0x36;
pub const REG_ODR_CONFIG: u8 = 0x37;
pub const REG_CMD: u8 = 0x7E;

// =============================================================================
// Bit Fields
// =============================================================================

/// `INT_SOURCE.drdy_data_reg_en`: route the data-ready event to `INT_STATUS`.
pub const INT_SOURCE_DRDY_DATA_REG_EN: u8 = 0b0000_0001;

/// `INT_STATUS.drdy_data_reg`: a new measurement is available.
pub const INT_STATUS_DRDY_DATA_REG: u8 = 0b0000_0001;
/// `INT_STATUS.por`: the device has powered up or otherwise reset.
/// Reading `INT_STATUS` clears it.
pub const INT_STATUS_POR: u8 = 0b0001_0000;

/// `STATUS.status_nvm_rdy`: NVM copy of the calibration data has completed.
pub const STATUS_NVM_RDY: u8 = 0b0000_0010;
/// `STATUS.status_nvm_err`: NVM reports a data-integrity error.
pub const STATUS_NVM_ERR: u8 = 0b0000_0100;

/// `OSR_CONFIG.osr_p` field position (temperature field sits at bit 0).
pub const OSR_CONFIG_OSR_P_SHIFT: u8 = 3;
/// `OSR_CONFIG.press_en`: enable pressure measurement (off by default).
pub const OSR_CONFIG_PRESS_EN: u8 = 0b0100_0000;

/// `ODR_CONFIG.pwr_mode` = continuous: measure repeatedly without host
/// intervention.
pub const ODR_CONFIG_PWR_MODE_CONTINUOUS: u8 = 0b0000_0011;
/// `ODR_CONFIG.odr` = 1 Hz. The ODR field is ignored in continuous mode; a
/// fixed legal value is written so the field is never left with garbage.
pub const ODR_CONFIG_ODR_1HZ: u8 = 0x1C << 2;

/// `CMD` opcode for a soft reset (registers back to defaults, deep standby).
pub const CMD_SOFT_RESET: u8 = 0xB6;

// =============================================================================
// Burst Spans
// =============================================================================

/// Measurement burst: the three pressure lanes, the reserved bytes, and
/// `INT_STATUS`, in one transaction.
pub const MEASUREMENT_BURST_LEN: usize = (REG_INT_STATUS - REG_PRESS_DATA_XLSB + 1) as usize;
/// Power-up status burst: `INT_STATUS` and `STATUS` in one transaction.
pub const STATUS_BURST_LEN: usize = (REG_STATUS - REG_INT_STATUS + 1) as usize;
/// Configuration burst: `OSR_CONFIG` and `ODR_CONFIG` in one transaction.
pub const CONFIG_BURST_LEN: usize = (REG_ODR_CONFIG - REG_OSR_CONFIG + 1) as usize;

const _: () = assert!(REG_PRESS_DATA_XLSB + MEASUREMENT_BURST_LEN as u8 == REG_INT_STATUS + 1);
const _: () = assert!(REG_INT_STATUS + STATUS_BURST_LEN as u8 == REG_STATUS + 1);
const _: () = assert!(REG_OSR_CONFIG + CONFIG_BURST_LEN as u8 == REG_ODR_CONFIG + 1);
