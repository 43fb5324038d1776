//! Driver configuration: oversampling selection and protocol timing bounds.

use crate::registers::{OSR_CONFIG_OSR_P_SHIFT, OSR_CONFIG_PRESS_EN};

/// Per-channel oversampling multiplier: how many raw conversions the device
/// averages internally per reported measurement.
///
/// Only these eight values exist on the part, so invalid field encodings are
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Oversampling {
    #[default]
    X1 = 0b000,
    X2 = 0b001,
    X4 = 0b010,
    X8 = 0b011,
    X16 = 0b100,
    X32 = 0b101,
    X64 = 0b110,
    X128 = 0b111,
}

impl Oversampling {
    /// Value for a 3-bit oversampling field of `OSR_CONFIG`.
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Oversampling selection applied by [`Bmp581::init`](crate::Bmp581::init).
///
/// The default matches the device's power-on values (no oversampling on
/// either channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub temperature_oversampling: Oversampling,
    pub pressure_oversampling: Oversampling,
}

impl Config {
    /// Target `OSR_CONFIG` byte: both oversampling fields plus the
    /// pressure-enable bit, which is clear on power-up and must be set for
    /// the device to measure pressure at all.
    pub(crate) const fn osr_config_byte(self) -> u8 {
        self.temperature_oversampling.bits()
            | self.pressure_oversampling.bits() << OSR_CONFIG_OSR_P_SHIFT
            | OSR_CONFIG_PRESS_EN
    }
}

/// Protocol timing bounds.
///
/// The defaults come from the part's electrical characteristics; override
/// them when a target needs more headroom. All waits go through the injected
/// delay, never a spin loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Settle time after power-up. The device does not respond on the bus
    /// before this has elapsed.
    pub powerup_delay_ms: u32,
    /// Settle time after a configuration write. The datasheet gives no exact
    /// figure, so the default is the longest documented electrical timing
    /// bound.
    pub settle_delay_ms: u32,
    /// Settle time after the soft-reset command.
    pub soft_reset_delay_ms: u32,
    /// Upper bound on one measurement period; data-ready polling gives up
    /// once this much sleep has accumulated.
    pub max_measurement_period_ms: u32,
    /// Sleep between data-ready polls.
    pub poll_interval_us: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            powerup_delay_ms: 2,
            settle_delay_ms: 4,
            soft_reset_delay_ms: 2,
            max_measurement_period_ms: 110,
            poll_interval_us: 500,
        }
    }
}
