//! Measurement data types and fixed-point decoding.
//!
//! The device reports pressure as an unsigned fixed-point word with a 6-bit
//! radix position: the value in Pascals is `raw / 64`. [`RawPressure`] is the
//! word as assembled from the three measurement lanes; [`Pressure`] is the
//! decoded integer/fraction pair, kept in integers so no float support is
//! needed on the target.

/// Number of fractional bits in the raw pressure word.
const RADIX_BITS: u32 = 6;
const FRACTION_MASK: u32 = (1 << RADIX_BITS) - 1;
/// Scale of the decimal fraction: six digits.
const FRACTION_SCALE: u32 = 1_000_000;

/// Raw fixed-point pressure word, assembled least-significant lane first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPressure(pub u32);

impl RawPressure {
    pub(crate) const fn from_lanes(xlsb: u8, lsb: u8, msb: u8) -> Self {
        Self(u32::from_le_bytes([xlsb, lsb, msb, 0]))
    }

    /// Split into integral Pascals and a six-digit decimal fraction,
    /// truncating toward zero below 1/64 Pa.
    pub const fn decode(self) -> Pressure {
        Pressure {
            integer: (self.0 >> RADIX_BITS) as i32,
            fractional: ((self.0 & FRACTION_MASK) * FRACTION_SCALE) >> RADIX_BITS,
        }
    }
}

/// Decoded pressure in Pascals, representing `integer + fractional / 1_000_000`.
///
/// `fractional` is always a non-negative six-digit decimal numerator in
/// `0..=999_999`, regardless of the sign of `integer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pressure {
    pub integer: i32,
    pub fractional: u32,
}
