//! Platform-agnostic async driver for the Bosch BMP581 barometric pressure
//! sensor.
//!
//! The BMP581 is run in continuous mode over I2C. The driver covers the whole
//! session protocol: the power-up verification the datasheet recommends
//! (chip id, NVM health, power-on-reset flag), oversampling/power-mode
//! configuration with readback verification, arming and polling the
//! data-ready flag, burst measurement reads, and autonomous recovery when the
//! device resets behind the host's back mid-measurement.
//!
//! It is `#![no_std]`. Bus access goes through the [`bus::Bus`] capability
//! and delays through [`embedded_hal_async::delay::DelayNs`], so the protocol
//! logic compiles on embedded targets and on desktop hosts for tests. On
//! firmware, wrap the HAL's I2C peripheral in [`bus::I2cBus`] and pass
//! something like `embassy_time::Delay`:
//!
//! ```ignore
//! let mut sensor = Bmp581::new(I2cBus::new(i2c), embassy_time::Delay)
//!     .init(Config::default())
//!     .await?;
//! let pressure = sensor.read_pressure().await?;
//! ```
//!
//! The driver assumes it is the only owner of the device; callers sharing the
//! bus across tasks must hand in an exclusive device handle.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod bus;
pub mod config;
pub mod data;
pub mod error;
pub mod registers;

mod device;

#[cfg(test)]
pub(crate) mod testing;

pub use bus::{Bus, I2cBus};
pub use config::{Config, Oversampling, Timings};
pub use data::{Pressure, RawPressure};
pub use device::{Bmp581, Measuring, Standby};
pub use error::{Error, Operation, Phase};
