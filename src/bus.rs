//! Bus transport capability and an adapter for `embedded-hal-async` I2C.
//!
//! The driver talks to the device through [`Bus`], which reports how many
//! bytes a transfer actually moved. That keeps two failure families apart: a
//! transport-level refusal (no acknowledgement) surfaces as `Err`, while a
//! transfer that completed but moved fewer bytes than requested surfaces as a
//! short count. An address-setting write can also ask for the bus to be held
//! open so the following read is issued under a repeated start.

use embedded_hal_async::i2c::I2c;

/// Two-wire transport with transfer-count reporting.
///
/// Every call runs to completion, refusal, or truncation before returning;
/// there is no cancellation. The bus is assumed to have exactly one owner.
#[allow(async_fn_in_trait)]
pub trait Bus {
    /// Transport-level error (no acknowledgement).
    type Error;

    /// Write `bytes` to the device at `address`, returning the number of
    /// bytes moved. `hold` keeps the bus open (no STOP condition) so the next
    /// [`read`](Bus::read) chains onto this write with a repeated start.
    async fn write(&mut self, address: u8, bytes: &[u8], hold: bool)
    -> Result<usize, Self::Error>;

    /// Read into `buffer` from the device at `address`, returning the number
    /// of bytes moved.
    async fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<usize, Self::Error>;
}

/// [`Bus`] adapter over any [`embedded_hal_async::i2c::I2c`] peripheral.
///
/// `embedded-hal` transactions cannot stay open between trait calls, so a
/// held register-select write is latched here and fused with the following
/// read into a single `write_read` transaction, which the HAL issues with a
/// repeated start. Only single-byte register selects are ever held in this
/// protocol; a multi-byte `hold` write degrades to a plain write.
///
/// The HAL reports transfers all-or-nothing, so a successful call always
/// counts as a full transfer.
pub struct I2cBus<T> {
    i2c: T,
    held: Option<u8>,
}

impl<T> I2cBus<T> {
    pub const fn new(i2c: T) -> Self {
        Self { i2c, held: None }
    }

    /// Give the I2C peripheral back.
    pub fn release(self) -> T {
        self.i2c
    }
}

impl<T: I2c> Bus for I2cBus<T> {
    type Error = T::Error;

    async fn write(&mut self, address: u8, bytes: &[u8], hold: bool) -> Result<usize, Self::Error> {
        if hold && bytes.len() == 1 {
            self.held = Some(bytes[0]);
            return Ok(1);
        }
        self.i2c.write(address, bytes).await?;
        Ok(bytes.len())
    }

    async fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<usize, Self::Error> {
        match self.held.take() {
            Some(register) => self.i2c.write_read(address, &[register], buffer).await?,
            None => self.i2c.read(address, buffer).await?,
        }
        Ok(buffer.len())
    }
}
