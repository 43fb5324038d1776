//! BMP581 session driver.
//!
//! The session lifecycle is a typestate: a handle starts in [`Standby`], and
//! only [`Bmp581::init`] (power-up verification, configuration, first
//! data-ready wait) produces a [`Measuring`] handle. Calling a measurement
//! method before the device is configured is therefore a compile error rather
//! than something caller discipline has to prevent.
//!
//! Everything here is fail-fast: the first failing sub-step aborts the whole
//! operation. The one retrying path is reset recovery, with a fixed budget of
//! one plain re-init followed by one soft reset + re-init.

use core::marker::PhantomData;

use embedded_hal_async::delay::DelayNs;
use log::{debug, info, warn};

use crate::bus::Bus;
use crate::config::{Config, Timings};
use crate::data::RawPressure;
use crate::error::{Error, Operation, Phase};
use crate::registers::*;

/// Session state marker: constructed, but not yet verified or configured.
pub struct Standby;

/// Session state marker: verified, configured, and producing measurements.
pub struct Measuring;

/// BMP581 driver handle.
///
/// `B` is the bus transport, `D` the delay provider (firmware typically
/// passes `embassy_time::Delay`), and `S` the session state marker.
pub struct Bmp581<B, D, S = Standby> {
    bus: B,
    delay: D,
    address: u8,
    config: Config,
    timings: Timings,
    _state: PhantomData<S>,
}

// =============================================================================
// Construction (Standby)
// =============================================================================

impl<B, D> Bmp581<B, D, Standby>
where
    B: Bus,
    D: DelayNs,
{
    /// Create a handle for a freshly powered device, using the default I2C
    /// address and timing bounds.
    pub fn new(bus: B, delay: D) -> Self {
        Self {
            bus,
            delay,
            address: I2C_ADDR,
            config: Config::default(),
            timings: Timings::default(),
            _state: PhantomData,
        }
    }

    /// Use a non-default device address (ADR jumper moved).
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Override the protocol timing bounds.
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Run the full bring-up: power-up verification, oversampling and
    /// continuous-mode configuration with readback, and one data-ready
    /// cycle to prove the device is measuring.
    ///
    /// Must be called once per device power cycle; the power-up settle wait
    /// happens inside, so it is safe to call immediately after power-on.
    pub async fn init(mut self, config: Config) -> Result<Bmp581<B, D, Measuring>, Error<B::Error>> {
        self.config = config;
        self.init_sequence().await?;
        info!("BMP581 up, continuous mode, first measurement observed");
        Ok(self.into_state())
    }
}

// =============================================================================
// Measurement (Measuring)
// =============================================================================

impl<B, D> Bmp581<B, D, Measuring>
where
    B: Bus,
    D: DelayNs,
{
    /// Read one raw measurement.
    ///
    /// A single burst covers the three pressure lanes through `INT_STATUS`,
    /// so the sample and the reset flag arrive in the same transaction:
    /// half the start/stop overhead of two reads, and no window for the
    /// flags to change between them. If the power-on-reset flag is set the
    /// sample is discarded and [`Error::ResetDetected`] is returned, since
    /// the configuration may have been wiped with it.
    pub async fn read_raw(&mut self) -> Result<RawPressure, Error<B::Error>> {
        let mut frame = [0u8; MEASUREMENT_BURST_LEN];
        self.read_burst(Operation::MeasurementRead, REG_PRESS_DATA_XLSB, &mut frame)
            .await?;

        let int_status = frame[(REG_INT_STATUS - REG_PRESS_DATA_XLSB) as usize];
        if int_status & INT_STATUS_POR != 0 {
            return Err(Error::ResetDetected);
        }

        Ok(RawPressure::from_lanes(frame[0], frame[1], frame[2]))
    }

    /// [`read_raw`](Self::read_raw), but recover from a mid-measurement
    /// reset before giving up.
    ///
    /// A power-on reset normally leaves the registers at their defaults and
    /// the part in standby, so one re-init suffices; if it does not, a soft
    /// reset is issued and init is attempted once more. On successful
    /// recovery the read is retried once.
    pub async fn read_raw_handling_reset(&mut self) -> Result<RawPressure, Error<B::Error>> {
        match self.read_raw().await {
            Err(Error::ResetDetected) => {
                warn!("BMP581 reset behind our back, re-initializing");
                self.recover().await?;
                self.read_raw().await
            }
            result => result,
        }
    }

    /// Read one measurement, recovering from a mid-measurement reset, and
    /// decode it to Pascals.
    pub async fn read_pressure(&mut self) -> Result<crate::data::Pressure, Error<B::Error>> {
        Ok(self.read_raw_handling_reset().await?.decode())
    }

    /// Reset recovery: re-init, falling back to a soft reset + re-init. The
    /// last concrete error propagates if both attempts fail.
    async fn recover(&mut self) -> Result<(), Error<B::Error>> {
        if self.init_sequence().await.is_ok() {
            return Ok(());
        }
        warn!("BMP581 re-init failed, soft resetting first");
        self.soft_reset_cmd().await?;
        self.init_sequence().await
    }
}

// =============================================================================
// State-independent operations
// =============================================================================

impl<B, D, S> Bmp581<B, D, S>
where
    B: Bus,
    D: DelayNs,
{
    /// Soft-reset the device: registers back to their defaults, mode back to
    /// deep standby. The handle returns to [`Standby`] and must be
    /// re-initialized before measuring again.
    pub async fn reset(mut self) -> Result<Bmp581<B, D, Standby>, Error<B::Error>> {
        self.soft_reset_cmd().await?;
        Ok(self.into_state())
    }

    /// Give back the bus and delay provider.
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    fn into_state<T>(self) -> Bmp581<B, D, T> {
        Bmp581 {
            bus: self.bus,
            delay: self.delay,
            address: self.address,
            config: self.config,
            timings: self.timings,
            _state: PhantomData,
        }
    }

    // =========================================================================
    // Register access
    // =========================================================================

    /// Write `bytes` to consecutive registers starting at `start`.
    async fn write_burst(
        &mut self,
        op: Operation,
        start: u8,
        bytes: &[u8],
    ) -> Result<(), Error<B::Error>> {
        // Largest write frame in the protocol: register + the two config bytes.
        let mut frame = [0u8; 1 + CONFIG_BURST_LEN];
        frame[0] = start;
        frame[1..=bytes.len()].copy_from_slice(bytes);
        let requested = bytes.len() + 1;

        let moved = self
            .bus
            .write(self.address, &frame[..requested], false)
            .await
            .map_err(|cause| Error::NoAck {
                op,
                phase: Phase::Address,
                cause,
            })?;
        if moved != requested {
            return Err(Error::ShortTransfer {
                op,
                phase: Phase::Data,
                expected: requested,
                got: moved,
            });
        }
        Ok(())
    }

    async fn write_register(
        &mut self,
        op: Operation,
        register: u8,
        value: u8,
    ) -> Result<(), Error<B::Error>> {
        self.write_burst(op, register, &[value]).await
    }

    /// Read consecutive registers starting at `start`: an address-setting
    /// write with the bus held open, then one data read. The data half is
    /// never attempted once the address half has failed.
    async fn read_burst(
        &mut self,
        op: Operation,
        start: u8,
        buffer: &mut [u8],
    ) -> Result<(), Error<B::Error>> {
        let moved = self
            .bus
            .write(self.address, &[start], true)
            .await
            .map_err(|cause| Error::NoAck {
                op,
                phase: Phase::Address,
                cause,
            })?;
        if moved != 1 {
            return Err(Error::ShortTransfer {
                op,
                phase: Phase::Address,
                expected: 1,
                got: moved,
            });
        }

        let moved = self
            .bus
            .read(self.address, buffer)
            .await
            .map_err(|cause| Error::NoAck {
                op,
                phase: Phase::Data,
                cause,
            })?;
        if moved != buffer.len() {
            return Err(Error::ShortTransfer {
                op,
                phase: Phase::Data,
                expected: buffer.len(),
                got: moved,
            });
        }
        Ok(())
    }

    async fn read_register(&mut self, op: Operation, register: u8) -> Result<u8, Error<B::Error>> {
        let mut value = [0u8; 1];
        self.read_burst(op, register, &mut value).await?;
        Ok(value[0])
    }

    // =========================================================================
    // Power-up verification
    // =========================================================================

    /// The checks the datasheet recommends once per power cycle: chip id
    /// non-zero, NVM healthy, and the power-on-reset flag present exactly as
    /// expected.
    async fn check_powerup(&mut self) -> Result<(), Error<B::Error>> {
        // The device does not respond on the bus until the power-up settle
        // time has elapsed.
        self.delay.delay_ms(self.timings.powerup_delay_ms).await;

        let chip_id = self.read_register(Operation::ChipIdRead, REG_CHIP_ID).await?;
        if chip_id == 0 {
            return Err(Error::ChipIdZero);
        }
        debug!("BMP581 chip id {:#04x}", chip_id);

        // INT_STATUS and STATUS are adjacent, so one burst covers both.
        let mut statuses = [0u8; STATUS_BURST_LEN];
        self.read_burst(Operation::StatusRead, REG_INT_STATUS, &mut statuses)
            .await?;
        let int_status = statuses[0];
        let status = statuses[(REG_STATUS - REG_INT_STATUS) as usize];

        match status & (STATUS_NVM_RDY | STATUS_NVM_ERR) {
            0 => return Err(Error::NvmNotReady),
            STATUS_NVM_RDY => {}
            STATUS_NVM_ERR => return Err(Error::NvmErrorAndNotReady),
            _ => return Err(Error::NvmError),
        }

        // After a clean power-up INT_STATUS must hold exactly the POR flag.
        // The burst read above already cleared it on the device side.
        if int_status != INT_STATUS_POR {
            return Err(Error::UnexpectedResetState(int_status));
        }
        Ok(())
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Write the oversampling and power-mode bytes, wait for them to settle,
    /// and read them back, classifying exactly which field diverged.
    async fn configure(&mut self) -> Result<(), Error<B::Error>> {
        let osr = self.config.osr_config_byte();
        // The ODR field is ignored in continuous mode; writing the 1 Hz value
        // keeps the unrelated field at a known legal setting.
        let odr = ODR_CONFIG_PWR_MODE_CONTINUOUS | ODR_CONFIG_ODR_1HZ;

        self.write_burst(Operation::ConfigWrite, REG_OSR_CONFIG, &[osr, odr])
            .await?;
        self.delay.delay_ms(self.timings.settle_delay_ms).await;

        let mut readback = [0u8; CONFIG_BURST_LEN];
        self.read_burst(Operation::ConfigRead, REG_OSR_CONFIG, &mut readback)
            .await?;
        let (osr_read, odr_read) = (readback[0], readback[1]);

        if osr_read != osr {
            // The OSR slot holding the ODR target points at an addressing
            // fault, not a field that refused the write.
            if osr_read == odr {
                return Err(Error::ConfigsTransposed);
            }
            return Err(Error::OsrConfigMismatch {
                wrote: osr,
                read: osr_read,
            });
        }
        if odr_read != odr {
            return Err(Error::OdrConfigMismatch {
                wrote: odr,
                read: odr_read,
            });
        }

        debug!("BMP581 configured, OSR_CONFIG {:#04x}, ODR_CONFIG {:#04x}", osr, odr);
        Ok(())
    }

    // =========================================================================
    // Data-ready wait
    // =========================================================================

    /// Write `INT_SOURCE` and verify the value stuck.
    async fn write_int_source(&mut self, value: u8) -> Result<(), Error<B::Error>> {
        self.write_register(Operation::IntSourceWrite, REG_INT_SOURCE, value)
            .await?;
        let read = self
            .read_register(Operation::IntSourceRead, REG_INT_SOURCE)
            .await?;
        if read != value {
            return Err(Error::IntSourceMismatch { wrote: value, read });
        }
        Ok(())
    }

    /// Arm the data-ready source, poll for the flag with a bounded deadline,
    /// and disarm it again.
    ///
    /// The deadline is accumulated from the poll sleeps: the poll gives up
    /// only once at least the maximum measurement period has been slept, and
    /// checks again within one poll interval of crossing it. Bus time is not
    /// counted, which only ever makes the bound more generous.
    async fn wait_data_ready(&mut self) -> Result<(), Error<B::Error>> {
        self.write_int_source(INT_SOURCE_DRDY_DATA_REG_EN).await?;

        let budget_us = self.timings.max_measurement_period_ms.saturating_mul(1_000);
        // A zero interval would poll forever without moving the deadline.
        let interval_us = self.timings.poll_interval_us.max(1);
        let mut slept_us: u32 = 0;
        loop {
            let int_status = self
                .read_register(Operation::IntStatusRead, REG_INT_STATUS)
                .await?;
            if int_status & INT_STATUS_DRDY_DATA_REG != 0 {
                break;
            }
            if slept_us >= budget_us {
                return Err(Error::DataReadyTimeout);
            }
            self.delay.delay_us(interval_us).await;
            slept_us = slept_us.saturating_add(interval_us);
        }

        // Data is ready; drop the notification source again. Failing to
        // disarm is still an error even though readiness itself was observed.
        if let Err(e) = self.write_int_source(0).await {
            warn!("BMP581 data ready, but disarming the notification source failed");
            return Err(e);
        }
        Ok(())
    }

    // =========================================================================
    // Init and reset
    // =========================================================================

    /// The full bring-up sequence. Also the body of reset recovery, which is
    /// why it lives on the state-independent impl.
    async fn init_sequence(&mut self) -> Result<(), Error<B::Error>> {
        self.check_powerup().await?;
        self.configure().await?;
        self.wait_data_ready().await
    }

    async fn soft_reset_cmd(&mut self) -> Result<(), Error<B::Error>> {
        self.write_register(Operation::SoftReset, REG_CMD, CMD_SOFT_RESET)
            .await?;
        self.delay.delay_ms(self.timings.soft_reset_delay_ms).await;
        Ok(())
    }
}
