//! Error taxonomy for the BMP581 session protocol.
//!
//! Bus-level failures are a closed set of kinds ([`Error::NoAck`],
//! [`Error::ShortTransfer`]) carrying the protocol step ([`Operation`]) and
//! transaction half ([`Phase`]) they occurred in. Every failing protocol step
//! stays individually attributable without enumerating the full cross
//! product as flat identities.
//!
//! Propagation is fail-fast throughout the driver: the first failing sub-step
//! aborts the whole operation. Nothing retries except the reset-recovery
//! path, whose budget is fixed (one re-init, then one soft reset + re-init).

use thiserror_no_std::Error;

/// Protocol step a bus failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Identity read of `CHIP_ID` during power-up verification.
    ChipIdRead,
    /// Power-up burst read spanning `INT_STATUS` and `STATUS`.
    StatusRead,
    /// Burst write of `OSR_CONFIG` and `ODR_CONFIG`.
    ConfigWrite,
    /// Verification burst read of `OSR_CONFIG` and `ODR_CONFIG`.
    ConfigRead,
    /// Write of `INT_SOURCE` (arming or disarming data-ready).
    IntSourceWrite,
    /// Verification read of `INT_SOURCE`.
    IntSourceRead,
    /// Data-ready poll read of `INT_STATUS`.
    IntStatusRead,
    /// Measurement burst read spanning the pressure lanes and `INT_STATUS`.
    MeasurementRead,
    /// Soft-reset command write to `CMD`.
    SoftReset,
}

/// Half of a bus transaction.
///
/// A burst read is an address-setting write followed by a data read, and the
/// two halves fail independently; the data half is never attempted once the
/// address half has failed. A plain write is a single frame: a refused write
/// is attributed to [`Phase::Address`] (the transport cannot tell which byte
/// was refused) and a truncated one to [`Phase::Data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The write selecting the target register.
    Address,
    /// The transfer that moves the payload.
    Data,
}

/// Everything that can go wrong in a session. `E` is the transport's own
/// error type, carried through untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The transport refused the transfer outright.
    #[error("bus did not acknowledge the {phase:?} half of {op:?}")]
    NoAck {
        op: Operation,
        phase: Phase,
        cause: E,
    },

    /// The transport moved fewer bytes than requested.
    #[error("short transfer in the {phase:?} half of {op:?}: {got}/{expected} bytes")]
    ShortTransfer {
        op: Operation,
        phase: Phase,
        expected: usize,
        got: usize,
    },

    /// `CHIP_ID` read back as zero: device absent or bus miswired.
    #[error("chip id reads zero")]
    ChipIdZero,

    /// The NVM copy of the calibration data has not completed.
    #[error("NVM not ready")]
    NvmNotReady,

    /// NVM reports an error while the ready flag is still clear.
    #[error("NVM error while NVM not ready")]
    NvmErrorAndNotReady,

    /// NVM reports an error.
    #[error("NVM error")]
    NvmError,

    /// `INT_STATUS` held something other than exactly the power-on-reset
    /// flag on the first read after power-up.
    #[error("unexpected reset state {0:#04x} after power-up")]
    UnexpectedResetState(u8),

    /// Both configuration bytes read back swapped: suspected addressing
    /// fault rather than a field that refused the write.
    #[error("configuration registers read back transposed")]
    ConfigsTransposed,

    /// `OSR_CONFIG` did not hold what was written.
    #[error("OSR_CONFIG readback {read:#04x} does not match {wrote:#04x}")]
    OsrConfigMismatch { wrote: u8, read: u8 },

    /// `ODR_CONFIG` did not hold what was written.
    #[error("ODR_CONFIG readback {read:#04x} does not match {wrote:#04x}")]
    OdrConfigMismatch { wrote: u8, read: u8 },

    /// `INT_SOURCE` did not hold what was written.
    #[error("INT_SOURCE readback {read:#04x} does not match {wrote:#04x}")]
    IntSourceMismatch { wrote: u8, read: u8 },

    /// The data-ready flag never appeared within the maximum measurement
    /// period.
    #[error("timed out waiting for data ready")]
    DataReadyTimeout,

    /// The power-on-reset flag was set in the measurement burst: the device
    /// has reset and its configuration may have been wiped, so the sample is
    /// discarded. Recoverable via
    /// [`read_raw_handling_reset`](crate::Bmp581::read_raw_handling_reset).
    #[error("power-on reset detected during measurement")]
    ResetDetected,
}
