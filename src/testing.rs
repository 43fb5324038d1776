//! Scripted fakes for exercising the session protocol without hardware.
//!
//! [`FakeBus`] plays back a fixed script of expected transfers; each step can
//! complete in full, truncate, or refuse, and reads carry canned bytes.
//! Any transfer that deviates from the script panics, so a test failing to
//! drain its script is caught by [`FakeBus::done`]. [`FakeDelay`] completes
//! immediately and sums how long it was asked to sleep.

use std::collections::VecDeque;
use std::vec::Vec;

use crate::bus::Bus;

/// Transport error produced by a step scripted as [`Outcome::NoAck`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

/// How a scripted transfer completes.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Full transfer. For reads, these bytes fill the caller's buffer.
    Ok(Vec<u8>),
    /// Transfer truncated to this many bytes.
    Short(usize),
    /// Transport-level refusal.
    NoAck,
}

/// One expected transfer.
#[derive(Debug, Clone)]
pub enum Expect {
    /// `write(address, bytes, hold)` with exactly this payload and hold flag.
    Write {
        bytes: Vec<u8>,
        hold: bool,
        outcome: Outcome,
    },
    /// `read(address, buffer)` of exactly this length.
    Read { len: usize, outcome: Outcome },
}

/// Strictly scripted [`Bus`] double.
pub struct FakeBus {
    address: u8,
    script: VecDeque<Expect>,
}

impl FakeBus {
    pub fn new(address: u8, script: Vec<Expect>) -> Self {
        Self {
            address,
            script: script.into(),
        }
    }

    /// Assert that the whole script was consumed.
    pub fn done(&self) {
        assert!(
            self.script.is_empty(),
            "script not fully consumed, {} steps left",
            self.script.len()
        );
    }
}

impl Bus for FakeBus {
    type Error = BusFault;

    async fn write(&mut self, address: u8, bytes: &[u8], hold: bool) -> Result<usize, BusFault> {
        assert_eq!(address, self.address, "write to unexpected device address");
        match self.script.pop_front() {
            Some(Expect::Write {
                bytes: expected,
                hold: expected_hold,
                outcome,
            }) => {
                assert_eq!(bytes, &expected[..], "unexpected write payload");
                assert_eq!(hold, expected_hold, "unexpected hold flag for {bytes:02x?}");
                match outcome {
                    Outcome::Ok(_) => Ok(bytes.len()),
                    Outcome::Short(moved) => Ok(moved),
                    Outcome::NoAck => Err(BusFault),
                }
            }
            step => panic!("unexpected write of {bytes:02x?}, next step {step:?}"),
        }
    }

    async fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<usize, BusFault> {
        assert_eq!(address, self.address, "read from unexpected device address");
        match self.script.pop_front() {
            Some(Expect::Read { len, outcome }) => {
                assert_eq!(buffer.len(), len, "unexpected read length");
                match outcome {
                    Outcome::Ok(bytes) => {
                        buffer.copy_from_slice(&bytes);
                        Ok(buffer.len())
                    }
                    Outcome::Short(moved) => Ok(moved),
                    Outcome::NoAck => Err(BusFault),
                }
            }
            step => panic!("unexpected read of {} bytes, next step {step:?}", buffer.len()),
        }
    }
}

/// Delay double that completes immediately and records the total sleep it was
/// asked for, in nanoseconds.
#[derive(Debug, Default)]
pub struct FakeDelay {
    pub slept_ns: u64,
}

impl embedded_hal_async::delay::DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.slept_ns += u64::from(ns);
    }
}
