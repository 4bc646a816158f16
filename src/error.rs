use core::fmt;

use embedded_hal_async::i2c::Error as I2cError;

use crate::poller::PollerState;

/// Output block was not exactly [`RawData::SIZE`](crate::raw_data::RawData::SIZE) bytes
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MalformedBuffer {
    pub len: usize,
}

impl fmt::Display for MalformedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed sample buffer ({} bytes)", self.len)
    }
}

/// Driver could not be brought up. The driver must not be polled.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError<P, E> {
    /// Bus provider could not hand out a connection
    Acquire(P),
    /// A configuration write was rejected
    Bus(E),
}

impl<P, E> fmt::Display for InitError<P, E>
where
    P: fmt::Debug,
    E: I2cError,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Acquire(e) => write!(f, "Failed to acquire bus: {:?}", e),
            Self::Bus(e) => write!(f, "Failed to communicate with device: {}", e.kind()),
        }
    }
}

/// A single sample could not be produced
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadError<E> {
    Bus(E),
    Malformed(MalformedBuffer),
}

impl<E> From<MalformedBuffer> for ReadError<E> {
    fn from(error: MalformedBuffer) -> Self {
        Self::Malformed(error)
    }
}

impl<E: I2cError> fmt::Display for ReadError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "{}", e.kind()),
            Self::Malformed(e) => write!(f, "{}", e),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// Operation not allowed in the poller's current state
    InvalidState(PollerState),
    /// Poll period must be non-zero
    ZeroPeriod,
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidState(state) => write!(f, "poller is {:?}", state),
            Self::ZeroPeriod => f.write_str("poll period is zero"),
        }
    }
}
