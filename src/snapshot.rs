use core::fmt;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Sender, TrySendError};
use embedded_hal_async::i2c::Error as I2cError;

use crate::accel::Acceleration;
use crate::error::ReadError;
use crate::mag::MagneticField;

/// Outcome of one poll tick. Each sensor succeeds or fails on its own.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSnapshot<EA, EM> {
    /// Tick number, starting at 0 for the first tick of a run
    pub sequence: u32,
    pub accel: Result<Acceleration, ReadError<EA>>,
    pub mag: Result<MagneticField, ReadError<EM>>,
}

impl<EA, EM> SensorSnapshot<EA, EM> {
    /// Both sensors produced a reading
    pub fn is_ok(&self) -> bool {
        self.accel.is_ok() && self.mag.is_ok()
    }

    pub fn accel_status(&self) -> Status<'_, EA> {
        Status {
            sensor: "Accelerometer",
            error: self.accel.as_ref().err(),
        }
    }

    pub fn mag_status(&self) -> Status<'_, EM> {
        Status {
            sensor: "Magnetometer",
            error: self.mag.as_ref().err(),
        }
    }
}

/// Per-sensor status line.
///
/// Renders `Status: Running`, or `Failed to read from <sensor>: <message>`.
#[derive(Debug)]
pub struct Status<'a, E> {
    sensor: &'static str,
    error: Option<&'a ReadError<E>>,
}

impl<E> Status<'_, E> {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<&ReadError<E>> {
        self.error
    }
}

impl<E: I2cError> fmt::Display for Status<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error {
            None => f.write_str("Status: Running"),
            Some(e) => write!(f, "Failed to read from {}: {}", self.sensor, e),
        }
    }
}

/// Consumer of finished snapshots.
///
/// Called from the polling task; any hand-off to another context is up to the sink.
pub trait SnapshotSink<EA, EM> {
    fn deliver(&mut self, snapshot: SensorSnapshot<EA, EM>);
}

impl<EA, EM, F> SnapshotSink<EA, EM> for F
where
    F: FnMut(SensorSnapshot<EA, EM>),
{
    fn deliver(&mut self, snapshot: SensorSnapshot<EA, EM>) {
        self(snapshot)
    }
}

/// Forwards snapshots into an `embassy-sync` channel without waiting.
///
/// When the channel is full the snapshot is dropped and counted.
pub struct ChannelSink<'a, M, EA, EM, const N: usize>
where
    M: RawMutex,
{
    sender: Sender<'a, M, SensorSnapshot<EA, EM>, N>,
    dropped: u32,
}

impl<'a, M, EA, EM, const N: usize> ChannelSink<'a, M, EA, EM, N>
where
    M: RawMutex,
{
    pub fn new(sender: Sender<'a, M, SensorSnapshot<EA, EM>, N>) -> Self {
        Self { sender, dropped: 0 }
    }

    /// Snapshots lost to a full channel
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<M, EA, EM, const N: usize> SnapshotSink<EA, EM> for ChannelSink<'_, M, EA, EM, N>
where
    M: RawMutex,
{
    fn deliver(&mut self, snapshot: SensorSnapshot<EA, EM>) {
        if let Err(TrySendError::Full(_snapshot)) = self.sender.try_send(snapshot) {
            self.dropped = self.dropped.wrapping_add(1);

            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Snapshot channel full, dropped tick {} ({} total)",
                _snapshot.sequence,
                self.dropped
            );
        }
    }
}
