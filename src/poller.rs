//! Fixed-cadence sampling of both sensors.
//!
//! ```ignore
//! static STOP: Signal<CriticalSectionRawMutex, ()> = Signal::new();
//!
//! let accel = Accelerometer::initialize(&mut provider).await?;
//! let mag = Magnetometer::initialize(&mut provider).await?;
//! let mut poller = Poller::new(accel, mag);
//!
//! let released = poller
//!     .run(DEFAULT_POLL_PERIOD, &STOP, &mut |snapshot: SensorSnapshot<_, _>| {
//!         // hand the snapshot to the display task
//!     })
//!     .await?;
//! ```

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Timer};
use embedded_hal_async::i2c::I2c;

use crate::accel::Accelerometer;
use crate::error::SchedulerError;
use crate::mag::Magnetometer;
use crate::snapshot::{SensorSnapshot, SnapshotSink};

pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_millis(100);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollerState {
    Idle,
    Running,
    Stopped,
}

/// Bus connections handed back by [`Poller::stop`]
#[derive(Debug)]
pub struct Released<A, M> {
    pub accel: A,
    pub mag: M,
}

/// Drives both sensors on a fixed period.
///
/// A tick reads the accelerometer, then the magnetometer; a failed read only
/// affects that sensor's half of the snapshot. Ticks never overlap: when a tick
/// overruns, every deadline that has already passed is dropped instead of
/// being fired late.
pub struct Poller<A, M> {
    sensors: Option<(Accelerometer<A>, Magnetometer<M>)>,
    state: PollerState,
    sequence: u32,
    skipped: u32,
}

impl<A, M> Poller<A, M>
where
    A: I2c,
    M: I2c,
{
    pub fn new(accel: Accelerometer<A>, mag: Magnetometer<M>) -> Self {
        Self {
            sensors: Some((accel, mag)),
            state: PollerState::Idle,
            sequence: 0,
            skipped: 0,
        }
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    /// Ticks dropped because the previous tick overran its period
    pub fn skipped_ticks(&self) -> u32 {
        self.skipped
    }

    /// Run one tick body now, outside the periodic schedule
    pub async fn poll_once(
        &mut self,
    ) -> Result<SensorSnapshot<A::Error, M::Error>, SchedulerError> {
        let Some((accel, mag)) = self.sensors.as_mut() else {
            return Err(SchedulerError::InvalidState(self.state));
        };

        let accel = accel.read().await;

        #[cfg(feature = "defmt")]
        if let Err(e) = &accel {
            defmt::warn!("Accelerometer read failed: {}", defmt::Debug2Format(e));
        }

        let mag = mag.read().await;

        #[cfg(feature = "defmt")]
        if let Err(e) = &mag {
            defmt::warn!("Magnetometer read failed: {}", defmt::Debug2Format(e));
        }

        let snapshot = SensorSnapshot {
            sequence: self.sequence,
            accel,
            mag,
        };

        self.sequence = self.sequence.wrapping_add(1);

        Ok(snapshot)
    }

    /// Sample every `period`, first tick immediately, until `stop` is signaled.
    ///
    /// Every tick produces exactly one snapshot for `sink`. On exit the poller
    /// is stopped and the bus connections are returned.
    pub async fn run<R, S>(
        &mut self,
        period: Duration,
        stop: &Signal<R, ()>,
        sink: &mut S,
    ) -> Result<Released<A, M>, SchedulerError>
    where
        R: RawMutex,
        S: SnapshotSink<A::Error, M::Error>,
    {
        if self.state != PollerState::Idle {
            return Err(SchedulerError::InvalidState(self.state));
        }

        if period == Duration::from_ticks(0) {
            return Err(SchedulerError::ZeroPeriod);
        }

        self.state = PollerState::Running;
        self.sequence = 0;

        #[cfg(feature = "defmt")]
        defmt::trace!("Poller started, period {} ms", period.as_millis());

        let mut deadline = Instant::now();

        loop {
            let snapshot = self.poll_once().await?;

            #[cfg(feature = "defmt")]
            defmt::debug!(
                "Tick {}: accel ok={}, mag ok={}",
                snapshot.sequence,
                snapshot.accel.is_ok(),
                snapshot.mag.is_ok()
            );

            sink.deliver(snapshot);

            deadline += period;

            let now = Instant::now();

            if deadline < now {
                let missed = missed_periods((now - deadline).as_ticks(), period.as_ticks());

                deadline += Duration::from_ticks(missed.saturating_mul(period.as_ticks()));
                self.skipped = self
                    .skipped
                    .saturating_add(u32::try_from(missed).unwrap_or(u32::MAX));

                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "Tick overran period, skipping {} ({} total)",
                    missed,
                    self.skipped
                );
            }

            if let Either::Second(()) = select(Timer::at(deadline), stop.wait()).await {
                break;
            }
        }

        self.stop()
            .ok_or(SchedulerError::InvalidState(PollerState::Stopped))
    }

    /// Stop polling and release both bus connections.
    ///
    /// Returns the connections on the first call and `None` on every call after.
    pub fn stop(&mut self) -> Option<Released<A, M>> {
        self.state = PollerState::Stopped;

        let (accel, mag) = self.sensors.take()?;

        #[cfg(feature = "defmt")]
        defmt::trace!("Poller stopped, releasing bus connections");

        Some(Released {
            accel: accel.release(),
            mag: mag.release(),
        })
    }
}

/// Periods to skip so that a deadline `behind` ticks in the past lands at or after now
fn missed_periods(behind: u64, period: u64) -> u64 {
    behind.div_ceil(period)
}
