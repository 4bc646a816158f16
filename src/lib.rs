//! Async driver for the ST LSM303DLM accelerometer/magnetometer pair, plus a
//! fixed-cadence poller that samples both sensors and hands out snapshots.
#![no_std]

pub mod accel;
pub mod bus;
pub mod error;
pub mod mag;
pub mod poller;
pub mod raw_data;
pub mod register_map;
pub mod snapshot;

pub use accel::{Acceleration, Accelerometer};
pub use bus::{BusProvider, BusSpeed};
pub use error::{InitError, MalformedBuffer, ReadError, SchedulerError};
pub use mag::{MagneticField, Magnetometer};
pub use poller::{Poller, PollerState, Released, DEFAULT_POLL_PERIOD};
pub use raw_data::{decode_axes, encode_write, AxisOffsets, RawData, WriteFrame};
pub use snapshot::{ChannelSink, SensorSnapshot, SnapshotSink, Status};
