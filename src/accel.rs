use core::fmt;

use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use crate::bus::{BusProvider, BusSpeed};
use crate::error::{InitError, ReadError};
use crate::raw_data::{decode_axes, encode_write, AxisOffsets, RawData, WriteFrame};
use crate::register_map::{AccelRegister, ACCEL_ADDRESS, CTRL_REG1_A_NORMAL, CTRL_REG4_A_BLE};

/// Distinct output values of the 12-bit converter
pub const ACCEL_RESOLUTION: i32 = 4096;

/// Total span in G covered by [`ACCEL_RESOLUTION`]
pub const ACCEL_DYNAMIC_RANGE_G: i32 = 8;

/// Raw counts per G
pub const ACCEL_UNITS_PER_G: i32 = ACCEL_RESOLUTION / ACCEL_DYNAMIC_RANGE_G;

/// Acceleration in G
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Acceleration {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<RawData> for Acceleration {
    fn from(raw: RawData) -> Self {
        let units_per_g = ACCEL_UNITS_PER_G as f32;

        Self {
            x: raw.x() as f32 / units_per_g,
            y: raw.y() as f32 / units_per_g,
            z: raw.z() as f32 / units_per_g,
        }
    }
}

impl fmt::Display for Acceleration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X Axis: {:.3}G, Y Axis: {:.3}G, Z Axis: {:.3}G",
            self.x, self.y, self.z
        )
    }
}

/// LSM303DLM linear acceleration sensor.
///
/// Only obtainable through [`Accelerometer::initialize`] or
/// [`Accelerometer::configure`], so a value of this type has always had its
/// configuration written.
pub struct Accelerometer<T> {
    dev: T,
    address: SevenBitAddress,
}

impl<T> Accelerometer<T>
where
    T: I2c,
{
    const INIT_SEQUENCE: [WriteFrame; 2] = [
        encode_write(AccelRegister::CtrlReg1.addr(), CTRL_REG1_A_NORMAL),
        encode_write(AccelRegister::CtrlReg4.addr(), CTRL_REG4_A_BLE),
    ];

    /// Acquire a fast-mode connection from `provider` and configure the sensor
    pub async fn initialize<P>(provider: &mut P) -> Result<Self, InitError<P::Error, T::Error>>
    where
        P: BusProvider<Bus = T>,
    {
        let dev = provider
            .acquire(ACCEL_ADDRESS, BusSpeed::Fast)
            .await
            .map_err(InitError::Acquire)?;

        Self::configure(dev).await.map_err(InitError::Bus)
    }

    /// Configure the sensor on an already acquired bus
    pub async fn configure(dev: T) -> Result<Self, T::Error> {
        let mut accel = Self {
            dev,
            address: ACCEL_ADDRESS,
        };

        for frame in Self::INIT_SEQUENCE {
            accel.write_frame(frame).await?;
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("LSM303DLM accelerometer initialized");

        Ok(accel)
    }

    async fn write_frame(&mut self, frame: WriteFrame) -> Result<(), T::Error> {
        self.dev.write(self.address, frame.as_bytes()).await
    }

    /// Read raw X/Y/Z counts starting at `OUT_X_L_A`
    pub async fn read_raw(&mut self) -> Result<RawData, ReadError<T::Error>> {
        let mut data = [0; RawData::SIZE];

        self.dev
            .write_read(self.address, &[AccelRegister::OutXL.addr()], &mut data)
            .await
            .map_err(ReadError::Bus)?;

        Ok(decode_axes(&data, AxisOffsets::XYZ)?)
    }

    /// Read one sample converted to G
    pub async fn read(&mut self) -> Result<Acceleration, ReadError<T::Error>> {
        self.read_raw().await.map(Acceleration::from)
    }

    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    /// Give the bus connection back
    pub fn release(self) -> T {
        self.dev
    }
}
