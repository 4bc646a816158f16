use core::fmt;

use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use crate::bus::{BusProvider, BusSpeed};
use crate::error::{InitError, ReadError};
use crate::raw_data::{decode_axes, encode_write, AxisOffsets, RawData, WriteFrame};
use crate::register_map::{MagRegister, CRA_REG_M_ODR30, MAG_ADDRESS, MR_REG_M_CONTINUOUS};

/// Magnetic field in unscaled sensor counts.
///
/// No gain divisor is applied; values are the raw register contents widened to `f32`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagneticField {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<RawData> for MagneticField {
    fn from(raw: RawData) -> Self {
        Self {
            x: raw.x() as f32,
            y: raw.y() as f32,
            z: raw.z() as f32,
        }
    }
}

impl fmt::Display for MagneticField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X Axis: {:.3}G, Y Axis: {:.3}G, Z Axis: {:.3}G",
            self.x, self.y, self.z
        )
    }
}

/// LSM303DLM magnetic field sensor
pub struct Magnetometer<T> {
    dev: T,
    address: SevenBitAddress,
}

impl<T> Magnetometer<T>
where
    T: I2c,
{
    const INIT_SEQUENCE: [WriteFrame; 2] = [
        encode_write(MagRegister::CraReg.addr(), CRA_REG_M_ODR30),
        encode_write(MagRegister::MrReg.addr(), MR_REG_M_CONTINUOUS),
    ];

    /// Output block starts at `OUT_X_H_M` and is laid out X, Z, Y.
    pub const AXIS_OFFSETS: AxisOffsets = AxisOffsets::XZY;

    /// Acquire a fast-mode connection from `provider` and configure the sensor
    pub async fn initialize<P>(provider: &mut P) -> Result<Self, InitError<P::Error, T::Error>>
    where
        P: BusProvider<Bus = T>,
    {
        let dev = provider
            .acquire(MAG_ADDRESS, BusSpeed::Fast)
            .await
            .map_err(InitError::Acquire)?;

        Self::configure(dev).await.map_err(InitError::Bus)
    }

    /// Configure the sensor on an already acquired bus
    pub async fn configure(dev: T) -> Result<Self, T::Error> {
        let mut mag = Self {
            dev,
            address: MAG_ADDRESS,
        };

        for frame in Self::INIT_SEQUENCE {
            mag.write_frame(frame).await?;
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("LSM303DLM magnetometer initialized");

        Ok(mag)
    }

    async fn write_frame(&mut self, frame: WriteFrame) -> Result<(), T::Error> {
        self.dev.write(self.address, frame.as_bytes()).await
    }

    /// Read raw X/Y/Z counts starting at `OUT_X_H_M`
    pub async fn read_raw(&mut self) -> Result<RawData, ReadError<T::Error>> {
        let mut data = [0; RawData::SIZE];

        self.dev
            .write_read(self.address, &[MagRegister::OutXH.addr()], &mut data)
            .await
            .map_err(ReadError::Bus)?;

        Ok(decode_axes(&data, Self::AXIS_OFFSETS)?)
    }

    pub async fn read(&mut self) -> Result<MagneticField, ReadError<T::Error>> {
        self.read_raw().await.map(MagneticField::from)
    }

    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    /// Give the bus connection back
    pub fn release(self) -> T {
        self.dev
    }
}
