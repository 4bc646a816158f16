use crate::error::MalformedBuffer;

/// Unscaled three-axis sample as assembled from the output registers
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawData {
    pub(crate) x: i16,
    pub(crate) y: i16,
    pub(crate) z: i16,
}

impl RawData {
    pub const SIZE: usize = 6;

    pub fn x(&self) -> i16 {
        self.x
    }

    pub fn y(&self) -> i16 {
        self.y
    }

    pub fn z(&self) -> i16 {
        self.z
    }

    pub fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }
}

/// Register write sent as a single bus transaction: target register, then value
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WriteFrame([u8; 2]);

impl WriteFrame {
    pub const fn new(register: u8, value: u8) -> Self {
        Self([register, value])
    }

    pub fn register(&self) -> u8 {
        self.0[0]
    }

    pub fn value(&self) -> u8 {
        self.0[1]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

pub const fn encode_write(register: u8, value: u8) -> WriteFrame {
    WriteFrame::new(register, value)
}

/// Byte offset of each axis inside the 6-byte output block.
///
/// Each offset points at the low byte of a little-endian `i16`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisOffsets {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl AxisOffsets {
    /// X, Y, Z in register order
    pub const XYZ: Self = Self { x: 0, y: 2, z: 4 };

    /// Block laid out as X, Z, Y (magnetometer output register order)
    pub const XZY: Self = Self { x: 0, y: 4, z: 2 };
}

/// Decode a 6-byte output block into a [`RawData`].
pub fn decode_axes(buffer: &[u8], offsets: AxisOffsets) -> Result<RawData, MalformedBuffer> {
    if buffer.len() != RawData::SIZE {
        return Err(MalformedBuffer { len: buffer.len() });
    }

    let axis = |offset: usize| -> Result<i16, MalformedBuffer> {
        match buffer.get(offset..offset + 2) {
            Some(&[low, high]) => Ok(i16::from_le_bytes([low, high])),
            _ => Err(MalformedBuffer { len: buffer.len() }),
        }
    };

    Ok(RawData {
        x: axis(offsets.x)?,
        y: axis(offsets.y)?,
        z: axis(offsets.z)?,
    })
}
