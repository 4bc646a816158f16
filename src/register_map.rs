use embedded_hal_async::i2c::SevenBitAddress;

/// Accelerometer 7-bit I2C address
pub const ACCEL_ADDRESS: SevenBitAddress = 0x18;

/// Magnetometer 7-bit I2C address
pub const MAG_ADDRESS: SevenBitAddress = 0x1E;

/// Normal power mode, X/Y/Z axes enabled
pub const CTRL_REG1_A_NORMAL: u8 = 0x27;

/// Continuous update, big-endian output
pub const CTRL_REG4_A_BLE: u8 = 0x40;

/// Output data rate 30 Hz
pub const CRA_REG_M_ODR30: u8 = 0x14;

/// Continuous conversion mode
pub const MR_REG_M_CONTINUOUS: u8 = 0x00;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRegister {
    CtrlReg1 = 0x20,
    CtrlReg4 = 0x23,
    OutXL = 0x28,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagRegister {
    CraReg = 0x00,
    MrReg = 0x02,
    OutXH = 0x03,
}

impl AccelRegister {
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

impl MagRegister {
    pub const fn addr(self) -> u8 {
        self as u8
    }
}
