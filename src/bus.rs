use embedded_hal_async::i2c::{I2c, SevenBitAddress};

/// I2C bus speed class
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusSpeed {
    /// 100 kHz
    Standard,
    /// 400 kHz
    Fast,
}

/// Source of bus connections, e.g. a shared-bus manager or a platform I2C controller.
///
/// `acquire` may suspend until the underlying controller is available.
#[allow(async_fn_in_trait)]
pub trait BusProvider {
    type Bus: I2c;
    type Error: core::fmt::Debug;

    async fn acquire(
        &mut self,
        address: SevenBitAddress,
        speed: BusSpeed,
    ) -> Result<Self::Bus, Self::Error>;
}
