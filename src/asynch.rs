//! Async flavour of the driver on top of `embedded-hal-async`.
//!
//! Operations, register traffic and settle times are identical to the
//! blocking [`crate::Gr1030`]; pauses are awaited instead of spun.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use crate::reg::{self, HoldingReg, InputReg, I2C_ADDR};
use crate::{Error, Gesture, GestureMask};

/// Async driver for the GR10-30 gesture sensor.
pub struct Gr1030<I, D> {
  i2c: I,
  delay: D,
  address: SevenBitAddress,
}

impl<I, E, D> Gr1030<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  pub fn new(i2c: I, delay: D) -> Self {
    Self { i2c, delay, address: I2C_ADDR }
  }

  /// See [`crate::Gr1030::with_address`].
  pub fn with_address(i2c: I, delay: D, address: SevenBitAddress) -> Result<Self, Error<E>> {
    if address > 0x7F {
      return Err(Error::InvalidAddress(address));
    }
    Ok(Self { i2c, delay, address })
  }

  pub fn address(&self) -> SevenBitAddress {
    self.address
  }

  /// See [`crate::Gr1030::begin`].
  pub async fn begin(&mut self) -> Result<bool, Error<E>> {
    let identity = self.detect_address().await?;
    if identity != u16::from(I2C_ADDR) {
      #[cfg(feature = "defmt")]
      defmt::debug!("GR10-30 identity mismatch: {=u16:#x}", identity);
      return Ok(false);
    }

    self.reset().await?;
    self.delay.delay_ms(reg::BOOT_DELAY_MS).await;
    Ok(true)
  }

  pub async fn detect_address(&mut self) -> Result<u16, Error<E>> {
    self.read_u16(InputReg::Address).await
  }

  pub async fn reset(&mut self) -> Result<(), Error<E>> {
    self.write_bytes(HoldingReg::Reset, reg::RESET_PAYLOAD).await?;
    self.delay.delay_ms(reg::RESET_DELAY_MS).await;
    Ok(())
  }

  pub async fn set_gesture_mask(&mut self, mask: GestureMask) -> Result<(), Error<E>> {
    self.write_bytes(HoldingReg::InterruptMode, mask.to_register()).await?;
    self.delay.delay_ms(reg::CONFIG_DELAY_MS).await;
    Ok(())
  }

  pub async fn has_object_present(&mut self) -> Result<bool, Error<E>> {
    Ok(self.read_u16(InputReg::ExistState).await? != 0)
  }

  pub async fn is_data_ready(&mut self) -> Result<bool, Error<E>> {
    Ok(self.read_u16(InputReg::DataReady).await? == 1)
  }

  pub async fn read_gesture_code(&mut self) -> Result<u16, Error<E>> {
    self.read_u16(InputReg::InterruptState).await
  }

  pub async fn gesture(&mut self) -> Result<Option<Gesture>, Error<E>> {
    let code = self.read_gesture_code().await?;
    Ok(Gesture::try_from(code).ok())
  }

  pub fn release(self) -> (I, D) {
    (self.i2c, self.delay)
  }

  pub(crate) async fn delay_ms(&mut self, ms: u32) {
    self.delay.delay_ms(ms).await;
  }

  async fn read_u16(&mut self, reg: InputReg) -> Result<u16, Error<E>> {
    let mut buf = [0u8; 2];
    self.i2c.write_read(self.address, &[reg.into()], &mut buf).await.map_err(Error::Read)?;
    Ok(reg::decode_u16(buf))
  }

  async fn write_bytes(&mut self, reg: HoldingReg, data: [u8; 2]) -> Result<(), Error<E>> {
    let buf = [reg.into(), data[0], data[1]];
    self.i2c.write(self.address, &buf).await.map_err(Error::Write)
  }
}
