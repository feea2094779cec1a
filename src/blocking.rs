use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::reg::{self, HoldingReg, InputReg, I2C_ADDR};
use crate::{Error, Gesture, GestureMask};

/// Blocking driver for the GR10-30 gesture sensor.
///
/// Owns the I²C bus and a delay provider. Every operation is a single
/// register transaction followed, where the device needs it, by a fixed
/// settle pause on the delay, so the caller is blocked for that long.
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
  /// Create a driver talking to the default address `0x73`.
  pub fn new(i2c: I, delay: D) -> Self {
    Self { i2c, delay, address: I2C_ADDR }
  }

  /// Create a driver on a non-default bus address.
  ///
  /// Fails with [`Error::InvalidAddress`] unless `address` fits in seven bits.
  pub fn with_address(i2c: I, delay: D, address: SevenBitAddress) -> Result<Self, Error<E>> {
    if address > 0x7F {
      return Err(Error::InvalidAddress(address));
    }
    Ok(Self { i2c, delay, address })
  }

  /// Bus address used for every transaction.
  pub fn address(&self) -> SevenBitAddress {
    self.address
  }

  /// Verify the device identity and reset it.
  ///
  /// Returns `Ok(false)` without touching the device when the identity
  /// register does not read back `0x73`. On a match the device is reset and
  /// given 500 ms to boot before `Ok(true)` is returned.
  pub fn begin(&mut self) -> Result<bool, Error<E>> {
    let identity = self.detect_address()?;
    if identity != u16::from(I2C_ADDR) {
      #[cfg(feature = "defmt")]
      defmt::debug!("GR10-30 identity mismatch: {=u16:#x}", identity);
      return Ok(false);
    }

    self.reset()?;
    self.delay.delay_ms(reg::BOOT_DELAY_MS);
    Ok(true)
  }

  /// Read the identity register.
  pub fn detect_address(&mut self) -> Result<u16, Error<E>> {
    self.read_u16(InputReg::Address)
  }

  /// Issue the reset command and wait 100 ms for it to complete.
  pub fn reset(&mut self) -> Result<(), Error<E>> {
    self.write_bytes(HoldingReg::Reset, reg::RESET_PAYLOAD)?;
    self.delay.delay_ms(reg::RESET_DELAY_MS);
    Ok(())
  }

  /// Select which gestures the sensor reports.
  pub fn set_gesture_mask(&mut self, mask: GestureMask) -> Result<(), Error<E>> {
    self.write_bytes(HoldingReg::InterruptMode, mask.to_register())?;
    self.delay.delay_ms(reg::CONFIG_DELAY_MS);
    Ok(())
  }

  /// Whether an object is within detection range.
  pub fn has_object_present(&mut self) -> Result<bool, Error<E>> {
    Ok(self.read_u16(InputReg::ExistState)? != 0)
  }

  /// Whether a gesture code is waiting. Only a value of exactly 1 counts.
  pub fn is_data_ready(&mut self) -> Result<bool, Error<E>> {
    Ok(self.read_u16(InputReg::DataReady)? == 1)
  }

  /// Raw content of the gesture state register.
  pub fn read_gesture_code(&mut self) -> Result<u16, Error<E>> {
    self.read_u16(InputReg::InterruptState)
  }

  /// Gesture state decoded as one exclusive gesture, if it is one.
  pub fn gesture(&mut self) -> Result<Option<Gesture>, Error<E>> {
    let code = self.read_gesture_code()?;
    Ok(Gesture::try_from(code).ok())
  }

  /// Hand back the owned bus and delay.
  pub fn release(self) -> (I, D) {
    (self.i2c, self.delay)
  }

  pub(crate) fn delay_ms(&mut self, ms: u32) {
    self.delay.delay_ms(ms);
  }

  fn read_u16(&mut self, reg: InputReg) -> Result<u16, Error<E>> {
    let mut buf = [0u8; 2];
    self.i2c.write_read(self.address, &[reg.into()], &mut buf).map_err(Error::Read)?;
    Ok(reg::decode_u16(buf))
  }

  fn write_bytes(&mut self, reg: HoldingReg, data: [u8; 2]) -> Result<(), Error<E>> {
    let buf = [reg.into(), data[0], data[1]];
    self.i2c.write(self.address, &buf).map_err(Error::Write)
  }
}
