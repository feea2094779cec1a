/******************************************************************************
 * Refer to the DFRobot GR10-30 wiki for more information, available here:    *
 * - https://wiki.dfrobot.com/SKU_SEN0543_Gesture_Sensor                      *
 * ========================================================================== *
 *                       GR10-30 - Registers & Memory Map                     *
*******************************************************************************/

/// Default 7-bit bus address. The identity register reads back the same value.
pub const I2C_ADDR: u8 = 0x73;

/// Read-only device state.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InputReg {
  Address = 0x02,
  DataReady = 0x06,
  InterruptState = 0x07,
  ExistState = 0x08,
}

/// Host-writable configuration and commands.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HoldingReg {
  InterruptMode = 0x09,
  Reset = 0x18,
}

impl From<InputReg> for u8 {
  #[inline]
  fn from(r: InputReg) -> Self {
    r as u8
  }
}

impl From<HoldingReg> for u8 {
  #[inline]
  fn from(r: HoldingReg) -> Self {
    r as u8
  }
}

pub(crate) const RESET_PAYLOAD: [u8; 2] = [0x55, 0x00];

/// Gesture bits the device actually implements.
pub(crate) const GESTURE_VALID_BITS: u16 = 0xC7FF;
/// Valid bits of the high byte once shifted down.
pub(crate) const GESTURE_HIGH_BYTE_MASK: u8 = 0xC7;

// Settle times in milliseconds
pub(crate) const RESET_DELAY_MS: u32 = 100;
pub(crate) const BOOT_DELAY_MS: u32 = 500;
pub(crate) const CONFIG_DELAY_MS: u32 = 100;

#[inline]
pub(crate) const fn decode_u16(buf: [u8; 2]) -> u16 {
  u16::from_be_bytes(buf)
}
