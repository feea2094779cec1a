use crate::reg::{GESTURE_HIGH_BYTE_MASK, GESTURE_VALID_BITS};

bitflags::bitflags! {
  /// Set of gestures the sensor should report, as written to the
  /// interrupt-mode holding register.
  ///
  /// Bits 11..=13 are not implemented by the device and are dropped when the
  /// mask is encoded.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
  pub struct GestureMask: u16 {
    const UP = 1 << 0;
    const DOWN = 1 << 1;
    const LEFT = 1 << 2;
    const RIGHT = 1 << 3;
    const FORWARD = 1 << 4;
    const BACKWARD = 1 << 5;
    const CLOCKWISE = 1 << 6;
    const COUNTERCLOCKWISE = 1 << 7;
    const WAVE = 1 << 8;
    const HOVER = 1 << 9;
    const UNKNOWN = 1 << 10;
    const CLOCKWISE_C = 1 << 14;
    const COUNTERCLOCKWISE_C = 1 << 15;
  }
}

impl GestureMask {
  /// Register payload for this mask, high byte first.
  pub const fn to_register(self) -> [u8; 2] {
    let bits = self.bits() & GESTURE_VALID_BITS;
    [(bits >> 8) as u8 & GESTURE_HIGH_BYTE_MASK, (bits & 0x00FF) as u8]
  }
}

impl From<Gesture> for GestureMask {
  fn from(gesture: Gesture) -> Self {
    Self::from_bits_retain(gesture as u16)
  }
}

/// A single gesture kind recognised by the GR10-30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Gesture {
  Up = 1 << 0,
  Down = 1 << 1,
  Left = 1 << 2,
  Right = 1 << 3,
  Forward = 1 << 4,
  Backward = 1 << 5,
  Clockwise = 1 << 6,
  CounterClockwise = 1 << 7,
  Wave = 1 << 8,
  Hover = 1 << 9,
  Unknown = 1 << 10,
  ClockwiseContinuous = 1 << 14,
  CounterClockwiseContinuous = 1 << 15,
}

impl Gesture {
  /// Every gesture, in ascending bit order.
  pub const ALL: [Gesture; 13] = [
    Gesture::Up,
    Gesture::Down,
    Gesture::Left,
    Gesture::Right,
    Gesture::Forward,
    Gesture::Backward,
    Gesture::Clockwise,
    Gesture::CounterClockwise,
    Gesture::Wave,
    Gesture::Hover,
    Gesture::Unknown,
    Gesture::ClockwiseContinuous,
    Gesture::CounterClockwiseContinuous,
  ];

  /// Raw flag value of this gesture in codes and masks.
  pub const fn bits(self) -> u16 {
    self as u16
  }

  /// Human readable label, as printed by the polling demo.
  pub const fn name(self) -> &'static str {
    match self {
      Gesture::Up => "up",
      Gesture::Down => "down",
      Gesture::Left => "left",
      Gesture::Right => "right",
      Gesture::Forward => "forward",
      Gesture::Backward => "backward",
      Gesture::Clockwise => "clockwise",
      Gesture::CounterClockwise => "counter clockwise",
      Gesture::Wave => "wave",
      Gesture::Hover => "hover",
      Gesture::Unknown => "unknown",
      Gesture::ClockwiseContinuous => "clockwise continues",
      Gesture::CounterClockwiseContinuous => "counter clockwise continues",
    }
  }

  /// Any of the four rotation gestures, single or continuous.
  pub fn is_rotation(&self) -> bool {
    matches!(
      self,
      Gesture::Clockwise
        | Gesture::CounterClockwise
        | Gesture::ClockwiseContinuous
        | Gesture::CounterClockwiseContinuous
    )
  }

  /// Rotation the sensor keeps reporting while the hand keeps circling.
  pub fn is_continuous(&self) -> bool {
    matches!(self, Gesture::ClockwiseContinuous | Gesture::CounterClockwiseContinuous)
  }
}

/// Decodes a gesture code holding exactly one known flag.
impl TryFrom<u16> for Gesture {
  type Error = ();

  fn try_from(code: u16) -> Result<Self, Self::Error> {
    Gesture::ALL.into_iter().find(|g| g.bits() == code).ok_or(())
  }
}
