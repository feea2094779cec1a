#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `no_std` driver for the DFRobot GR10-30 gesture recognition sensor, plus
//! the polling application that turns its gesture codes into reports.
//!
//! The GR10-30 sits on I²C at `0x73` and exposes a small register map of
//! 16-bit big-endian values: read-only input registers for identity, data
//! ready, gesture state and object presence, and writable holding registers
//! for the gesture mask and the reset command. This crate offers:
//!
//! - A blocking driver ([`Gr1030`]) on `embedded-hal` 1.0 and an async twin
//!   ([`asynch::Gr1030`]) on `embedded-hal-async` 1.0
//! - A typed [`GestureMask`] that is trimmed to the bits the device implements
//! - The bring-up, polling and classification loop in [`app`], with a
//!   [`app::Listener`] seam for whatever does the reporting
//!
//! ```no_run
//! use embedded_hal::{delay::DelayNs, i2c::{I2c, SevenBitAddress}};
//! use gr1030::{app, Gesture, Gr1030};
//!
//! fn example<I2C, D>(i2c: I2C, delay: D) -> !
//! where
//!   I2C: I2c<SevenBitAddress>,
//!   D: DelayNs,
//! {
//!   let mut sensor = Gr1030::new(i2c, delay);
//!   let mut on_gesture = |gesture: Gesture, code: u16| {
//!     let _ = (gesture, code);
//!   };
//!   app::run(&mut sensor, &mut on_gesture)
//! }
//! ```
pub mod app;
pub mod asynch;
mod blocking;
mod gesture;
mod reg;
#[cfg(test)]
mod testing;

use embedded_hal::i2c::ErrorKind;

pub use blocking::Gr1030;
pub use gesture::{Gesture, GestureMask};
pub use reg::I2C_ADDR;

/// Errors that can occur while interacting with the sensor.
///
/// An identity mismatch during [`Gr1030::begin`] is not an error; it is
/// reported as `Ok(false)` so the caller can retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
  /// The driver was asked to use an address that does not fit in seven bits.
  InvalidAddress(u8),
  /// A register write failed with the underlying bus error.
  Write(E),
  /// A register read failed with the underlying bus error.
  Read(E),
}

impl<E: embedded_hal::i2c::Error> Error<E> {
  /// Bus-level cause of a failed transaction.
  pub fn kind(&self) -> Option<ErrorKind> {
    match self {
      Error::Write(e) | Error::Read(e) => Some(e.kind()),
      Error::InvalidAddress(_) => None,
    }
  }
}
