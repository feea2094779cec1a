//! Polling application built on the driver.
//!
//! Brings the sensor up with an unbounded retry, arms [`ARMED`], then polls
//! forever and turns gesture codes into [`Listener::gesture`] calls. Nothing
//! here is fatal: bus errors are logged and the loop carries on.

use crate::{Error, Gesture, GestureMask};

pub mod asynch;
mod blocking;

pub use blocking::*;

/// Gestures enabled by [`initialize`].
pub const ARMED: GestureMask = GestureMask::UP
  .union(GestureMask::DOWN)
  .union(GestureMask::LEFT)
  .union(GestureMask::RIGHT)
  .union(GestureMask::FORWARD)
  .union(GestureMask::BACKWARD)
  .union(GestureMask::CLOCKWISE_C)
  .union(GestureMask::COUNTERCLOCKWISE_C);

pub(crate) const RETRY_DELAY_MS: u32 = 1000;
pub(crate) const POLL_INTERVAL_MS: u32 = 100;

/// Receives what the application loop has to say.
pub trait Listener {
  /// A bring-up attempt failed; the next one follows after a one second pause.
  fn retrying(&mut self, _attempt: u32) {}

  /// The sensor answered, was reset and has [`ARMED`] enabled.
  fn initialized(&mut self) {}

  /// One classified gesture from the raw `code`.
  fn gesture(&mut self, gesture: Gesture, code: u16);
}

impl<F: FnMut(Gesture, u16)> Listener for F {
  fn gesture(&mut self, gesture: Gesture, code: u16) {
    self(gesture, code)
  }
}

/// How a code is tested against a gesture flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Match {
  /// The code must equal the flag.
  Exact,
  /// The code must share at least one bit with the flag.
  Intersects,
}

impl Match {
  pub const fn test(self, code: u16, gesture: Gesture) -> bool {
    match self {
      Match::Exact => code == gesture.bits(),
      Match::Intersects => code & gesture.bits() != 0,
    }
  }
}

/// Armed gestures in report order, with the test applied to each.
///
/// Down and left are tested by intersection while everything else needs an
/// exact code. It is not known whether the gesture register is a bitmask or
/// an exclusive status code, so both tests are kept as the device's reference
/// application applies them.
pub const CLASSIFICATION: [(Gesture, Match); 8] = [
  (Gesture::Up, Match::Exact),
  (Gesture::Down, Match::Intersects),
  (Gesture::Left, Match::Intersects),
  (Gesture::Right, Match::Exact),
  (Gesture::Forward, Match::Exact),
  (Gesture::Backward, Match::Exact),
  (Gesture::ClockwiseContinuous, Match::Exact),
  (Gesture::CounterClockwiseContinuous, Match::Exact),
];

/// Gestures reported for a polled `code`, in [`CLASSIFICATION`] order.
pub fn classify(code: u16) -> Reports {
  Reports { code, next: 0 }
}

/// Iterator returned by [`classify`].
#[derive(Debug, Clone)]
pub struct Reports {
  code: u16,
  next: usize,
}

impl Iterator for Reports {
  type Item = Gesture;

  fn next(&mut self) -> Option<Gesture> {
    while let Some(&(gesture, test)) = CLASSIFICATION.get(self.next) {
      self.next += 1;
      if test.test(self.code, gesture) {
        return Some(gesture);
      }
    }
    None
  }
}

fn report<L: Listener + ?Sized>(code: u16, listener: &mut L) {
  for gesture in classify(code) {
    #[cfg(feature = "defmt")]
    defmt::trace!("gesture {} from code {=u16:#x}", gesture, code);
    listener.gesture(gesture, code);
  }
}

fn log_error<E: embedded_hal::i2c::Error>(context: &str, error: &Error<E>) {
  #[cfg(feature = "defmt")]
  defmt::warn!("{=str} failed: {}", context, error.kind());
  #[cfg(not(feature = "defmt"))]
  let _ = (context, error);
}
