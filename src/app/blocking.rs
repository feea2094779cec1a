use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, SevenBitAddress};

use super::{log_error, report, Listener, ARMED, POLL_INTERVAL_MS, RETRY_DELAY_MS};
use crate::{Error, Gr1030};

/// Block until the sensor is up and [`ARMED`] is enabled.
///
/// Retries every second, forever, until `begin` succeeds and the gesture mask
/// is written. A sensor that powers up after the host simply costs more
/// attempts.
pub fn initialize<I, D, L>(sensor: &mut Gr1030<I, D>, listener: &mut L)
where
  I: I2c<SevenBitAddress>,
  D: DelayNs,
  L: Listener + ?Sized,
{
  let mut attempt = 0u32;
  loop {
    match sensor.begin() {
      Ok(true) => match sensor.set_gesture_mask(ARMED) {
        Ok(()) => {
          #[cfg(feature = "defmt")]
          defmt::info!("GR10-30 initialized after {=u32} retries", attempt);
          listener.initialized();
          return;
        }
        Err(e) => log_error("gesture mask", &e),
      },
      Ok(false) => {}
      Err(e) => log_error("begin", &e),
    }

    attempt = attempt.saturating_add(1);
    listener.retrying(attempt);
    sensor.delay_ms(RETRY_DELAY_MS);
  }
}

/// Fetch the pending gesture code, or 0 when the sensor has nothing ready.
pub fn poll_once<I, D>(sensor: &mut Gr1030<I, D>) -> Result<u16, Error<I::Error>>
where
  I: I2c<SevenBitAddress>,
  D: DelayNs,
{
  if !sensor.is_data_ready()? {
    return Ok(0);
  }
  sensor.read_gesture_code()
}

/// Initialize, then poll every 100 ms and report gestures forever.
///
/// A failed poll is logged and counts as a cycle without gesture.
pub fn run<I, D, L>(sensor: &mut Gr1030<I, D>, listener: &mut L) -> !
where
  I: I2c<SevenBitAddress>,
  D: DelayNs,
  L: Listener + ?Sized,
{
  initialize(sensor, listener);

  loop {
    let code = poll_once(sensor).unwrap_or_else(|e| {
      log_error("poll", &e);
      0
    });
    report(code, listener);
    sensor.delay_ms(POLL_INTERVAL_MS);
  }
}
