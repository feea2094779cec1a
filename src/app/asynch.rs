//! Async twins of the polling application for [`crate::asynch::Gr1030`].

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use super::{log_error, report, Listener, ARMED, POLL_INTERVAL_MS, RETRY_DELAY_MS};
use crate::asynch::Gr1030;
use crate::Error;

/// See [`super::initialize`].
pub async fn initialize<I, D, L>(sensor: &mut Gr1030<I, D>, listener: &mut L)
where
  I: I2c<SevenBitAddress>,
  D: DelayNs,
  L: Listener + ?Sized,
{
  let mut attempt = 0u32;
  loop {
    match sensor.begin().await {
      Ok(true) => match sensor.set_gesture_mask(ARMED).await {
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
    sensor.delay_ms(RETRY_DELAY_MS).await;
  }
}

/// See [`super::poll_once`].
pub async fn poll_once<I, D>(sensor: &mut Gr1030<I, D>) -> Result<u16, Error<I::Error>>
where
  I: I2c<SevenBitAddress>,
  D: DelayNs,
{
  if !sensor.is_data_ready().await? {
    return Ok(0);
  }
  sensor.read_gesture_code().await
}

/// See [`super::run`].
pub async fn run<I, D, L>(sensor: &mut Gr1030<I, D>, listener: &mut L) -> !
where
  I: I2c<SevenBitAddress>,
  D: DelayNs,
  L: Listener + ?Sized,
{
  initialize(sensor, listener).await;

  loop {
    let code = match poll_once(sensor).await {
      Ok(code) => code,
      Err(e) => {
        log_error("poll", &e);
        0
      }
    };
    report(code, listener);
    sensor.delay_ms(POLL_INTERVAL_MS).await;
  }
}
