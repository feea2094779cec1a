//! Polling demo: bring the sensor up and print every recognised gesture.
#![allow(unused)]
use embedded_hal::{
  delay::DelayNs,
  i2c::{I2c, SevenBitAddress},
};
use gr1030::{app, Gesture, Gr1030};

/// Bus pins the sensor is wired to; hand them to your HAL's I²C constructor.
const SDA_PIN: u8 = 21;
const SCL_PIN: u8 = 22;

struct Console;

impl app::Listener for Console {
  fn retrying(&mut self, _attempt: u32) {
    println!("Try sensor initialization");
  }

  fn initialized(&mut self) {
    println!("Sensor initialized");
    println!("Start hand gestures:");
  }

  fn gesture(&mut self, gesture: Gesture, code: u16) {
    println!("Gesture: {} {}", code, gesture.name());
  }
}

#[allow(dead_code)]
async fn main_async<I2C, D>(i2c: I2C, delay: D) -> !
where
  I2C: embedded_hal_async::i2c::I2c<SevenBitAddress>,
  D: embedded_hal_async::delay::DelayNs,
{
  let mut sensor = gr1030::asynch::Gr1030::new(i2c, delay);
  app::asynch::run(&mut sensor, &mut Console).await
}

#[allow(dead_code)]
fn main_blocking<I2C, D>(i2c: I2C, delay: D) -> !
where
  I2C: I2c<SevenBitAddress>,
  D: DelayNs,
{
  let mut sensor = Gr1030::new(i2c, delay);
  app::run(&mut sensor, &mut Console)
}

fn main() {}
