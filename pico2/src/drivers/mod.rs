//! Peripheral drivers for the handheld.
//!
//! - `ssd1306`: 128x64 OLED over I2C, implements `DisplayTransport`
//! - `mpu6050`: Accelerometer/gyroscope over I2C, implements `MotionSensor`
//!
//! Both share one I2C bus and are written against `embedded_hal::i2c::I2c`,
//! so they run on the embassy bus in firmware and on a fake bus in tests.

#[cfg(test)]
mod fake_bus;
mod mpu6050;
mod ssd1306;

pub use mpu6050::Mpu6050;
pub use ssd1306::Ssd1306;
