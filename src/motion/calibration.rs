//! Sensor bias calibration.
//!
//! The device must lie still while [`calibrate`] averages a window of samples.
//! The mean reading per axis becomes the bias that the filter subtracts.

use embedded_hal::delay::DelayNs;

use super::sensor::{MotionSensor, RawSample};
use crate::config::motion::{ACCEL_LSB_PER_G, CALIBRATION_INTERVAL_MS, CALIBRATION_SAMPLES, GYRO_LSB_PER_DPS};
use crate::error::Error;

/// Per-axis bias offsets, in g (accelerometer) and degrees per second (gyroscope).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pub accel: [f32; 3],
    pub gyro: [f32; 3],
    pub calibrated: bool,
}

impl Calibration {
    /// Zero offsets, not yet calibrated.
    pub const fn uncalibrated() -> Self {
        Self {
            accel: [0.0; 3],
            gyro: [0.0; 3],
            calibrated: false,
        }
    }

    /// Bias-corrected X and Y acceleration in g.
    pub fn accel_g(
        &self,
        sample: &RawSample,
    ) -> (f32, f32) {
        (
            f32::from(sample.accel[0]) / ACCEL_LSB_PER_G - self.accel[0],
            f32::from(sample.accel[1]) / ACCEL_LSB_PER_G - self.accel[1],
        )
    }

    /// Bias-corrected X angular rate in degrees per second.
    pub fn gyro_x_dps(
        &self,
        raw_gyro_x: i16,
    ) -> f32 {
        f32::from(raw_gyro_x) / GYRO_LSB_PER_DPS - self.gyro[0]
    }
}

impl Default for Calibration {
    fn default() -> Self { Self::uncalibrated() }
}

/// Averaging window for [`calibrate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationConfig {
    /// Number of read attempts.
    pub samples: u16,
    /// Pause after every attempt (milliseconds).
    pub interval_ms: u32,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            samples: CALIBRATION_SAMPLES,
            interval_ms: CALIBRATION_INTERVAL_MS,
        }
    }
}

/// Average `config.samples` readings into a [`Calibration`].
///
/// Blocks for `samples * interval_ms`. Failed reads are skipped and the mean
/// is taken over the readings that succeeded; only a window with no
/// successful read fails, with [`Error::SensorRead`].
pub fn calibrate<S, D>(
    sensor: &mut S,
    delay: &mut D,
    config: &CalibrationConfig,
) -> Result<Calibration, Error>
where
    S: MotionSensor + ?Sized,
    D: DelayNs + ?Sized,
{
    if config.samples == 0 {
        return Err(Error::InvalidArgument("calibration needs at least one sample"));
    }

    // Sum raw counts so a constant input averages back to itself exactly
    let mut accel_sum = [0i64; 3];
    let mut gyro_sum = [0i64; 3];
    let mut count: u32 = 0;

    for _ in 0..config.samples {
        if let Ok(sample) = sensor.read() {
            for axis in 0..3 {
                accel_sum[axis] += i64::from(sample.accel[axis]);
                gyro_sum[axis] += i64::from(sample.gyro[axis]);
            }
            count += 1;
        }
        delay.delay_ms(config.interval_ms);
    }

    if count == 0 {
        #[cfg(feature = "defmt")]
        defmt::error!("Calibration failed: no sensor reads in {} attempts", config.samples);
        return Err(Error::SensorRead);
    }

    #[cfg(feature = "defmt")]
    if count < u32::from(config.samples) {
        defmt::warn!("Calibration averaged {}/{} samples", count, config.samples);
    }

    let mean = |sum: i64, lsb: f32| (sum as f64 / f64::from(count)) as f32 / lsb;

    Ok(Calibration {
        accel: accel_sum.map(|sum| mean(sum, ACCEL_LSB_PER_G)),
        gyro: gyro_sum.map(|sum| mean(sum, GYRO_LSB_PER_DPS)),
        calibrated: true,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
