//! Tilt + gyro control filter.
//!
//! Per tick:
//! 1. Remove calibration bias from accel X/Y and gyro X
//! 2. Tilt angle = `atan2(ax, ay)` in degrees, dead-zoned at 5 degrees
//! 3. Gyro X dead-zoned at 3 degrees per second
//! 4. Blend tilt and gyro, smooth, scale, smooth again
//! 5. Clamp to `[-MAX_VELOCITY, MAX_VELOCITY]`
//!
//! Games tune their feel against the exact numbers this produces, so the
//! operation order below must not change.

use super::calibration::Calibration;
use super::sensor::MotionSensor;
use crate::config::motion::{
    ACCEL_LSB_PER_G, GYRO_DEAD_ZONE_DPS, GYRO_GAIN, MAX_VELOCITY, MOVEMENT_BLEND, MOVEMENT_RETAIN,
    TILT_DEAD_ZONE_DEG, TILT_GAIN, VELOCITY_BLEND, VELOCITY_RETAIN, VELOCITY_SCALE,
};
use crate::error::Error;

/// Filter state retained between ticks. Owned by the game session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionFilter {
    filtered_movement: f32,
    velocity: f32,
}

impl MotionFilter {
    pub const fn new() -> Self {
        Self {
            filtered_movement: 0.0,
            velocity: 0.0,
        }
    }

    /// Zero both stages. Called when a session starts.
    pub fn reset(&mut self) { *self = Self::new(); }

    /// Velocity produced by the last successful update.
    #[inline]
    pub const fn velocity(&self) -> f32 { self.velocity }

    /// First-stage smoothed tilt + gyro signal.
    #[inline]
    pub const fn filtered_movement(&self) -> f32 { self.filtered_movement }

    /// Feed one raw sample through the filter and return the clamped velocity.
    pub fn update(
        &mut self,
        raw_accel_x: i16,
        raw_accel_y: i16,
        raw_gyro_x: i16,
        calibration: &Calibration,
    ) -> f32 {
        let accel_x = f32::from(raw_accel_x) / ACCEL_LSB_PER_G - calibration.accel[0];
        let accel_y = f32::from(raw_accel_y) / ACCEL_LSB_PER_G - calibration.accel[1];

        let mut tilt_angle =
            (libm::atan2(f64::from(accel_x), f64::from(accel_y)) * 180.0 / core::f64::consts::PI) as f32;
        if tilt_angle.abs() < TILT_DEAD_ZONE_DEG {
            tilt_angle = 0.0;
        }

        let mut gyro_x = calibration.gyro_x_dps(raw_gyro_x);
        if gyro_x.abs() < GYRO_DEAD_ZONE_DPS {
            gyro_x = 0.0;
        }

        let total_movement = tilt_angle * TILT_GAIN + gyro_x * GYRO_GAIN;
        self.filtered_movement = self.filtered_movement * MOVEMENT_RETAIN + total_movement * MOVEMENT_BLEND;

        let target_velocity = self.filtered_movement * VELOCITY_SCALE;
        self.velocity = self.velocity * VELOCITY_RETAIN + target_velocity * VELOCITY_BLEND;
        self.velocity = self.velocity.clamp(-MAX_VELOCITY, MAX_VELOCITY);

        self.velocity
    }

    /// Read the sensor and update. A failed read leaves the state untouched.
    pub fn poll<S: MotionSensor + ?Sized>(
        &mut self,
        sensor: &mut S,
        calibration: &Calibration,
    ) -> Result<f32, Error> {
        let sample = sensor.read()?;
        Ok(self.update(sample.accel[0], sample.accel[1], sample.gyro[0], calibration))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
