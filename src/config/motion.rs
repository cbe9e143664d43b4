//! Motion sensor scales and tilt filter tuning.
//!
//! Games are tuned against these exact values; changing any gain changes the
//! feel of every tilt-controlled game.

// =============================================================================
// MPU6050 Scales (default full-scale ranges: ±2 g, ±250 °/s)
// =============================================================================

/// Accelerometer counts per g.
pub const ACCEL_LSB_PER_G: f32 = 16384.0;

/// Gyroscope counts per degree per second.
pub const GYRO_LSB_PER_DPS: f32 = 131.0;

// =============================================================================
// Filter Tuning
// =============================================================================

/// Tilt angles below this magnitude (degrees) are treated as level.
pub const TILT_DEAD_ZONE_DEG: f32 = 5.0;

/// Rotation rates below this magnitude (°/s) are treated as still.
pub const GYRO_DEAD_ZONE_DPS: f32 = 3.0;

/// Weight of the tilt angle in the combined movement signal.
pub const TILT_GAIN: f32 = 0.8;

/// Weight of the X rotation rate in the combined movement signal.
pub const GYRO_GAIN: f32 = 0.4;

/// First smoothing stage: share of the previous filtered movement kept.
pub const MOVEMENT_RETAIN: f32 = 0.6;

/// First smoothing stage: share of the new movement blended in.
pub const MOVEMENT_BLEND: f32 = 0.4;

/// Filtered movement to target velocity scale.
pub const VELOCITY_SCALE: f32 = 0.15;

/// Second smoothing stage: share of the previous velocity kept.
pub const VELOCITY_RETAIN: f32 = 0.8;

/// Second smoothing stage: share of the target velocity blended in.
pub const VELOCITY_BLEND: f32 = 0.2;

/// Velocity is clamped to `[-MAX_VELOCITY, MAX_VELOCITY]` pixels per tick.
pub const MAX_VELOCITY: f32 = 8.0;

// =============================================================================
// Calibration
// =============================================================================

/// Samples averaged by a default calibration run.
pub const CALIBRATION_SAMPLES: u16 = 200;

/// Delay after each calibration sample in milliseconds.
pub const CALIBRATION_INTERVAL_MS: u32 = 10;

/// Consecutive failed reads before a session reports a sensor fault.
/// At the slowest game period (150 ms) this is roughly three seconds.
pub const MAX_CONSECUTIVE_SENSOR_FAILURES: u8 = 20;

#[cfg(test)]
#[allow(clippy::assertions_on_constants)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothing_weights_sum_to_one() {
        assert!((MOVEMENT_RETAIN + MOVEMENT_BLEND - 1.0).abs() < 1e-6);
        assert!((VELOCITY_RETAIN + VELOCITY_BLEND - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_calibration_window_is_two_seconds() {
        assert_eq!(u32::from(CALIBRATION_SAMPLES) * CALIBRATION_INTERVAL_MS, 2000);
    }
}
