//! Keyboard-driven stand-in for the MPU6050.
//!
//! Held keys tilt the virtual device by half a g: A/D on X (left/right),
//! W/S on Y (up/down). At rest it reads 1 g on Z and nothing else, so calibration
//! yields a clean bias and released keys give zero tilt.

use tiltbox::{Error, MotionSensor};

/// Counts for the held-key tilt (0.5 g).
const TILT_COUNTS: i16 = 8192;
/// Counts for 1 g.
const ONE_G: i16 = 16384;

#[derive(Debug, Default)]
pub struct KeyboardTilt {
    x: i16,
    y: i16,
    failing: bool,
}

impl KeyboardTilt {
    /// Set the held direction on X: negative, zero or positive.
    pub fn set_x(
        &mut self,
        direction: i16,
    ) {
        self.x = direction.signum() * TILT_COUNTS;
    }

    pub fn set_y(
        &mut self,
        direction: i16,
    ) {
        self.y = direction.signum() * TILT_COUNTS;
    }

    /// Toggle injected read failures. Returns the new state.
    pub fn toggle_failures(&mut self) -> bool {
        self.failing = !self.failing;
        self.failing
    }
}

impl MotionSensor for KeyboardTilt {
    fn read_accel(&mut self) -> Result<[i16; 3], Error> {
        if self.failing {
            return Err(Error::SensorRead);
        }
        Ok([self.x, self.y, ONE_G])
    }

    fn read_gyro(&mut self) -> Result<[i16; 3], Error> {
        if self.failing {
            return Err(Error::SensorRead);
        }
        Ok([0; 3])
    }
}

#[cfg(test)]
mod tests {
    use tiltbox::{Calibration, MotionFilter};

    use super::*;

    #[test]
    fn test_rest_reads_one_g_on_z() {
        let mut tilt = KeyboardTilt::default();
        let sample = tilt.read().unwrap();
        assert_eq!(sample.accel, [0, 0, ONE_G]);
        assert_eq!(sample.gyro, [0; 3]);
    }

    #[test]
    fn test_held_key_steers_filter() {
        let mut tilt = KeyboardTilt::default();
        let cal = Calibration::uncalibrated();

        tilt.set_x(1);
        let mut filter = MotionFilter::new();
        assert!(filter.poll(&mut tilt, &cal).unwrap() > 0.0);

        tilt.set_x(-5);
        let mut filter = MotionFilter::new();
        assert!(filter.poll(&mut tilt, &cal).unwrap() < 0.0);
    }

    #[test]
    fn test_toggle_failures() {
        let mut tilt = KeyboardTilt::default();
        assert!(tilt.toggle_failures());
        assert_eq!(tilt.read(), Err(Error::SensorRead));
        assert!(!tilt.toggle_failures());
        assert!(tilt.read().is_ok());
    }
}
