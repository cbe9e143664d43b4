//! Sensor source contract.

use crate::config::motion::{ACCEL_LSB_PER_G, GYRO_LSB_PER_DPS};
use crate::error::Error;

/// One accelerometer + gyroscope reading in raw 16-bit counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    pub accel: [i16; 3],
    pub gyro: [i16; 3],
}

impl RawSample {
    /// Acceleration per axis in g.
    pub fn accel_g(&self) -> [f32; 3] { self.accel.map(|raw| f32::from(raw) / ACCEL_LSB_PER_G) }

    /// Angular rate per axis in degrees per second.
    pub fn gyro_dps(&self) -> [f32; 3] { self.gyro.map(|raw| f32::from(raw) / GYRO_LSB_PER_DPS) }
}

/// Inertial sensor (MPU6050 on the device, keyboard in the simulator).
///
/// Both reads are bus transactions and may fail with [`Error::SensorRead`].
pub trait MotionSensor {
    /// Raw accelerometer X, Y, Z.
    fn read_accel(&mut self) -> Result<[i16; 3], Error>;

    /// Raw gyroscope X, Y, Z.
    fn read_gyro(&mut self) -> Result<[i16; 3], Error>;

    /// Read gyroscope then accelerometer. Fails if either read fails.
    fn read(&mut self) -> Result<RawSample, Error> {
        let gyro = self.read_gyro()?;
        let accel = self.read_accel()?;
        Ok(RawSample { accel, gyro })
    }
}

impl<T: MotionSensor + ?Sized> MotionSensor for &mut T {
    fn read_accel(&mut self) -> Result<[i16; 3], Error> { (**self).read_accel() }

    fn read_gyro(&mut self) -> Result<[i16; 3], Error> { (**self).read_gyro() }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct HalfBroken {
        gyro_reads: u32,
    }

    impl MotionSensor for HalfBroken {
        fn read_accel(&mut self) -> Result<[i16; 3], Error> { Err(Error::SensorRead) }

        fn read_gyro(&mut self) -> Result<[i16; 3], Error> {
            self.gyro_reads += 1;
            Ok([1, 2, 3])
        }
    }

    #[test]
    fn test_unit_conversion() {
        let sample = RawSample {
            accel: [16384, -8192, 0],
            gyro: [131, -262, 0],
        };
        assert_eq!(sample.accel_g(), [1.0, -0.5, 0.0]);
        assert_eq!(sample.gyro_dps(), [1.0, -2.0, 0.0]);
    }

    #[test]
    fn test_read_fails_if_either_axis_group_fails() {
        let mut sensor = HalfBroken { gyro_reads: 0 };
        assert_eq!(sensor.read(), Err(Error::SensorRead));
        // gyro is read first
        assert_eq!(sensor.gyro_reads, 1);
    }
}
