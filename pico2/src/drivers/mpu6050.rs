//! Blocking MPU6050 driver (I2C) used as the tilt sensor.
//!
//! Configured for the ranges the motion filter is scaled for:
//! +-2 g (16384 LSB/g) and +-250 deg/s (131 LSB/(deg/s)).

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use tiltbox::{Error, MotionSensor};

/// Default 7-bit I2C address (AD0 low). WHO_AM_I also reads back this value.
const ADDRESS: u8 = 0x68;

// Registers
const SMPLRT_DIV: u8 = 0x19;
const CONFIG: u8 = 0x1A;
const GYRO_CONFIG: u8 = 0x1B;
const ACCEL_CONFIG: u8 = 0x1C;
const ACCEL_XOUT_H: u8 = 0x3B;
const TEMP_OUT_H: u8 = 0x41;
const GYRO_XOUT_H: u8 = 0x43;
const PWR_MGMT_1: u8 = 0x6B;
const WHO_AM_I: u8 = 0x75;

/// Time for the oscillator to settle after leaving sleep.
const WAKE_DELAY_MS: u32 = 100;

pub struct Mpu6050<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Mpu6050<I2C> {
    pub const fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: ADDRESS,
        }
    }

    /// Verify the device identity, wake it and program sample rate and ranges.
    pub fn init(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> Result<(), Error> {
        let id = self.read_register(WHO_AM_I)?;
        if id != ADDRESS {
            return Err(Error::SensorRead);
        }

        self.write_register(PWR_MGMT_1, 0x00)?;
        delay.delay_ms(WAKE_DELAY_MS);

        // 1 kHz / (1 + 7) = 125 Hz sample rate, no DLPF
        self.write_register(SMPLRT_DIV, 0x07)?;
        self.write_register(CONFIG, 0x00)?;
        // +-250 deg/s, +-2 g
        self.write_register(GYRO_CONFIG, 0x00)?;
        self.write_register(ACCEL_CONFIG, 0x00)?;
        Ok(())
    }

    /// Die temperature in degrees Celsius.
    pub fn read_temperature_c(&mut self) -> Result<f32, Error> {
        let mut raw = [0u8; 2];
        self.read_registers(TEMP_OUT_H, &mut raw)?;
        Ok(f32::from(i16::from_be_bytes(raw)) / 340.0 + 36.53)
    }

    pub fn release(self) -> I2C { self.i2c }

    fn read_register(
        &mut self,
        register: u8,
    ) -> Result<u8, Error> {
        let mut value = [0u8; 1];
        self.read_registers(register, &mut value)?;
        Ok(value[0])
    }

    fn write_register(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), Error> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(|_| Error::SensorRead)
    }

    fn read_registers(
        &mut self,
        start: u8,
        buffer: &mut [u8],
    ) -> Result<(), Error> {
        self.i2c
            .write_read(self.address, &[start], buffer)
            .map_err(|_| Error::SensorRead)
    }

    /// Burst-read three big-endian axes starting at `start`.
    fn read_axes(
        &mut self,
        start: u8,
    ) -> Result<[i16; 3], Error> {
        let mut raw = [0u8; 6];
        self.read_registers(start, &mut raw)?;
        Ok([
            i16::from_be_bytes([raw[0], raw[1]]),
            i16::from_be_bytes([raw[2], raw[3]]),
            i16::from_be_bytes([raw[4], raw[5]]),
        ])
    }
}

impl<I2C: I2c> MotionSensor for Mpu6050<I2C> {
    fn read_accel(&mut self) -> Result<[i16; 3], Error> { self.read_axes(ACCEL_XOUT_H) }

    fn read_gyro(&mut self) -> Result<[i16; 3], Error> { self.read_axes(GYRO_XOUT_H) }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::fake_bus::FakeBus;

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(
            &mut self,
            _ns: u32,
        ) {
        }
    }

    fn with_registers(values: &[(u8, u8)]) -> FakeBus {
        let mut bus = FakeBus::default();
        for &(register, value) in values {
            bus.registers[usize::from(register)] = value;
        }
        bus
    }

    #[test]
    fn test_init_checks_identity_and_configures() {
        let mut sensor = Mpu6050::new(with_registers(&[(WHO_AM_I, ADDRESS), (PWR_MGMT_1, 0x40)]));
        sensor.init(&mut NoDelay).unwrap();
        let bus = sensor.release();

        let written: std::vec::Vec<&[u8]> = bus.writes.iter().map(|(_, bytes)| bytes.as_slice()).collect();
        assert_eq!(
            written,
            [
                &[PWR_MGMT_1, 0x00][..],
                &[SMPLRT_DIV, 0x07],
                &[CONFIG, 0x00],
                &[GYRO_CONFIG, 0x00],
                &[ACCEL_CONFIG, 0x00],
            ]
        );
        assert!(bus.writes.iter().all(|(address, _)| *address == ADDRESS));
    }

    #[test]
    fn test_init_rejects_wrong_device() {
        let mut sensor = Mpu6050::new(with_registers(&[(WHO_AM_I, 0x70)]));
        assert_eq!(sensor.init(&mut NoDelay), Err(Error::SensorRead));
        assert!(sensor.release().writes.is_empty());
    }

    #[test]
    fn test_axes_are_big_endian() {
        let mut sensor = Mpu6050::new(with_registers(&[
            (ACCEL_XOUT_H, 0x40),
            (ACCEL_XOUT_H + 1, 0x00),
            (ACCEL_XOUT_H + 2, 0xC0),
            (ACCEL_XOUT_H + 3, 0x00),
            (ACCEL_XOUT_H + 4, 0x00),
            (ACCEL_XOUT_H + 5, 0x01),
            (GYRO_XOUT_H, 0x00),
            (GYRO_XOUT_H + 1, 0x83),
            (GYRO_XOUT_H + 2, 0xFF),
            (GYRO_XOUT_H + 3, 0x7D),
        ]));
        assert_eq!(sensor.read_accel(), Ok([16384, -16384, 1]));
        assert_eq!(sensor.read_gyro(), Ok([131, -131, 0]));

        let sample = sensor.read().unwrap();
        assert_eq!(sample.accel[0], 16384);
        assert_eq!(sample.gyro[0], 131);
    }

    #[test]
    fn test_temperature() {
        // 0 counts is 36.53 C
        let mut sensor = Mpu6050::new(FakeBus::default());
        assert!((sensor.read_temperature_c().unwrap() - 36.53).abs() < 1e-4);
    }

    #[test]
    fn test_bus_error_is_sensor_error() {
        let mut sensor = Mpu6050::new(FakeBus::failing());
        assert_eq!(sensor.read_accel(), Err(Error::SensorRead));
        assert_eq!(sensor.read(), Err(Error::SensorRead));
        assert_eq!(sensor.init(&mut NoDelay), Err(Error::SensorRead));
    }
}
