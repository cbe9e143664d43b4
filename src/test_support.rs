//! Host-side fakes shared by the unit tests.

use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::error::Error;
use crate::graphics::DisplayTransport;
use crate::motion::{MotionSensor, RawSample};
use crate::sound::{Buzzer, Cue};

/// Replays scripted readings, then repeats `fallback` forever.
pub struct ScriptedSensor {
    script: VecDeque<Result<RawSample, Error>>,
    fallback: Result<RawSample, Error>,
    pub reads: u32,
}

impl ScriptedSensor {
    pub fn constant(sample: RawSample) -> Self {
        Self {
            script: VecDeque::new(),
            fallback: Ok(sample),
            reads: 0,
        }
    }

    pub fn failing() -> Self {
        Self {
            script: VecDeque::new(),
            fallback: Err(Error::SensorRead),
            reads: 0,
        }
    }

    pub fn then(
        mut self,
        reading: Result<RawSample, Error>,
    ) -> Self {
        self.script.push_back(reading);
        self
    }

    pub fn set_fallback(
        &mut self,
        reading: Result<RawSample, Error>,
    ) {
        self.fallback = reading;
    }
}

impl MotionSensor for ScriptedSensor {
    fn read_accel(&mut self) -> Result<[i16; 3], Error> { self.read().map(|s| s.accel) }

    fn read_gyro(&mut self) -> Result<[i16; 3], Error> { self.read().map(|s| s.gyro) }

    fn read(&mut self) -> Result<RawSample, Error> {
        self.reads += 1;
        self.script.pop_front().unwrap_or(self.fallback)
    }
}

/// `DelayNs` that returns immediately and totals the requested time.
#[derive(Default)]
pub struct NoDelay {
    pub total_ns: u64,
}

impl DelayNs for NoDelay {
    fn delay_ns(
        &mut self,
        ns: u32,
    ) {
        self.total_ns += u64::from(ns);
    }
}

/// Keeps a copy of every presented frame.
#[derive(Default)]
pub struct Recorder {
    pub frames: Vec<Vec<u8>>,
}

impl DisplayTransport for Recorder {
    fn write(
        &mut self,
        buffer: &[u8],
    ) -> Result<(), Error> {
        self.frames.push(buffer.to_vec());
        Ok(())
    }
}

/// Transport that fails the next `failures` writes, then records like [`Recorder`].
#[derive(Default)]
pub struct Flaky {
    pub failures: u32,
    pub inner: Recorder,
}

impl DisplayTransport for Flaky {
    fn write(
        &mut self,
        buffer: &[u8],
    ) -> Result<(), Error> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(Error::Transport);
        }
        self.inner.write(buffer)
    }
}

/// Records cues in the order they were played.
impl Buzzer for Vec<Cue> {
    fn play(
        &mut self,
        cue: Cue,
    ) {
        self.push(cue);
    }
}
