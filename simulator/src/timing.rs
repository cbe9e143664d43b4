//! Wall-clock time for the simulator.

use std::thread;
use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;

/// Milliseconds since `start`, the simulator's equivalent of the device uptime.
pub fn elapsed_ms(start: Instant) -> u64 { start.elapsed().as_millis() as u64 }

/// Blocking delay backed by `thread::sleep`.
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(
        &mut self,
        ns: u32,
    ) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(
        &mut self,
        ms: u32,
    ) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
