//! Tilt input: raw inertial samples to a bounded player velocity.
//!
//! - `sensor`: Sensor source trait and raw sample type
//! - `calibration`: Bias averaging at session start
//! - `filter`: Dead-zoned, two-stage smoothed control velocity
//!
//! # Data Flow
//!
//! ```text
//! MotionSensor::read() -> RawSample -> MotionFilter::update(.., &Calibration) -> velocity
//! ```
//!
//! The filter and calibration are plain values owned by the active game
//! session. Nothing here is global.

mod calibration;
mod filter;
mod sensor;

pub use calibration::{Calibration, CalibrationConfig, calibrate};
pub use filter::MotionFilter;
pub use sensor::{MotionSensor, RawSample};
