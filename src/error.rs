//! Error type shared by the sensor, transport and calibration paths.
//!
//! Drawing never fails: out-of-bounds pixels are dropped silently. Only bus
//! transactions and calibration configuration can produce an [`Error`].

use core::fmt;

/// Errors reported by the Tiltbox core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Sensor bus transaction failed (transient, retry next tick).
    SensorRead,
    /// Display bus transaction failed (transient, retry next frame).
    Transport,
    /// Malformed configuration, e.g. zero calibration samples.
    InvalidArgument(&'static str),
}

impl fmt::Display for Error {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::SensorRead => write!(f, "sensor read failed"),
            Self::Transport => write!(f, "display transport failed"),
            Self::InvalidArgument(what) => write!(f, "invalid argument: {what}"),
        }
    }
}

impl core::error::Error for Error {}
