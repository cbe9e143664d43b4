//! Tiltbox core library - graphics and motion logic for the handheld.
//!
//! This library contains everything that can be tested on the host machine:
//! the page-addressed monochrome framebuffer, the 8x8 glyph table, the tilt
//! filter and calibration, button input plumbing, buzzer cues and the game
//! session loop.
//! The device binary (`pico2/`) and the desktop simulator (`simulator/`) only
//! add transports, sensor sources and scheduling on top of it.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the firmware links the library as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod config;
pub mod error;
pub mod game;
pub mod graphics;
pub mod input;
pub mod menu;
pub mod motion;
pub mod screens;
pub mod sound;

#[cfg(test)]
mod test_support;

pub use error::Error;
pub use graphics::{DisplayTransport, Framebuffer};
pub use input::{Button, ButtonEvent, ButtonInput};
pub use motion::{
    Calibration,
    CalibrationConfig,
    MotionFilter,
    MotionSensor,
    RawSample,
    calibrate,
};
pub use sound::{Buzzer, Cue};
