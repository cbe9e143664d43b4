//! Tiltbox firmware library - board configuration and peripheral drivers.
//!
//! The drivers are written against `embedded-hal` traits only, so they are
//! tested on the host against a fake bus. `buzzer` holds the PWM math for
//! the cue tones. The binary (`main.rs`) wires them to
//! the RP2350 peripherals and runs the menu and game loop from `tiltbox`.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p tiltbox-pico2 --lib --target x86_64-unknown-linux-gnu  # Linux/macOS
//! cargo test -p tiltbox-pico2 --lib --target x86_64-pc-windows-msvc    # Windows
//! ```

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]

pub mod buzzer;
pub mod config;
pub mod drivers;
