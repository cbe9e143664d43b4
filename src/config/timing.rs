//! Timing constants shared by the device binary and the simulator.
//!
//! Game frame periods live with each game (`Game::frame_period_ms`).

/// Minimum time between accepted button edges (milliseconds).
pub const DEBOUNCE_MS: u64 = 200;

/// Pause after leaving an end screen so the exit press is not seen by the menu.
pub const EXIT_DELAY_MS: u64 = 500;

/// Menu idle poll interval (milliseconds).
pub const MENU_POLL_MS: u64 = 50;

/// Steps of the "hold still" countdown: the prompt, then "2..." and "1...".
pub const CALIBRATION_COUNTDOWN_STEPS: u8 = 3;

/// Duration of each step of the "hold still" countdown before calibration.
pub const CALIBRATION_COUNTDOWN_MS: u64 = 1000;

/// How long the "calibrated" confirmation stays on screen.
pub const CALIBRATED_HOLD_MS: u64 = 2000;
