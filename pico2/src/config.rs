//! Board configuration for the Pico 2 handheld.
//!
//! Wiring:
//! - I2C0: SDA on GP4, SCL on GP5, shared by the SSD1306 (0x3C) and MPU6050 (0x68)
//! - Navigate button on GP14, Select button on GP15, both active-low with pull-ups
//! - Passive buzzer on GP16 (PWM slice 0, channel A)

/// I2C0 bus speed (fast mode).
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// Button sampling interval (milliseconds). Well below the debounce window.
pub const BUTTON_POLL_MS: u64 = 5;

/// Pending presses kept between consumer polls. Extra presses are dropped.
pub const BUTTON_QUEUE_DEPTH: usize = 8;


/// PWM clock divider for the buzzer slice. Keeps every cue pitch inside the 16-bit counter.
pub const BUZZER_PWM_DIVIDER: u8 = 64;

/// Cues waiting for the buzzer task. Extra cues are dropped.
pub const CUE_QUEUE_DEPTH: usize = 4;
