//! Button debounce handling.
//!
//! Time-based edge detection with debouncing to prevent multiple triggers
//! from contact bounce. Time is passed in so the same logic runs under
//! embassy, in the simulator and in tests.

use crate::config::timing::DEBOUNCE_MS;

/// Button debounce state with time-based edge detection.
pub struct ButtonState {
    was_pressed: bool,
    last_change_ms: Option<u64>,
}

impl ButtonState {
    /// Create a new button state (not pressed).
    pub const fn new() -> Self {
        Self {
            was_pressed: false,
            last_change_ms: None,
        }
    }

    /// Returns true only on the falling edge (button just pressed).
    ///
    /// Buttons are active-low, so `is_low` means pressed. Level changes
    /// within `DEBOUNCE_MS` of the last accepted change are ignored.
    pub fn just_pressed(
        &mut self,
        is_low: bool,
        now_ms: u64,
    ) -> bool {
        if is_low != self.was_pressed {
            if let Some(last) = self.last_change_ms
                && now_ms.saturating_sub(last) < DEBOUNCE_MS
            {
                return false;
            }

            self.was_pressed = is_low;
            self.last_change_ms = Some(now_ms);

            // Only the press edge counts, not the release
            return is_low;
        }

        false
    }
}

impl Default for ButtonState {
    fn default() -> Self { Self::new() }
}
