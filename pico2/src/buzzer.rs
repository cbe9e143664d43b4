//! Tone-to-PWM conversion for the passive buzzer.
//!
//! The buzzer slice runs at `clk_sys / divider`. A tone is a square wave:
//! the counter wraps at `top` and channel A is high for half the period.

/// Counter wrap value that produces `frequency_hz`.
///
/// `None` for a rest (0 Hz) or a pitch the 16-bit counter cannot reach.
pub fn pwm_top(
    clock_hz: u32,
    divider: u8,
    frequency_hz: u32,
) -> Option<u16> {
    if frequency_hz == 0 || divider == 0 {
        return None;
    }
    let ticks = clock_hz / u32::from(divider) / frequency_hz;
    u16::try_from(ticks.checked_sub(1)?).ok()
}

/// `(top, compare_a)` for a 50% duty square wave. A rest holds the pin low.
pub fn square_wave(top: Option<u16>) -> (u16, u16) {
    match top {
        Some(top) => (top, top.div_ceil(2)),
        None => (0, 0),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BUZZER_PWM_DIVIDER;
    use tiltbox::Cue;

    const CLK_SYS_HZ: u32 = 150_000_000;

    #[test]
    fn test_top_for_known_pitches() {
        // 150 MHz / 64 = 2.34375 MHz counter clock
        assert_eq!(pwm_top(CLK_SYS_HZ, 64, 800), Some(2928));
        assert_eq!(pwm_top(CLK_SYS_HZ, 64, 1600), Some(1463));
        assert_eq!(pwm_top(CLK_SYS_HZ, 1, 1_000_000), Some(149));
    }

    #[test]
    fn test_rest_and_unreachable_pitches() {
        assert_eq!(pwm_top(CLK_SYS_HZ, 64, 0), None);
        assert_eq!(pwm_top(CLK_SYS_HZ, 0, 800), None);
        // Would need a wrap at 117186
        assert_eq!(pwm_top(CLK_SYS_HZ, 64, 20), None);
        // Faster than the counter clock
        assert_eq!(pwm_top(1_000, 1, 5_000), None);
    }

    #[test]
    fn test_every_cue_note_fits_the_counter() {
        let cues = [
            Cue::Boot,
            Cue::MenuNavigate,
            Cue::MenuSelect,
            Cue::GameStart,
            Cue::PointScored,
            Cue::GameOver,
            Cue::Step,
            Cue::Complete,
        ];
        for cue in cues {
            for tone in cue.tones().iter().filter(|t| t.frequency_hz > 0) {
                let top = pwm_top(CLK_SYS_HZ, BUZZER_PWM_DIVIDER, tone.frequency_hz);
                assert!(top.is_some_and(|top| top > 100), "{cue:?} at {} Hz", tone.frequency_hz);
            }
        }
    }

    #[test]
    fn test_square_wave_is_half_duty() {
        // Counter runs 0..=top, high while below compare
        assert_eq!(square_wave(Some(2928)), (2928, 1464));
        assert_eq!(square_wave(Some(1463)), (1463, 732));
        assert_eq!(square_wave(Some(u16::MAX)), (u16::MAX, 32768));
        assert_eq!(square_wave(None), (0, 0));
    }
}
