//! Full-screen messages drawn outside of gameplay.
//!
//! Every function draws into an already-cleared framebuffer and leaves
//! presenting to the caller.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Text, TextStyle, TextStyleBuilder};
use heapless::String;
use profont::PROFONT_18_POINT;

use crate::config::timing::CALIBRATION_COUNTDOWN_STEPS;
use crate::config::{CENTER_X, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::game::EndScreen;
use crate::graphics::Framebuffer;

const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();
const TITLE_STYLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&PROFONT_18_POINT, BinaryColor::On);
const TITLE_BASELINE: i32 = 28;

const PRESS_ANY_BUTTON: &str = "PRESS ANY BUTTON";

/// Boot splash: large title plus the continue prompt.
pub fn draw_splash(fb: &mut Framebuffer) {
    Text::with_text_style("TILTBOX", Point::new(CENTER_X, TITLE_BASELINE), TITLE_STYLE, CENTERED)
        .draw(fb)
        .ok();
    fb.draw_string(0, 50, PRESS_ANY_BUTTON);
}

/// Shown before calibration starts.
pub fn draw_calibration_prompt(fb: &mut Framebuffer) {
    fb.draw_string(15, 10, "CALIBRATING...");
    fb.draw_string(10, 25, "HOLD STILL");
    fb.draw_string(25, 40, "3 SECONDS");
}

/// One step of the countdown ("2...", "1...").
pub fn draw_countdown(
    fb: &mut Framebuffer,
    remaining: u8,
) {
    let mut text: String<8> = String::new();
    let _ = write!(text, "{remaining}...");
    fb.draw_string(50, 30, &text);
}

/// Step `step` of the hold-still sequence: the prompt, then the countdown.
pub fn draw_calibration_step(
    fb: &mut Framebuffer,
    step: u8,
) {
    match step {
        0 => draw_calibration_prompt(fb),
        _ => draw_countdown(fb, CALIBRATION_COUNTDOWN_STEPS.saturating_sub(step)),
    }
}

/// Shown once calibration succeeded.
pub fn draw_calibrated(fb: &mut Framebuffer) {
    fb.draw_string(20, 20, "CALIBRATED!");
    fb.draw_string(10, 35, "TILT TO");
    fb.draw_string(15, 50, "STEER");
}

/// Sensor missing or failing. Also used when the sensor does not come up at boot.
pub fn draw_sensor_error(fb: &mut Framebuffer) {
    fb.draw_string(10, 20, "SENSOR ERROR!");
    fb.draw_string(5, 35, "CHECK THE");
    fb.draw_string(15, 50, "CONNECTIONS");
}

pub fn draw_end_screen(
    fb: &mut Framebuffer,
    screen: EndScreen,
) {
    let mut line: String<20> = String::new();
    match screen {
        EndScreen::GameOver { score } => {
            fb.draw_rect(2, 2, SCREEN_WIDTH - 4, SCREEN_HEIGHT - 4, false);
            fb.draw_string(20, 20, "GAME OVER");
            let _ = write!(line, "SCORE: {score}");
            fb.draw_string(20, 35, &line);
            fb.draw_string(5, 50, PRESS_ANY_BUTTON);
        }
        EndScreen::Complete { seconds } => {
            fb.draw_string(15, 20, "WELL DONE!");
            let _ = write!(line, "TIME: {seconds}");
            fb.draw_string(15, 35, &line);
            fb.draw_string(5, 50, PRESS_ANY_BUTTON);
        }
        EndScreen::SensorFault => draw_sensor_error(fb),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Assert that `fb` contains every pixel of `text` drawn at `(x, y)`.
    fn assert_line(
        fb: &Framebuffer,
        x: i32,
        y: i32,
        text: &str,
    ) {
        let mut expected = Framebuffer::new();
        expected.draw_string(x, y, text);
        for row in y..y + 8 {
            for col in 0..SCREEN_WIDTH {
                if expected.pixel(col, row) {
                    assert!(fb.pixel(col, row), "{text:?} missing pixel ({col}, {row})");
                }
            }
        }
    }

    #[test]
    fn test_splash_has_title_and_prompt() {
        let mut fb = Framebuffer::new();
        draw_splash(&mut fb);

        let mut prompt_only = Framebuffer::new();
        prompt_only.draw_string(0, 50, PRESS_ANY_BUTTON);
        assert!(fb.lit_count() > prompt_only.lit_count());
        assert_line(&fb, 0, 50, PRESS_ANY_BUTTON);

        // Title sits above the prompt
        let title_pixels = (0..SCREEN_WIDTH)
            .flat_map(|x| (0..40).map(move |y| (x, y)))
            .filter(|&(x, y)| fb.pixel(x, y))
            .count();
        assert!(title_pixels > 50);
    }

    #[test]
    fn test_countdown_text() {
        let mut fb = Framebuffer::new();
        draw_countdown(&mut fb, 2);
        let mut expected = Framebuffer::new();
        expected.draw_string(50, 30, "2...");
        assert_eq!(fb.as_bytes(), expected.as_bytes());
    }

    #[test]
    fn test_calibration_steps() {
        let mut fb = Framebuffer::new();
        draw_calibration_step(&mut fb, 0);
        assert_line(&fb, 15, 10, "CALIBRATING...");

        let mut expected = Framebuffer::new();
        for (step, text) in [(1, "2..."), (2, "1...")] {
            fb.clear();
            draw_calibration_step(&mut fb, step);
            expected.clear();
            expected.draw_string(50, 30, text);
            assert_eq!(fb.as_bytes(), expected.as_bytes());
        }
    }

    #[test]
    fn test_calibration_screens_draw() {
        let mut fb = Framebuffer::new();
        draw_calibration_prompt(&mut fb);
        assert_line(&fb, 10, 25, "HOLD STILL");

        fb.clear();
        draw_calibrated(&mut fb);
        assert_line(&fb, 20, 20, "CALIBRATED!");
    }

    #[test]
    fn test_game_over_shows_score() {
        let mut fb = Framebuffer::new();
        draw_end_screen(&mut fb, EndScreen::GameOver { score: 37 });
        assert_line(&fb, 20, 20, "GAME OVER");
        assert_line(&fb, 20, 35, "SCORE: 37");
        assert_line(&fb, 5, 50, PRESS_ANY_BUTTON);
        // Frame corners
        assert!(fb.pixel(2, 2));
        assert!(fb.pixel(125, 61));
    }

    #[test]
    fn test_complete_shows_time() {
        let mut fb = Framebuffer::new();
        draw_end_screen(&mut fb, EndScreen::Complete { seconds: 84 });
        assert_line(&fb, 15, 20, "WELL DONE!");
        assert_line(&fb, 15, 35, "TIME: 84");
        assert!(!fb.pixel(2, 2));
    }

    #[test]
    fn test_sensor_fault_matches_sensor_error() {
        let mut end = Framebuffer::new();
        draw_end_screen(&mut end, EndScreen::SensorFault);
        let mut error = Framebuffer::new();
        draw_sensor_error(&mut error);
        assert_eq!(end.as_bytes(), error.as_bytes());
        assert_line(&end, 10, 20, "SENSOR ERROR!");
    }
}
