//! Game loop and the tilt games.
//!
//! - `session`: Per-frame driver (sensor, filter, game update, draw, present)
//! - `dodge`: Dodge the falling blocks, steered by the filtered velocity
//! - `maze`: Walk a fixed maze one cell per tick by tilting
//!
//! A [`Session`] owns everything a running game mutates: the game itself,
//! its RNG, the motion filter and the calibration. The menu and a session
//! never run at the same time.

mod dodge;
mod maze;
mod session;

pub use dodge::Dodge;
pub use maze::TiltMaze;
use rand_core::RngCore;
pub use session::{Session, Tick};

use crate::graphics::Framebuffer;
use crate::menu::MenuOption;
use crate::sound::Buzzer;

/// Player input for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Control {
    /// Clamped filter velocity. Frozen at the last good value when the sensor read failed.
    pub velocity: f32,
    /// Bias-corrected accel X/Y in g. `None` when this frame's sensor read failed.
    pub tilt: Option<(f32, f32)>,
}

/// Result of one game update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Playing,
    Ended,
}

/// What the session shows once a game stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EndScreen {
    GameOver { score: u32 },
    Complete { seconds: u32 },
    SensorFault,
}

/// A game driven by [`Session`].
pub trait Game {
    /// Period of the control loop for this game.
    fn frame_period_ms(&self) -> u64;

    /// Start over from the initial state.
    fn reset(
        &mut self,
        rng: &mut dyn RngCore,
        now_ms: u64,
    );

    /// Advance one frame, reporting scoring and movement to `sound`.
    fn update(
        &mut self,
        control: &Control,
        rng: &mut dyn RngCore,
        sound: &mut dyn Buzzer,
        now_ms: u64,
    ) -> Progress;

    /// Draw the current state into a cleared framebuffer.
    fn draw(
        &self,
        fb: &mut Framebuffer,
        now_ms: u64,
    );

    /// End screen to show after `update` returned [`Progress::Ended`].
    fn end_screen(
        &self,
        now_ms: u64,
    ) -> EndScreen;
}

/// Every game on the menu.
pub enum AnyGame {
    Dodge(Dodge),
    TiltMaze(TiltMaze),
}

impl From<MenuOption> for AnyGame {
    fn from(option: MenuOption) -> Self {
        match option {
            MenuOption::Dodge => Self::Dodge(Dodge::new()),
            MenuOption::TiltMaze => Self::TiltMaze(TiltMaze::new()),
        }
    }
}

impl Game for AnyGame {
    fn frame_period_ms(&self) -> u64 {
        match self {
            Self::Dodge(game) => game.frame_period_ms(),
            Self::TiltMaze(game) => game.frame_period_ms(),
        }
    }

    fn reset(
        &mut self,
        rng: &mut dyn RngCore,
        now_ms: u64,
    ) {
        match self {
            Self::Dodge(game) => game.reset(rng, now_ms),
            Self::TiltMaze(game) => game.reset(rng, now_ms),
        }
    }

    fn update(
        &mut self,
        control: &Control,
        rng: &mut dyn RngCore,
        sound: &mut dyn Buzzer,
        now_ms: u64,
    ) -> Progress {
        match self {
            Self::Dodge(game) => game.update(control, rng, sound, now_ms),
            Self::TiltMaze(game) => game.update(control, rng, sound, now_ms),
        }
    }

    fn draw(
        &self,
        fb: &mut Framebuffer,
        now_ms: u64,
    ) {
        match self {
            Self::Dodge(game) => game.draw(fb, now_ms),
            Self::TiltMaze(game) => game.draw(fb, now_ms),
        }
    }

    fn end_screen(
        &self,
        now_ms: u64,
    ) -> EndScreen {
        match self {
            Self::Dodge(game) => game.end_screen(now_ms),
            Self::TiltMaze(game) => game.end_screen(now_ms),
        }
    }
}

/// Integer in `0..bound`, drawn as `next_u32() % bound`.
fn random_below(
    rng: &mut dyn RngCore,
    bound: u32,
) -> i32 {
    (rng.next_u32() % bound) as i32
}

/// Draw a number with the 8x8 font (score, elapsed seconds).
fn draw_number(
    fb: &mut Framebuffer,
    x: i32,
    y: i32,
    value: u32,
) {
    use core::fmt::Write;

    let mut text: heapless::String<10> = heapless::String::new();
    // u32::MAX has 10 digits, so this cannot overflow
    let _ = write!(text, "{value}");
    fb.draw_string(x, y, &text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_option_selects_game() {
        assert!(matches!(AnyGame::from(MenuOption::Dodge), AnyGame::Dodge(_)));
        assert!(matches!(AnyGame::from(MenuOption::TiltMaze), AnyGame::TiltMaze(_)));
    }

    #[test]
    fn test_frame_periods() {
        assert_eq!(AnyGame::from(MenuOption::Dodge).frame_period_ms(), 80);
        assert_eq!(AnyGame::from(MenuOption::TiltMaze).frame_period_ms(), 150);
    }

    #[test]
    fn test_draw_number_matches_string() {
        let mut number = Framebuffer::new();
        draw_number(&mut number, 98, 0, 4096);
        let mut text = Framebuffer::new();
        text.draw_string(98, 0, "4096");
        assert_eq!(number.as_bytes(), text.as_bytes());
        assert!(number.lit_count() > 0);
    }
}
