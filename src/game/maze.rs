//! Tilt maze.
//!
//! The whole screen is a 16x8 grid of 8-pixel cells. Every tick the player
//! steps one cell along whichever calibrated accel axis leans furthest past
//! the threshold, unless a wall is in the way. Reaching the exit cell wins.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use rand_core::RngCore;

use super::{Control, EndScreen, Game, Progress, draw_number};
use crate::config::{GLYPH_SIZE, SCREEN_WIDTH};
use crate::graphics::Framebuffer;
use crate::sound::{Buzzer, Cue};

const MAZE_WIDTH: usize = 16;
const MAZE_HEIGHT: usize = 8;
const CELL_SIZE: i32 = 8;
const PLAYER_SIZE: i32 = 4;
const PLAYER_INSET: i32 = (CELL_SIZE - PLAYER_SIZE) / 2;
const START: (i32, i32) = (1, 1);
const EXIT: (i32, i32) = (14, 6);
const TILT_THRESHOLD_G: f32 = 0.2;
const FRAME_PERIOD_MS: u64 = 150;
const TIMER_X: i32 = 98;

/// `1` is a wall.
#[rustfmt::skip]
const MAZE: [[u8; MAZE_WIDTH]; MAZE_HEIGHT] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 0, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1],
    [1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 1],
    [1, 0, 1, 1, 1, 1, 1, 1, 1, 0, 1, 0, 1, 0, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 1, 1, 0, 1, 0, 0, 0, 1, 1, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

fn is_open(
    x: i32,
    y: i32,
) -> bool {
    if x < 0 || y < 0 {
        return false;
    }
    MAZE.get(y as usize)
        .and_then(|row| row.get(x as usize))
        .is_some_and(|&cell| cell == 0)
}

/// One-cell step for a tilt reading, or `(0, 0)` inside the threshold.
fn step_for(
    accel_x: f32,
    accel_y: f32,
) -> (i32, i32) {
    let lean = |g: f32| {
        if g > TILT_THRESHOLD_G {
            1
        } else if g < -TILT_THRESHOLD_G {
            -1
        } else {
            0
        }
    };

    if accel_x.abs() > accel_y.abs() { (lean(accel_x), 0) } else { (0, lean(accel_y)) }
}

pub struct TiltMaze {
    x: i32,
    y: i32,
    start_ms: u64,
    finished_ms: Option<u64>,
}

impl TiltMaze {
    pub const fn new() -> Self {
        Self {
            x: START.0,
            y: START.1,
            start_ms: 0,
            finished_ms: None,
        }
    }

    /// Player cell.
    pub const fn position(&self) -> (i32, i32) { (self.x, self.y) }

    fn elapsed_seconds(
        &self,
        now_ms: u64,
    ) -> u32 {
        let end = self.finished_ms.unwrap_or(now_ms);
        (end.saturating_sub(self.start_ms) / 1000) as u32
    }
}

impl Default for TiltMaze {
    fn default() -> Self { Self::new() }
}

impl Game for TiltMaze {
    fn frame_period_ms(&self) -> u64 { FRAME_PERIOD_MS }

    fn reset(
        &mut self,
        _rng: &mut dyn RngCore,
        now_ms: u64,
    ) {
        *self = Self::new();
        self.start_ms = now_ms;
    }

    fn update(
        &mut self,
        control: &Control,
        _rng: &mut dyn RngCore,
        sound: &mut dyn Buzzer,
        now_ms: u64,
    ) -> Progress {
        if let Some((accel_x, accel_y)) = control.tilt {
            let (dx, dy) = step_for(accel_x, accel_y);
            if (dx, dy) != (0, 0) && is_open(self.x + dx, self.y + dy) {
                self.x += dx;
                self.y += dy;
                sound.play(Cue::Step);
            }
        }

        if (self.x, self.y) == EXIT {
            if self.finished_ms.is_none() {
                self.finished_ms = Some(now_ms);
                sound.play(Cue::Complete);
            }
            Progress::Ended
        } else {
            Progress::Playing
        }
    }

    fn draw(
        &self,
        fb: &mut Framebuffer,
        now_ms: u64,
    ) {
        for (row, cells) in MAZE.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == 1 {
                    fb.draw_rect(col as i32 * CELL_SIZE, row as i32 * CELL_SIZE, CELL_SIZE, CELL_SIZE, true);
                }
            }
        }

        fb.draw_rect(
            EXIT.0 * CELL_SIZE + PLAYER_INSET,
            EXIT.1 * CELL_SIZE + PLAYER_INSET,
            PLAYER_SIZE,
            PLAYER_SIZE,
            false,
        );
        fb.draw_rect(
            self.x * CELL_SIZE + PLAYER_INSET,
            self.y * CELL_SIZE + PLAYER_INSET,
            PLAYER_SIZE,
            PLAYER_SIZE,
            true,
        );

        // The timer sits on the top wall row, so punch a hole for it first
        Rectangle::new(
            Point::new(TIMER_X - 1, 0),
            Size::new((SCREEN_WIDTH - TIMER_X + 1) as u32, GLYPH_SIZE as u32),
        )
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
        .draw(fb)
        .ok();
        draw_number(fb, TIMER_X, 0, self.elapsed_seconds(now_ms));
    }

    fn end_screen(
        &self,
        now_ms: u64,
    ) -> EndScreen {
        EndScreen::Complete {
            seconds: self.elapsed_seconds(now_ms),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
