//! Dodge the falling blocks.
//!
//! The player slides along the bottom of the screen with the filtered tilt
//! velocity. Each block that falls past the bottom respawns above the screen
//! a little faster and scores a point. Touching a block ends the game.

use rand_core::RngCore;

use super::{Control, EndScreen, Game, Progress, draw_number, random_below};
use crate::config::{CENTER_X, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::graphics::Framebuffer;
use crate::sound::{Buzzer, Cue};

const BLOCK_COUNT: usize = 3;
const BLOCK_SIZE: i32 = 6;
const BLOCK_SPEED_INITIAL: f32 = 1.0;
const BLOCK_SPEED_STEP: f32 = 0.1;
const PLAYER_SIZE: i32 = 8;
const PLAYER_Y: i32 = 50;
const FRAME_PERIOD_MS: u64 = 80;
const SCORE_X: i32 = 98;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Block {
    x: i32,
    y: i32,
    speed: f32,
}

impl Block {
    const PARKED: Self = Self {
        x: 0,
        y: -BLOCK_SIZE,
        speed: BLOCK_SPEED_INITIAL,
    };

    fn hits_player(
        &self,
        player_x: i32,
    ) -> bool {
        self.x < player_x + PLAYER_SIZE
            && self.x + BLOCK_SIZE > player_x
            && self.y < PLAYER_Y + PLAYER_SIZE
            && self.y + BLOCK_SIZE > PLAYER_Y
    }
}

pub struct Dodge {
    player_x: i32,
    blocks: [Block; BLOCK_COUNT],
    score: u32,
}

impl Dodge {
    pub const fn new() -> Self {
        Self {
            player_x: CENTER_X,
            blocks: [Block::PARKED; BLOCK_COUNT],
            score: 0,
        }
    }

    pub const fn player_x(&self) -> i32 { self.player_x }

    pub const fn score(&self) -> u32 { self.score }
}

impl Default for Dodge {
    fn default() -> Self { Self::new() }
}

impl Game for Dodge {
    fn frame_period_ms(&self) -> u64 { FRAME_PERIOD_MS }

    fn reset(
        &mut self,
        rng: &mut dyn RngCore,
        _now_ms: u64,
    ) {
        self.player_x = CENTER_X;
        self.score = 0;
        for block in &mut self.blocks {
            block.x = random_below(rng, (SCREEN_WIDTH - BLOCK_SIZE) as u32);
            block.y = -random_below(rng, 40);
            block.speed = BLOCK_SPEED_INITIAL + random_below(rng, 30) as f32 / 10.0;
        }
    }

    fn update(
        &mut self,
        control: &Control,
        rng: &mut dyn RngCore,
        sound: &mut dyn Buzzer,
        _now_ms: u64,
    ) -> Progress {
        // Velocity is whole pixels per frame, truncated toward zero
        self.player_x = (self.player_x + control.velocity as i32).clamp(0, SCREEN_WIDTH - PLAYER_SIZE);

        let mut hit = false;
        for block in &mut self.blocks {
            block.y += block.speed as i32;
            if block.y > SCREEN_HEIGHT {
                block.y = -random_below(rng, 30);
                block.x = random_below(rng, (SCREEN_WIDTH - BLOCK_SIZE) as u32);
                block.speed += BLOCK_SPEED_STEP;
                self.score += 1;
                sound.play(Cue::PointScored);
            }
            hit |= block.hits_player(self.player_x);
        }

        if hit {
            sound.play(Cue::GameOver);
            Progress::Ended
        } else {
            Progress::Playing
        }
    }

    fn draw(
        &self,
        fb: &mut Framebuffer,
        _now_ms: u64,
    ) {
        fb.draw_rect(self.player_x, PLAYER_Y, PLAYER_SIZE, PLAYER_SIZE, true);
        for block in &self.blocks {
            fb.draw_rect(block.x, block.y, BLOCK_SIZE, BLOCK_SIZE, true);
        }
        draw_number(fb, SCORE_X, 0, self.score);
    }

    fn end_screen(
        &self,
        _now_ms: u64,
    ) -> EndScreen {
        EndScreen::GameOver { score: self.score }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
