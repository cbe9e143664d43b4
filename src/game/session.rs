//! Per-frame game loop.
//!
//! One [`Session::tick`] per frame period:
//! 1. Drop button presses (buttons only matter on the end screen)
//! 2. Read the sensor and update the motion filter
//! 3. Update the game, clear, draw, present
//!
//! The first frame after a (re)start plays [`Cue::GameStart`]; the game
//! plays its own cues during `update`.
//!
//! A failed sensor read reuses the previous velocity for that frame. After
//! `MAX_CONSECUTIVE_SENSOR_FAILURES` failures in a row the session stops the
//! game and shows the sensor error screen once. A failed present is returned
//! to the caller, who simply ticks again next period.

use rand_core::RngCore;

use super::{Control, EndScreen, Game, Progress};
use crate::config::motion::MAX_CONSECUTIVE_SENSOR_FAILURES;
use crate::error::Error;
use crate::graphics::{DisplayTransport, Framebuffer};
use crate::input::ButtonInput;
use crate::motion::{Calibration, MotionFilter, MotionSensor};
use crate::screens;
use crate::sound::{Buzzer, Cue};

/// Outcome of one [`Session::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// Game frame drawn and presented.
    Running,
    /// End screen is up, waiting for a button.
    Ended(EndScreen),
    /// A button was pressed on the end screen. Return to the menu.
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Playing,
    Ending { screen: EndScreen, presented: bool },
}

/// A running game plus the motion state it is steered by.
pub struct Session<G, R> {
    game: G,
    rng: R,
    filter: MotionFilter,
    calibration: Calibration,
    phase: Phase,
    sensor_failures: u8,
    announced: bool,
}

impl<G: Game, R: RngCore> Session<G, R> {
    /// Start `game` at `now_ms` with a fresh filter.
    pub fn new(
        game: G,
        rng: R,
        calibration: Calibration,
        now_ms: u64,
    ) -> Self {
        let mut session = Self {
            game,
            rng,
            filter: MotionFilter::new(),
            calibration,
            phase: Phase::Playing,
            sensor_failures: 0,
            announced: false,
        };
        session.restart(now_ms);
        session
    }

    /// Reset the filter and the game and resume playing.
    pub fn restart(
        &mut self,
        now_ms: u64,
    ) {
        self.filter.reset();
        self.sensor_failures = 0;
        self.phase = Phase::Playing;
        self.announced = false;
        self.game.reset(&mut self.rng, now_ms);
    }

    /// Replace the calibration. Takes effect on the next tick.
    pub fn recalibrate(
        &mut self,
        calibration: Calibration,
    ) {
        self.calibration = calibration;
    }

    pub fn frame_period_ms(&self) -> u64 { self.game.frame_period_ms() }

    pub fn game(&self) -> &G { &self.game }

    pub fn filter(&self) -> &MotionFilter { &self.filter }

    pub fn calibration(&self) -> &Calibration { &self.calibration }

    /// `true` once the game has stopped and the end screen owns the display.
    pub fn is_over(&self) -> bool { matches!(self.phase, Phase::Ending { .. }) }

    /// Run one frame.
    pub fn tick<S, B, Z, T>(
        &mut self,
        now_ms: u64,
        sensor: &mut S,
        buttons: &mut B,
        sound: &mut Z,
        fb: &mut Framebuffer,
        transport: &mut T,
    ) -> Result<Tick, Error>
    where
        S: MotionSensor + ?Sized,
        B: ButtonInput + ?Sized,
        Z: Buzzer,
        T: DisplayTransport + ?Sized,
    {
        match self.phase {
            Phase::Playing => self.play(now_ms, sensor, buttons, sound, fb, transport),
            Phase::Ending { screen, presented } => {
                if !presented {
                    fb.clear();
                    screens::draw_end_screen(fb, screen);
                    fb.present(transport)?;
                    self.phase = Phase::Ending {
                        screen,
                        presented: true,
                    };
                    // Presses made before the screen was visible don't count
                    buttons.any_pressed();
                    return Ok(Tick::Ended(screen));
                }

                if buttons.any_pressed() { Ok(Tick::Exit) } else { Ok(Tick::Ended(screen)) }
            }
        }
    }

    fn play<S, B, Z, T>(
        &mut self,
        now_ms: u64,
        sensor: &mut S,
        buttons: &mut B,
        sound: &mut Z,
        fb: &mut Framebuffer,
        transport: &mut T,
    ) -> Result<Tick, Error>
    where
        S: MotionSensor + ?Sized,
        B: ButtonInput + ?Sized,
        Z: Buzzer,
        T: DisplayTransport + ?Sized,
    {
        buttons.any_pressed();
        if !self.announced {
            sound.play(Cue::GameStart);
            self.announced = true;
        }

        let tilt = match sensor.read() {
            Ok(sample) => {
                self.sensor_failures = 0;
                self.filter.update(sample.accel[0], sample.accel[1], sample.gyro[0], &self.calibration);
                Some(self.calibration.accel_g(&sample))
            }
            Err(_) => {
                self.sensor_failures = self.sensor_failures.saturating_add(1);
                if self.sensor_failures >= MAX_CONSECUTIVE_SENSOR_FAILURES {
                    #[cfg(feature = "defmt")]
                    defmt::error!("Sensor failed {} times in a row, stopping game", self.sensor_failures);
                    self.phase = Phase::Ending {
                        screen: EndScreen::SensorFault,
                        presented: false,
                    };
                    return self.tick(now_ms, sensor, buttons, sound, fb, transport);
                }
                None
            }
        };

        let control = Control {
            velocity: self.filter.velocity(),
            tilt,
        };
        let progress = self.game.update(&control, &mut self.rng, sound, now_ms);
        if progress == Progress::Ended {
            let screen = self.game.end_screen(now_ms);
            #[cfg(feature = "defmt")]
            defmt::info!("Game ended: {}", screen);
            self.phase = Phase::Ending {
                screen,
                presented: false,
            };
        }

        // Final frame is still shown; the end screen follows next tick
        fb.clear();
        self.game.draw(fb, now_ms);
        fb.present(transport)?;
        Ok(Tick::Running)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
