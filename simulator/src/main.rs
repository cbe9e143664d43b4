//! Tiltbox simulator for desktop.
//!
//! Runs the handheld's menu and games in an `embedded-graphics-simulator`
//! window. The window receives the framebuffer bytes the SSD1306 would, and
//! the keyboard stands in for the MPU6050 and the two buttons.
//!
//! # Controls
//!
//! - **A / D**: Tilt left / right (hold)
//! - **W / S**: Tilt up / down (hold)
//! - **J**: Navigate button
//! - **K**: Select button
//! - **F**: Toggle injected sensor read failures
//!
//! Set `RUST_LOG=debug` for more output, including the buzzer cues.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod sensor;
mod sound;
mod timing;
mod transport;

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use embedded_graphics_simulator::SimulatorEvent;
use embedded_graphics_simulator::sdl2::Keycode;
use heapless::Deque;
use log::{error, info, warn};
use rand_core::SeedableRng;
use rand_xorshift::XorShiftRng;
use tiltbox::config::timing::{
    CALIBRATED_HOLD_MS, CALIBRATION_COUNTDOWN_MS, CALIBRATION_COUNTDOWN_STEPS, EXIT_DELAY_MS, MENU_POLL_MS,
};
use tiltbox::game::{AnyGame, Session, Tick};
use tiltbox::input::ButtonState;
use tiltbox::menu::{Menu, MenuOption};
use tiltbox::{
    Button,
    ButtonEvent,
    ButtonInput,
    Buzzer,
    CalibrationConfig,
    Cue,
    Framebuffer,
    calibrate,
    screens,
};

use crate::sensor::KeyboardTilt;
use crate::sound::LogBuzzer;
use crate::timing::{StdDelay, elapsed_ms};
use crate::transport::WindowTransport;

/// Pending presses kept between polls.
const BUTTON_QUEUE_DEPTH: usize = 8;

/// Keyboard state: the virtual sensor plus the button queue it feeds.
struct Keyboard {
    tilt: KeyboardTilt,
    buttons: Deque<ButtonEvent, BUTTON_QUEUE_DEPTH>,
    navigate: ButtonState,
    select: ButtonState,
}

impl Keyboard {
    fn new() -> Self {
        Self {
            tilt: KeyboardTilt::default(),
            buttons: Deque::new(),
            navigate: ButtonState::new(),
            select: ButtonState::new(),
        }
    }

    fn key(
        &mut self,
        keycode: Keycode,
        down: bool,
        now_ms: u64,
    ) {
        let held = i16::from(down);
        match keycode {
            Keycode::A => self.tilt.set_x(-held),
            Keycode::D => self.tilt.set_x(held),
            Keycode::W => self.tilt.set_y(-held),
            Keycode::S => self.tilt.set_y(held),
            Keycode::F if down => {
                let failing = self.tilt.toggle_failures();
                info!("Sensor read failures {}", if failing { "on" } else { "off" });
            }
            Keycode::J => self.button(Button::Navigate, down, now_ms),
            Keycode::K => self.button(Button::Select, down, now_ms),
            _ => {}
        }
    }

    /// Key down is the active-low "pressed" level of a real button.
    fn button(
        &mut self,
        button: Button,
        down: bool,
        now_ms: u64,
    ) {
        let state = match button {
            Button::Navigate => &mut self.navigate,
            Button::Select => &mut self.select,
        };
        if !state.just_pressed(down, now_ms) {
            return;
        }
        let event = ButtonEvent {
            button,
            timestamp_ms: now_ms,
        };
        if self.buttons.push_back(event).is_err() {
            warn!("Button queue full, dropped {button:?}");
        }
    }
}

/// Everything the main loop drives.
struct Simulator {
    window: WindowTransport,
    keyboard: Keyboard,
    buzzer: LogBuzzer,
    fb: Framebuffer,
    start: Instant,
}

impl Simulator {
    fn now_ms(&self) -> u64 { elapsed_ms(self.start) }

    /// Handle window events. Returns `false` when the window was closed.
    fn pump(&mut self) -> bool {
        let now_ms = self.now_ms();
        for event in self.window.events() {
            match event {
                SimulatorEvent::Quit => return false,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if !repeat {
                        self.keyboard.key(keycode, true, now_ms);
                    }
                }
                SimulatorEvent::KeyUp { keycode, .. } => self.keyboard.key(keycode, false, now_ms),
                _ => {}
            }
        }
        true
    }

    /// Clear, draw one screen and present it.
    fn show(
        &mut self,
        draw: impl FnOnce(&mut Framebuffer),
    ) {
        self.fb.clear();
        draw(&mut self.fb);
        if let Err(e) = self.fb.present(&mut self.window) {
            warn!("Display write failed: {e}");
        }
    }

    /// Keep the window responsive for `ms`. Returns `false` if it was closed.
    fn wait(
        &mut self,
        ms: u64,
    ) -> bool {
        let until = self.now_ms() + ms;
        while self.now_ms() < until {
            if !self.pump() {
                return false;
            }
            thread::sleep(Duration::from_millis(MENU_POLL_MS));
        }
        true
    }

    /// Block until a press arrives. `None` if the window was closed.
    fn next_press(&mut self) -> Option<ButtonEvent> {
        loop {
            if !self.pump() {
                return None;
            }
            if let Some(event) = self.keyboard.buttons.poll_event() {
                return Some(event);
            }
            thread::sleep(Duration::from_millis(MENU_POLL_MS));
        }
    }

    /// Calibrate, then run `option` until its end screen is dismissed.
    /// Returns `false` if the window was closed.
    fn run_game(
        &mut self,
        option: MenuOption,
        rng: &mut XorShiftRng,
    ) -> bool {
        for step in 0..CALIBRATION_COUNTDOWN_STEPS {
            self.show(|fb| screens::draw_calibration_step(fb, step));
            if !self.wait(CALIBRATION_COUNTDOWN_MS) {
                return false;
            }
        }

        let calibration = match calibrate(&mut self.keyboard.tilt, &mut StdDelay, &CalibrationConfig::default()) {
            Ok(calibration) => calibration,
            Err(e) => {
                error!("Calibration failed: {e}");
                self.show(screens::draw_sensor_error);
                self.keyboard.buttons.any_pressed();
                return self.next_press().is_some();
            }
        };
        info!(
            "Calibrated: accel={:?} g, gyro={:?} dps",
            calibration.accel, calibration.gyro
        );

        self.show(screens::draw_calibrated);
        if !self.wait(CALIBRATED_HOLD_MS) {
            return false;
        }

        let mut session = Session::new(AnyGame::from(option), rng, calibration, self.now_ms());
        let period = Duration::from_millis(session.frame_period_ms());
        let mut reported = false;

        loop {
            let frame_start = Instant::now();
            if !self.pump() {
                return false;
            }

            let now_ms = self.now_ms();
            let Self {
                window,
                keyboard,
                buzzer,
                fb,
                ..
            } = self;
            match session.tick(now_ms, &mut keyboard.tilt, &mut keyboard.buttons, buzzer, fb, window) {
                Ok(Tick::Running) => {}
                Ok(Tick::Ended(screen)) => {
                    if !reported {
                        info!("{} ended: {screen:?}", option.label());
                        reported = true;
                    }
                }
                Ok(Tick::Exit) => return true,
                Err(e) => warn!("Frame not presented: {e}"),
            }

            if let Some(remaining) = period.checked_sub(frame_start.elapsed()) {
                thread::sleep(remaining);
            }
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut sim = Simulator {
        window: WindowTransport::new("Tiltbox"),
        keyboard: Keyboard::new(),
        buzzer: LogBuzzer::default(),
        fb: Framebuffer::new(),
        start: Instant::now(),
    };
    info!("Tiltbox simulator started. A/D/W/S tilt, J navigate, K select, F sensor failures");

    sim.buzzer.play(Cue::Boot);
    // The window opens on the first present
    sim.show(screens::draw_splash);
    if sim.next_press().is_none() {
        return;
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |since| since.as_nanos() as u64);
    let mut rng = XorShiftRng::seed_from_u64(seed);
    let mut menu = Menu::new();

    loop {
        sim.show(|fb| menu.draw(fb));

        let Some(event) = sim.next_press() else {
            break;
        };
        let Some(option) = menu.handle(event, &mut sim.buzzer) else {
            continue;
        };

        info!("Starting {}", option.label());
        if !sim.run_game(option, &mut rng) || !sim.wait(EXIT_DELAY_MS) {
            break;
        }
        sim.keyboard.buttons.any_pressed();
    }
    info!("Window closed, {} cues played", sim.buzzer.played());
}
