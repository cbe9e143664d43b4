//! Tiltbox firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Tilt-controlled games on a 128x64 SSD1306 OLED, steered by an MPU6050.
//!
//! # Architecture
//!
//! - Button tasks: Sample each button, debounce, push presses into a bounded channel
//! - Buzzer task: Play queued cues as PWM tones on GP16
//! - Main task: Splash, menu, then one game session at a time on a fixed-period ticker
//!
//! Display and sensor share I2C0 through `RefCellDevice`; only the main task
//! touches the bus.
//!
//! # Button Controls
//!
//! - **Navigate** (GP14): Move the menu cursor
//! - **Select** (GP15): Start the highlighted game
//! - Any button leaves the splash and end screens

#![no_std]
#![no_main]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]

use core::cell::RefCell;

use defmt::{debug, error, info, warn};
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::peripherals::I2C0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_time::{Delay, Duration, Instant, Ticker, Timer};
use embedded_hal_bus::i2c::RefCellDevice;
use rand_core::SeedableRng;
use rand_xorshift::XorShiftRng;
use static_cell::StaticCell;
use tiltbox::config::timing::{
    CALIBRATED_HOLD_MS, CALIBRATION_COUNTDOWN_MS, CALIBRATION_COUNTDOWN_STEPS, EXIT_DELAY_MS,
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
    DisplayTransport,
    Framebuffer,
    MotionSensor,
    calibrate,
    screens,
};
use tiltbox_pico2::buzzer::{pwm_top, square_wave};
use tiltbox_pico2::config::{BUTTON_POLL_MS, BUTTON_QUEUE_DEPTH, BUZZER_PWM_DIVIDER, CUE_QUEUE_DEPTH, I2C_FREQUENCY_HZ};
use tiltbox_pico2::drivers::{Mpu6050, Ssd1306};
use {defmt_rtt as _, panic_probe as _};

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"tiltbox"),
    embassy_rp::binary_info::rp_program_description!(c"Tilt games on SSD1306 + MPU6050"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

type Bus = I2c<'static, I2C0, Blocking>;

static I2C_BUS: StaticCell<RefCell<Bus>> = StaticCell::new();

// =============================================================================
// Buttons
// =============================================================================

/// Debounced presses from the button tasks to the main task.
static BUTTON_EVENTS: Channel<CriticalSectionRawMutex, ButtonEvent, BUTTON_QUEUE_DEPTH> = Channel::new();

/// Consumer end of [`BUTTON_EVENTS`].
struct ChannelButtons(Receiver<'static, CriticalSectionRawMutex, ButtonEvent, BUTTON_QUEUE_DEPTH>);

impl ButtonInput for ChannelButtons {
    fn poll_event(&mut self) -> Option<ButtonEvent> { self.0.try_receive().ok() }
}

impl ChannelButtons {
    /// Wait for the next press.
    async fn next(&mut self) -> ButtonEvent { self.0.receive().await }
}

/// Samples one active-low button and queues its debounced presses.
#[embassy_executor::task(pool_size = 2)]
async fn button_task(
    pin: Input<'static>,
    button: Button,
) {
    info!("Button task started: {}", button);
    let mut state = ButtonState::new();

    loop {
        let now = now_ms();
        if state.just_pressed(pin.is_low(), now) {
            let event = ButtonEvent {
                button,
                timestamp_ms: now,
            };
            if BUTTON_EVENTS.try_send(event).is_err() {
                warn!("Button queue full, dropped {}", button);
            }
        }
        Timer::after_millis(BUTTON_POLL_MS).await;
    }
}

// =============================================================================
// Buzzer
// =============================================================================

/// Cues from the main task to the buzzer task.
static CUES: Channel<CriticalSectionRawMutex, Cue, CUE_QUEUE_DEPTH> = Channel::new();

/// Producer end of [`CUES`]. Never waits for the buzzer.
struct ChannelBuzzer(Sender<'static, CriticalSectionRawMutex, Cue, CUE_QUEUE_DEPTH>);

impl Buzzer for ChannelBuzzer {
    fn play(
        &mut self,
        cue: Cue,
    ) {
        if self.0.try_send(cue).is_err() {
            warn!("Cue queue full, dropped {}", cue);
        }
    }
}

/// Plays queued cues one tone at a time, silent in between.
#[embassy_executor::task]
async fn buzzer_task(mut pwm: Pwm<'static>) {
    info!("Buzzer task started");
    let clock_hz = clk_sys_freq();
    let mut config = PwmConfig::default();
    config.divider = BUZZER_PWM_DIVIDER.into();

    loop {
        let cue = CUES.receive().await;
        debug!("Playing {}", cue);
        for tone in cue.tones() {
            let (top, compare) = square_wave(pwm_top(clock_hz, BUZZER_PWM_DIVIDER, tone.frequency_hz));
            config.top = top;
            config.compare_a = compare;
            pwm.set_config(&config);
            Timer::after_millis(u64::from(tone.duration_ms)).await;
        }
        config.compare_a = 0;
        pwm.set_config(&config);
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn now_ms() -> u64 { Instant::now().as_millis() }

/// Clear, draw one screen and present it. Transport errors are logged only.
fn show<T: DisplayTransport>(
    fb: &mut Framebuffer,
    display: &mut T,
    draw: impl FnOnce(&mut Framebuffer),
) {
    fb.clear();
    draw(fb);
    if let Err(e) = fb.present(display) {
        warn!("Display write failed: {}", e);
    }
}

/// Park the main task forever. Button tasks keep running.
async fn halt() -> ! {
    loop {
        Timer::after_secs(3600).await;
    }
}

// =============================================================================
// Game Flow
// =============================================================================

/// Calibrate, then run `option` until the player leaves its end screen.
async fn run_game<S: MotionSensor, T: DisplayTransport>(
    option: MenuOption,
    sensor: &mut S,
    display: &mut T,
    buttons: &mut ChannelButtons,
    buzzer: &mut ChannelBuzzer,
    fb: &mut Framebuffer,
    rng: &mut XorShiftRng,
) {
    for step in 0..CALIBRATION_COUNTDOWN_STEPS {
        show(fb, display, |fb| screens::draw_calibration_step(fb, step));
        Timer::after_millis(CALIBRATION_COUNTDOWN_MS).await;
    }

    // Blocks the executor for the whole sampling window
    let calibration = match calibrate(sensor, &mut Delay, &CalibrationConfig::default()) {
        Ok(calibration) => calibration,
        Err(e) => {
            error!("Calibration failed: {}", e);
            show(fb, display, screens::draw_sensor_error);
            buttons.any_pressed();
            buttons.next().await;
            return;
        }
    };
    info!(
        "Calibrated: accel=({}, {}, {}) g, gyro x={} dps",
        calibration.accel[0], calibration.accel[1], calibration.accel[2], calibration.gyro[0]
    );

    show(fb, display, screens::draw_calibrated);
    Timer::after_millis(CALIBRATED_HOLD_MS).await;

    let mut session = Session::new(AnyGame::from(option), rng, calibration, now_ms());
    let mut ticker = Ticker::every(Duration::from_millis(session.frame_period_ms()));
    let mut reported = false;

    loop {
        match session.tick(now_ms(), sensor, buttons, buzzer, fb, display) {
            Ok(Tick::Running) => {}
            Ok(Tick::Ended(screen)) => {
                if !reported {
                    info!("{} ended: {}", option.label(), screen);
                    reported = true;
                }
            }
            Ok(Tick::Exit) => break,
            Err(e) => warn!("Frame not presented: {}", e),
        }
        ticker.next().await;
    }
}

// =============================================================================
// Main
// =============================================================================

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("Tiltbox starting");

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let bus: &'static RefCell<Bus> = I2C_BUS.init(RefCell::new(I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config)));

    let mut display = Ssd1306::new(RefCellDevice::new(bus));
    let mut sensor = Mpu6050::new(RefCellDevice::new(bus));
    let mut fb = Framebuffer::new();

    if let Err(e) = display.init() {
        // Nothing to show the error on
        error!("SSD1306 init failed: {}", e);
        halt().await;
    }
    info!("SSD1306 initialized");

    if let Err(e) = sensor.init(&mut Delay) {
        error!("MPU6050 init failed: {}", e);
        show(&mut fb, &mut display, screens::draw_sensor_error);
        halt().await;
    }
    match sensor.read_temperature_c() {
        Ok(celsius) => info!("MPU6050 initialized, die temperature {} C", celsius),
        Err(e) => warn!("MPU6050 temperature read failed: {}", e),
    }

    // Initialize buttons (active-low with internal pull-up)
    let navigate = Input::new(p.PIN_14, Pull::Up);
    let select = Input::new(p.PIN_15, Pull::Up);
    spawner.spawn(button_task(navigate, Button::Navigate)).unwrap();
    spawner.spawn(button_task(select, Button::Select)).unwrap();
    let mut buttons = ChannelButtons(BUTTON_EVENTS.receiver());

    // Passive buzzer, silent until the first cue
    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, PwmConfig::default());
    spawner.spawn(buzzer_task(pwm)).unwrap();
    let mut buzzer = ChannelBuzzer(CUES.sender());
    buzzer.play(Cue::Boot);

    show(&mut fb, &mut display, screens::draw_splash);
    buttons.next().await;

    // Time to the first press is the only entropy source on this board
    let mut rng = XorShiftRng::seed_from_u64(Instant::now().as_ticks());
    let mut menu = Menu::new();

    loop {
        show(&mut fb, &mut display, |fb| menu.draw(fb));

        let event = buttons.next().await;
        let Some(option) = menu.handle(event, &mut buzzer) else {
            continue;
        };

        info!("Starting {}", option.label());
        run_game(option, &mut sensor, &mut display, &mut buttons, &mut buzzer, &mut fb, &mut rng).await;

        // Let go of the exit press before the menu listens again
        Timer::after_millis(EXIT_DELAY_MS).await;
        buttons.any_pressed();
    }
}
