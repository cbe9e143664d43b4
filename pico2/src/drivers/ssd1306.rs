//! Blocking SSD1306 driver (128x64, I2C) used as the game display transport.
//!
//! The panel is configured for horizontal addressing, which matches the
//! framebuffer's page layout byte for byte. A frame is written by resetting
//! the column/page window and streaming all 1024 bytes after a single data
//! control byte.

use embedded_hal::i2c::{I2c, Operation};
use tiltbox::config::{PAGE_COUNT, SCREEN_HEIGHT, SCREEN_WIDTH};
use tiltbox::{DisplayTransport, Error};

/// Default 7-bit I2C address (SA0 low).
const ADDRESS: u8 = 0x3C;

// Control bytes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

// Commands
const DISPLAY_OFF: u8 = 0xAE;
const DISPLAY_ON: u8 = 0xAF;
const SET_CLOCK_DIV: u8 = 0xD5;
const SET_MULTIPLEX: u8 = 0xA8;
const SET_DISPLAY_OFFSET: u8 = 0xD3;
const SET_START_LINE: u8 = 0x40;
const CHARGE_PUMP: u8 = 0x8D;
const MEMORY_MODE: u8 = 0x20;
const SEGMENT_REMAP: u8 = 0xA1;
const COM_SCAN_DEC: u8 = 0xC8;
const SET_COM_PINS: u8 = 0xDA;
const SET_CONTRAST: u8 = 0x81;
const SET_PRECHARGE: u8 = 0xD9;
const SET_VCOM_DETECT: u8 = 0xDB;
const DISPLAY_RESUME: u8 = 0xA4;
const NORMAL_DISPLAY: u8 = 0xA6;
const DEACTIVATE_SCROLL: u8 = 0x2E;
const COLUMN_ADDRESS: u8 = 0x21;
const PAGE_ADDRESS: u8 = 0x22;

/// Power-up sequence: internal charge pump, horizontal addressing, rotated 180 degrees.
const INIT_SEQUENCE: &[u8] = &[
    DISPLAY_OFF,
    SET_CLOCK_DIV,
    0x80,
    SET_MULTIPLEX,
    (SCREEN_HEIGHT - 1) as u8,
    SET_DISPLAY_OFFSET,
    0x00,
    SET_START_LINE,
    CHARGE_PUMP,
    0x14,
    MEMORY_MODE,
    0x00,
    SEGMENT_REMAP,
    COM_SCAN_DEC,
    SET_COM_PINS,
    0x12,
    SET_CONTRAST,
    0xCF,
    SET_PRECHARGE,
    0xF1,
    SET_VCOM_DETECT,
    0x40,
    DISPLAY_RESUME,
    NORMAL_DISPLAY,
    DEACTIVATE_SCROLL,
    DISPLAY_ON,
];

/// Full-screen window, sent before every frame.
const FRAME_WINDOW: [u8; 6] = [
    COLUMN_ADDRESS,
    0,
    (SCREEN_WIDTH - 1) as u8,
    PAGE_ADDRESS,
    0,
    (PAGE_COUNT - 1) as u8,
];

pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Ssd1306<I2C> {
    pub const fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: ADDRESS,
        }
    }

    /// Run the power-up sequence and turn the panel on.
    pub fn init(&mut self) -> Result<(), Error> { self.commands(INIT_SEQUENCE) }

    /// Send commands one per transaction, each behind a command control byte.
    fn commands(
        &mut self,
        commands: &[u8],
    ) -> Result<(), Error> {
        for &command in commands {
            self.i2c
                .write(self.address, &[CONTROL_COMMAND, command])
                .map_err(|_| Error::Transport)?;
        }
        Ok(())
    }

    /// Release the bus handle.
    pub fn release(self) -> I2C { self.i2c }
}

impl<I2C: I2c> DisplayTransport for Ssd1306<I2C> {
    fn write(
        &mut self,
        buffer: &[u8],
    ) -> Result<(), Error> {
        self.commands(&FRAME_WINDOW)?;
        // Adjacent writes in one transaction go out as one I2C write
        self.i2c
            .transaction(self.address, &mut [Operation::Write(&[CONTROL_DATA]), Operation::Write(buffer)])
            .map_err(|_| Error::Transport)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
