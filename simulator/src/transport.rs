//! Simulator window as an SSD1306 stand-in.
//!
//! Receives the same page-addressed bytes the panel would and decodes them
//! back into pixels, so what the window shows is exactly what was sent.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    BinaryColorTheme, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use tiltbox::config::{BUFFER_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};
use tiltbox::{DisplayTransport, Error};

/// Window pixels per panel pixel.
const SCALE: u32 = 4;

/// Expand a page-addressed buffer into pixels. Bit `n` of byte
/// `page * width + x` is pixel `(x, page * 8 + n)`.
pub fn decode(buffer: &[u8]) -> impl Iterator<Item = Pixel<BinaryColor>> + '_ {
    let width = SCREEN_WIDTH as usize;
    buffer.iter().enumerate().flat_map(move |(index, &byte)| {
        let x = (index % width) as i32;
        let page_top = (index / width) as i32 * 8;
        (0..8).map(move |bit| {
            let color = if byte & (1 << bit) != 0 { BinaryColor::On } else { BinaryColor::Off };
            Pixel(Point::new(x, page_top + bit), color)
        })
    })
}

pub struct WindowTransport {
    display: SimulatorDisplay<BinaryColor>,
    window: Window,
}

impl WindowTransport {
    pub fn new(title: &str) -> Self {
        let settings = OutputSettingsBuilder::new()
            .theme(BinaryColorTheme::OledBlue)
            .scale(SCALE)
            .build();
        Self {
            display: SimulatorDisplay::new(Size::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)),
            window: Window::new(title, &settings),
        }
    }

    /// Pending window events. Only valid after the first frame was written.
    pub fn events(&mut self) -> Vec<SimulatorEvent> { self.window.events().collect() }
}

impl DisplayTransport for WindowTransport {
    fn write(
        &mut self,
        buffer: &[u8],
    ) -> Result<(), Error> {
        if buffer.len() != BUFFER_SIZE {
            return Err(Error::Transport);
        }
        self.display
            .draw_iter(decode(buffer))
            .map_err(|_| Error::Transport)?;
        self.window.update(&self.display);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tiltbox::Framebuffer;

    use super::*;

    #[test]
    fn test_decode_matches_framebuffer() {
        let mut fb = Framebuffer::new();
        fb.draw_rect(3, 5, 20, 11, false);
        fb.draw_string(40, 30, "TILT");
        fb.set_pixel(127, 63, true);

        let mut display: SimulatorDisplay<BinaryColor> =
            SimulatorDisplay::new(Size::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32));
        display.draw_iter(decode(fb.as_bytes())).unwrap();

        for y in 0..SCREEN_HEIGHT {
            for x in 0..SCREEN_WIDTH {
                let lit = display.get_pixel(Point::new(x, y)) == BinaryColor::On;
                assert_eq!(lit, fb.pixel(x, y), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_decode_covers_whole_panel() {
        let buffer = [0u8; BUFFER_SIZE];
        let pixels: Vec<_> = decode(&buffer).collect();
        assert_eq!(pixels.len(), (SCREEN_WIDTH * SCREEN_HEIGHT) as usize);
        assert!(pixels.iter().all(|Pixel(_, color)| *color == BinaryColor::Off));
        assert_eq!(pixels.last().map(|Pixel(point, _)| *point), Some(Point::new(127, 63)));
    }
}
