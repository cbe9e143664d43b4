//! Bit-packed, page-addressed framebuffer for the 128x64 OLED.
//!
//! Pixel `(x, y)` lives in bit `y % 8` of byte `x + (y / 8) * SCREEN_WIDTH`,
//! which is the SSD1306 horizontal addressing layout, so the buffer can be
//! streamed to the panel without conversion.
//!
//! Every coordinate outside `[0, SCREEN_WIDTH) x [0, SCREEN_HEIGHT)` is a
//! silent no-op. Callers rely on this instead of clipping.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::config::{BUFFER_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::Error;

/// Sink for finished frames (display bus, simulator window, test recorder).
pub trait DisplayTransport {
    /// Send one full frame of `BUFFER_SIZE` page-addressed bytes.
    fn write(
        &mut self,
        buffer: &[u8],
    ) -> Result<(), Error>;
}

impl<T: DisplayTransport + ?Sized> DisplayTransport for &mut T {
    fn write(
        &mut self,
        buffer: &[u8],
    ) -> Result<(), Error> {
        (**self).write(buffer)
    }
}

/// Monochrome framebuffer, allocated once and reused for every frame.
pub struct Framebuffer {
    buffer: [u8; BUFFER_SIZE],
}

impl Framebuffer {
    /// Create a cleared framebuffer.
    pub const fn new() -> Self {
        Self {
            buffer: [0u8; BUFFER_SIZE],
        }
    }

    /// Turn every pixel off.
    #[inline]
    pub fn clear(&mut self) { self.buffer.fill(0); }

    /// Byte index and bit mask for an in-bounds pixel.
    #[inline]
    const fn locate(
        x: i32,
        y: i32,
    ) -> Option<(usize, u8)> {
        if x >= 0 && x < SCREEN_WIDTH && y >= 0 && y < SCREEN_HEIGHT {
            let page = (y / 8) as usize;
            let index = x as usize + page * SCREEN_WIDTH as usize;
            Some((index, 1 << (y % 8)))
        } else {
            None
        }
    }

    /// Set (`on = true`) or clear a pixel. Out-of-bounds coordinates are ignored.
    #[inline]
    pub fn set_pixel(
        &mut self,
        x: i32,
        y: i32,
        on: bool,
    ) {
        if let Some((index, mask)) = Self::locate(x, y) {
            if on {
                self.buffer[index] |= mask;
            } else {
                self.buffer[index] &= !mask;
            }
        }
    }

    /// Read a pixel back. Out-of-bounds coordinates read as off.
    #[inline]
    pub fn pixel(
        &self,
        x: i32,
        y: i32,
    ) -> bool {
        match Self::locate(x, y) {
            Some((index, mask)) => self.buffer[index] & mask != 0,
            None => false,
        }
    }

    /// Raw page-addressed bytes, in the order the panel expects them.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; BUFFER_SIZE] { &self.buffer }

    /// Number of lit pixels.
    #[cfg(test)]
    pub fn lit_count(&self) -> u32 { self.buffer.iter().map(|b| b.count_ones()).sum() }

    /// Hand the current frame to the display transport.
    ///
    /// This is the only call in the engine that can fail or block.
    pub fn present<T: DisplayTransport + ?Sized>(
        &self,
        transport: &mut T,
    ) -> Result<(), Error> {
        transport.write(&self.buffer)
    }
}

impl Default for Framebuffer {
    fn default() -> Self { Self::new() }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size { Size::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32) }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.buffer.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
