//! Display geometry and framebuffer layout constants.
//!
//! The SSD1306 panel is organized in horizontal pages of 8 rows. Each byte of
//! a page holds one column of 8 vertically stacked pixels, LSB on top.

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (SSD1306 128x64 OLED).
pub const SCREEN_WIDTH: i32 = 128;

/// Display height in pixels.
pub const SCREEN_HEIGHT: i32 = 64;

/// Number of 8-row pages, `ceil(SCREEN_HEIGHT / 8)`.
pub const PAGE_COUNT: usize = (SCREEN_HEIGHT as usize).div_ceil(8);

/// Framebuffer size in bytes (one byte per column per page).
pub const BUFFER_SIZE: usize = SCREEN_WIDTH as usize * PAGE_COUNT;

/// Glyph cell edge in pixels (8x8 font).
pub const GLYPH_SIZE: i32 = 8;

// =============================================================================
// Pre-computed Layout Constants
// =============================================================================

/// Screen center X coordinate.
pub const CENTER_X: i32 = SCREEN_WIDTH / 2;

/// Screen center Y coordinate.
pub const CENTER_Y: i32 = SCREEN_HEIGHT / 2;

#[cfg(test)]
#[allow(clippy::assertions_on_constants)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_layout() {
        assert_eq!(PAGE_COUNT, 8);
        assert_eq!(BUFFER_SIZE, 1024);
    }

    #[test]
    fn test_text_row_fits_sixteen_glyphs() {
        assert_eq!(SCREEN_WIDTH / GLYPH_SIZE, 16);
    }
}
