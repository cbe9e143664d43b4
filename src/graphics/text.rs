//! Fixed-pitch 8x8 text.

use super::Framebuffer;
use super::glyphs::glyph;
use crate::config::{GLYPH_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};

impl Framebuffer {
    /// Blit one glyph with its top-left corner at `(x, y)`.
    ///
    /// Only set bits are drawn; background pixels are left untouched.
    pub fn draw_char(
        &mut self,
        x: i32,
        y: i32,
        c: char,
    ) {
        // Off-panel cells are skipped whole, so the offsets below cannot overflow
        if x <= -GLYPH_SIZE || y <= -GLYPH_SIZE || x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return;
        }
        for (row, &bits) in glyph(c).iter().enumerate() {
            for col in 0..8 {
                if bits & (1 << col) != 0 {
                    self.set_pixel(x + col, y + row as i32, true);
                }
            }
        }
    }

    /// Draw `text` left to right on an 8 px pitch.
    ///
    /// No wrapping: drawing stops once the pen has moved past the right edge.
    pub fn draw_string(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
    ) {
        let mut pen = x;
        for c in text.chars() {
            self.draw_char(pen, y, c);
            match pen.checked_add(GLYPH_SIZE) {
                Some(next) if next < SCREEN_WIDTH => pen = next,
                _ => break,
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph_lit_count(c: char) -> u32 { glyph(c).iter().map(|row| row.count_ones()).sum() }

    #[test]
    fn test_draw_char_matches_glyph_bits() {
        let mut fb = Framebuffer::new();
        fb.draw_char(10, 20, 'A');
        let rows = glyph('A');
        for row in 0..8 {
            for col in 0..8 {
                let expected = rows[row as usize] & (1 << col) != 0;
                assert_eq!(fb.pixel(10 + col, 20 + row), expected, "A at col {col} row {row}");
            }
        }
        assert_eq!(fb.lit_count(), glyph_lit_count('A'));
    }

    #[test]
    fn test_draw_char_is_transparent() {
        let mut fb = Framebuffer::new();
        fb.draw_rect(0, 0, 8, 8, true);
        fb.draw_char(0, 0, ' ');
        assert_eq!(fb.lit_count(), 64);
    }

    #[test]
    fn test_draw_char_clips_at_edges() {
        let mut fb = Framebuffer::new();
        fb.draw_char(SCREEN_WIDTH - 4, SCREEN_HEIGHT - 4, '#');
        for y in 0..SCREEN_HEIGHT {
            for x in 0..SCREEN_WIDTH {
                if fb.pixel(x, y) {
                    assert!(x >= SCREEN_WIDTH - 4 && y >= SCREEN_HEIGHT - 4);
                }
            }
        }
        assert!(fb.lit_count() > 0);
    }

    #[test]
    fn test_draw_string_advances_eight_pixels() {
        let mut single = Framebuffer::new();
        single.draw_char(8, 0, 'B');

        let mut pair = Framebuffer::new();
        pair.draw_string(0, 0, "AB");

        for y in 0..8 {
            for x in 8..16 {
                assert_eq!(pair.pixel(x, y), single.pixel(x, y));
            }
        }
        assert_eq!(pair.lit_count(), glyph_lit_count('A') + glyph_lit_count('B'));
    }

    #[test]
    fn test_draw_string_of_spaces_is_blank() {
        let mut fb = Framebuffer::new();
        fb.draw_string(0, 0, "                ");
        fb.draw_string(5, 30, "   ");
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn test_draw_string_stops_at_right_edge() {
        let mut fb = Framebuffer::new();
        // 20 glyphs would need 160 px; only 16 fit
        fb.draw_string(0, 0, "####################");
        assert_eq!(fb.lit_count(), 16 * glyph_lit_count('#'));
    }

    #[test]
    fn test_draw_string_non_ascii_draws_nothing() {
        let mut fb = Framebuffer::new();
        fb.draw_string(0, 0, "é€");
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn test_draw_string_empty_is_noop() {
        let mut fb = Framebuffer::new();
        fb.draw_string(0, 0, "");
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn test_text_at_extreme_coordinates() {
        let mut fb = Framebuffer::new();
        fb.draw_string(i32::MAX - 4, 0, "AB");
        fb.draw_string(i32::MIN, i32::MIN, "AB");
        fb.draw_char(i32::MAX, i32::MAX, '#');
        fb.draw_char(0, i32::MIN, '#');
        assert_eq!(fb.lit_count(), 0);

        // Far left of the panel, the pen walks in until it overlaps
        fb.draw_string(-GLYPH_SIZE, 0, "#A");
        assert_eq!(fb.lit_count(), glyph_lit_count('A'));
    }
}
