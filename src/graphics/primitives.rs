//! Integer rasterization of lines, rectangles and circles.
//!
//! All primitives go through [`Framebuffer::set_pixel`], so clipping is free.
//! Pixels are binary, which makes overdraw (rectangle corners, circle octant
//! seams) harmless. Coordinate math is widened past `i32`, so far off-panel
//! input never overflows, and each primitive skips the steps that cannot
//! land on the panel.

use super::Framebuffer;
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Offsets `k` in `0..=len` for which `start + sign * k` lies in `0..limit`.
fn visible_steps(
    start: i64,
    sign: i64,
    len: i64,
    limit: i64,
) -> (i64, i64) {
    if sign > 0 {
        ((-start).max(0), len.min(limit - 1 - start))
    } else {
        ((start - limit + 1).max(0), len.min(start))
    }
}

/// Distances from `c` to the nearest and farthest of `0..len`.
fn axis_reach(
    c: i64,
    len: i64,
) -> (i64, i64) {
    let near = if c < 0 {
        -c
    } else {
        (c - (len - 1)).max(0)
    };
    (near, c.abs().max((len - 1 - c).abs()))
}

/// Narrow a widened coordinate, saturating far off-panel values.
fn saturate(v: i64) -> i32 { v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32 }

impl Framebuffer {
    /// Draw a line with integer Bresenham stepping.
    ///
    /// Steps one axis at a time (`1 + |dx| + |dy|` pixels), so consecutive
    /// pixels are always 4-connected. Both endpoints are drawn; a degenerate
    /// line draws a single pixel.
    ///
    /// The walk steps X whenever `(2b + 1)|dx| > (2a + 1)|dy|` after `a` X
    /// steps and `b` Y steps. That gives every column `a` a closed row span,
    /// so only the on-panel columns and rows are visited.
    pub fn draw_line(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    ) {
        let (x0, y0, x1, y1) = (i64::from(x0), i64::from(y0), i64::from(x1), i64::from(y1));
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let x_inc = if x1 > x0 { 1 } else { -1 };
        let y_inc = if y1 > y0 { 1 } else { -1 };

        let (first_col, last_col) = visible_steps(x0, x_inc, dx, i64::from(SCREEN_WIDTH));
        let (first_row, last_row) = visible_steps(y0, y_inc, dy, i64::from(SCREEN_HEIGHT));
        if first_col > last_col || first_row > last_row {
            return;
        }

        // Last row reached in column `a` before the X step
        let column_end = |a: i64| -> i64 {
            if dx == 0 {
                return dy;
            }
            let (a, dx, dy) = (i128::from(a), i128::from(dx), i128::from(dy));
            let end = ((2 * a + 1) * dy - dx).div_euclid(2 * dx) + 1;
            end.min(dy) as i64
        };

        for a in first_col..=last_col {
            let start = if a == 0 { 0 } else { column_end(a - 1) };
            let end = column_end(a);
            let x = (x0 + x_inc * a) as i32;
            for b in start.max(first_row)..=end.min(last_row) {
                self.set_pixel(x, (y0 + y_inc * b) as i32, true);
            }
        }
    }

    /// Draw the half-open rectangle `[x, x+w) x [y, y+h)`.
    ///
    /// Outline mode draws the four boundary lines, so the outline is always a
    /// subset of the filled rectangle. Empty sizes draw nothing.
    pub fn draw_rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        filled: bool,
    ) {
        if w <= 0 || h <= 0 {
            return;
        }
        let right = i64::from(x) + i64::from(w) - 1;
        let bottom = i64::from(y) + i64::from(h) - 1;
        if right < 0 || bottom < 0 || x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return;
        }

        if filled {
            let (left, top) = (x.max(0), y.max(0));
            let right = right.min(i64::from(SCREEN_WIDTH - 1)) as i32;
            let bottom = bottom.min(i64::from(SCREEN_HEIGHT - 1)) as i32;
            for i in left..=right {
                for j in top..=bottom {
                    self.set_pixel(i, j, true);
                }
            }
        } else {
            // Edges are axis-aligned, so saturating the far corner keeps every visible pixel
            let (right, bottom) = (saturate(right), saturate(bottom));
            self.draw_line(x, y, right, y);
            self.draw_line(x, bottom, right, bottom);
            self.draw_line(x, y, x, bottom);
            self.draw_line(right, y, right, bottom);
        }
    }

    /// Draw a circle of radius `r` around `(cx, cy)` with the midpoint algorithm.
    ///
    /// Outline mode plots the 8 symmetric points of every step. Filled mode
    /// draws four horizontal spans per step instead, pairing the octants that
    /// share a row. A radius of 0 draws the center pixel; negative radii draw
    /// nothing.
    pub fn draw_circle(
        &mut self,
        cx: i32,
        cy: i32,
        r: i32,
        filled: bool,
    ) {
        let (cx, cy, r) = (i64::from(cx), i64::from(cy), i64::from(r));
        let (width, height) = (i64::from(SCREEN_WIDTH), i64::from(SCREEN_HEIGHT));
        if r < 0 || cx + r < 0 || cy + r < 0 || cx - r >= width || cy - r >= height {
            return;
        }
        let (near_x, far_x) = axis_reach(cx, width);
        let (near_y, far_y) = axis_reach(cy, height);

        let plot = |fb: &mut Self, x: i64, y: i64| fb.set_pixel(saturate(x), saturate(y), true);
        let span = |fb: &mut Self, x0: i64, x1: i64, y: i64| {
            if (0..height).contains(&y) {
                fb.draw_line(saturate(x0), y as i32, saturate(x1), y as i32);
            }
        };

        // Steps with a smaller offset miss the panel. The walk first reaches
        // row `y` at column isqrt(r^2 - y^2 - 2y), with `err` tracking
        // x^2 + y^2 + 2y - r^2.
        let mut y = near_x.min(near_y);
        let Some(mut x) = (r * r - y * y - 2 * y).checked_isqrt() else {
            return;
        };
        let mut err = x * x + y * y + 2 * y - r * r;
        // Past this offset every point, or every span row, is off the panel
        let last = if filled { far_y } else { far_x.min(far_y) };

        while x >= y && y <= last {
            if filled {
                span(self, cx - x, cx + x, cy + y);
                span(self, cx - x, cx + x, cy - y);
                span(self, cx - y, cx + y, cy + x);
                span(self, cx - y, cx + y, cy - x);
            } else {
                plot(self, cx + x, cy + y);
                plot(self, cx + y, cy + x);
                plot(self, cx - y, cy + x);
                plot(self, cx - x, cy + y);
                plot(self, cx - x, cy - y);
                plot(self, cx - y, cy - x);
                plot(self, cx + y, cy - x);
                plot(self, cx + x, cy - y);
            }

            if err <= 0 {
                y += 1;
                err += 2 * y + 1;
            }
            if err > 0 {
                x -= 1;
                err -= 2 * x + 1;
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
