//! Monochrome framebuffer engine.
//!
//! - `framebuffer`: Page-addressed pixel buffer, presentation and `DrawTarget` support
//! - `primitives`: Bresenham lines, rectangles and midpoint circles
//! - `text`: 8x8 character and string blitting
//! - `glyphs`: Static basic-Latin glyph table
//!
//! # Architecture
//!
//! Drawing and presentation are split the same way a double-buffered display
//! driver splits rendering from flushing:
//! - [`Framebuffer`]: Owns the pixels, all drawing calls mutate it, never touches hardware
//! - [`DisplayTransport`]: Owns the bus, receives the finished buffer in [`Framebuffer::present`]
//!
//! The engine never presents on its own; the game loop calls `present()` once
//! per frame after its batch of draw calls.

mod framebuffer;
pub mod glyphs;
mod primitives;
mod text;

pub use framebuffer::{DisplayTransport, Framebuffer};
