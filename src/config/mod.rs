//! Application configuration.
//!
//! - `display`: Panel geometry and framebuffer layout
//! - `motion`: Sensor scales, dead zones and filter gains
//! - `timing`: Debounce, delays and screen hold durations

pub mod display;
pub mod motion;
pub mod timing;

// Re-export display constants at config level for convenience
pub use display::{
    BUFFER_SIZE,
    CENTER_X,
    CENTER_Y,
    GLYPH_SIZE,
    PAGE_COUNT,
    SCREEN_HEIGHT,
    SCREEN_WIDTH,
};
