//! Game selection menu.
//!
//! Navigate moves the cursor (wrapping), Select launches the highlighted game.
//! Both play their menu cue.

use crate::config::{GLYPH_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::graphics::Framebuffer;
use crate::input::{Button, ButtonEvent};
use crate::sound::{Buzzer, Cue};

const FRAME_INSET: i32 = 2;
const HEADER_X: i32 = SCREEN_WIDTH / 2 - 20;
const HEADER_Y: i32 = 5;
const OPTIONS_X: i32 = 20;
const OPTIONS_Y: i32 = 20;
const OPTION_SPACING: i32 = 10;

/// Menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuOption {
    Dodge,
    TiltMaze,
}

impl MenuOption {
    pub const ALL: [Self; 2] = [Self::Dodge, Self::TiltMaze];

    /// Following entry, wrapping to the first.
    pub const fn next(self) -> Self {
        match self {
            Self::Dodge => Self::TiltMaze,
            Self::TiltMaze => Self::Dodge,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dodge => "DODGE",
            Self::TiltMaze => "TILT MAZE",
        }
    }
}

/// Cursor state of the menu screen.
pub struct Menu {
    selected: MenuOption,
}

impl Menu {
    pub const fn new() -> Self {
        Self {
            selected: MenuOption::Dodge,
        }
    }

    pub const fn selected(&self) -> MenuOption { self.selected }

    /// Apply a press. Returns the game to launch on Select.
    pub fn handle<Z: Buzzer>(
        &mut self,
        event: ButtonEvent,
        sound: &mut Z,
    ) -> Option<MenuOption> {
        match event.button {
            Button::Navigate => {
                self.selected = self.selected.next();
                sound.play(Cue::MenuNavigate);
                None
            }
            Button::Select => {
                sound.play(Cue::MenuSelect);
                Some(self.selected)
            }
        }
    }

    pub fn draw(
        &self,
        fb: &mut Framebuffer,
    ) {
        fb.draw_rect(
            FRAME_INSET,
            FRAME_INSET,
            SCREEN_WIDTH - 2 * FRAME_INSET,
            SCREEN_HEIGHT - 2 * FRAME_INSET,
            false,
        );
        fb.draw_string(HEADER_X, HEADER_Y, "GAMES");

        for (i, option) in MenuOption::ALL.into_iter().enumerate() {
            let y = OPTIONS_Y + i as i32 * OPTION_SPACING;
            let cursor = if option == self.selected { "> " } else { "  " };
            fb.draw_string(OPTIONS_X, y, cursor);
            fb.draw_string(OPTIONS_X + 2 * GLYPH_SIZE, y, option.label());
        }
    }
}

impl Default for Menu {
    fn default() -> Self { Self::new() }
}
