//! Buzzer cues.
//!
//! Menu and games report what happened as a [`Cue`]; the front end decides
//! how it sounds. The device plays each cue's [`Tone`] sequence on a PWM
//! pin, the simulator logs it.
//!
//! [`Buzzer::play`] must not block the game loop. Implementations queue the
//! cue and drop it when they fall behind.

/// Something worth a beep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cue {
    /// Rising chime once the hardware is up.
    Boot,
    /// Menu cursor moved.
    MenuNavigate,
    /// Menu entry chosen.
    MenuSelect,
    /// First frame of a new game.
    GameStart,
    /// Dodge: a block left the bottom of the screen.
    PointScored,
    /// Dodge: the player was hit.
    GameOver,
    /// Maze: the player moved one cell.
    Step,
    /// Maze: the exit was reached.
    Complete,
}

/// One square-wave note. A frequency of 0 is a rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

const fn tone(
    frequency_hz: u32,
    duration_ms: u32,
) -> Tone {
    Tone {
        frequency_hz,
        duration_ms,
    }
}

const BOOT: [Tone; 5] = [tone(800, 100), tone(0, 50), tone(1200, 150), tone(0, 50), tone(1600, 200)];
const MENU_NAVIGATE: [Tone; 1] = [tone(1000, 30)];
const MENU_SELECT: [Tone; 2] = [tone(1000, 40), tone(1500, 60)];
const LEVEL_UP: [Tone; 3] = [tone(523, 80), tone(659, 80), tone(784, 120)];
const POINT_SCORED: [Tone; 1] = [tone(1800, 40)];
const GAME_OVER: [Tone; 3] = [tone(400, 150), tone(300, 150), tone(200, 300)];
const STEP: [Tone; 1] = [tone(1000, 20)];
const COMPLETE: [Tone; 4] = [tone(784, 100), tone(988, 100), tone(1319, 100), tone(1568, 250)];

impl Cue {
    /// Notes to play, in order.
    pub const fn tones(self) -> &'static [Tone] {
        match self {
            Self::Boot => &BOOT,
            Self::MenuNavigate => &MENU_NAVIGATE,
            Self::MenuSelect => &MENU_SELECT,
            Self::GameStart => &LEVEL_UP,
            Self::PointScored => &POINT_SCORED,
            Self::GameOver => &GAME_OVER,
            Self::Step => &STEP,
            Self::Complete => &COMPLETE,
        }
    }

    /// Total length including rests.
    pub fn duration_ms(self) -> u32 { self.tones().iter().map(|t| t.duration_ms).sum() }
}

/// Sink for cues. Never blocks.
pub trait Buzzer {
    fn play(
        &mut self,
        cue: Cue,
    );
}

impl<Z: Buzzer + ?Sized> Buzzer for &mut Z {
    fn play(
        &mut self,
        cue: Cue,
    ) {
        (**self).play(cue);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
