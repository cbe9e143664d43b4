//! Buzzer stand-in: cues go to the log at debug level.

use log::debug;
use tiltbox::{Buzzer, Cue};

/// Logs every cue with its notes.
#[derive(Default)]
pub struct LogBuzzer {
    played: u32,
}

impl LogBuzzer {
    /// Cues heard so far.
    pub fn played(&self) -> u32 { self.played }
}

impl Buzzer for LogBuzzer {
    fn play(
        &mut self,
        cue: Cue,
    ) {
        self.played += 1;
        let notes: Vec<u32> = cue.tones().iter().map(|tone| tone.frequency_hz).collect();
        debug!("Cue {cue:?} ({} ms): {notes:?} Hz", cue.duration_ms());
    }
}
