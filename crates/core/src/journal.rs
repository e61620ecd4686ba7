//! In-memory input journal: the world seed plus every frame fed to the
//! simulation, in order. Enough to reproduce a session exactly.

use serde::{Deserialize, Serialize};

use crate::movement::InputFrame;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub world_seed: u64,
    pub frames: Vec<InputFrame>,
}

impl InputJournal {
    pub fn new(world_seed: u64) -> Self {
        Self { format_version: JOURNAL_FORMAT_VERSION, world_seed, frames: Vec::new() }
    }

    pub fn record(&mut self, frame: InputFrame) {
        self.frames.push(frame);
    }
}
