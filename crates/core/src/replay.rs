//! Deterministic replay: feed a journal through a fresh simulation and
//! summarize where it ended up.

use crate::journal::InputJournal;
use crate::sim::{Command, Sim};
use crate::types::LogEvent;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_tick: u64,
    pub snapshot_hash: u64,
    pub chunks_generated: usize,
    pub encounters_won: u32,
    pub xp_awarded: u32,
}

pub fn replay_to_end(journal: &InputJournal) -> ReplayResult {
    let mut sim = Sim::new(journal.world_seed);
    let mut xp_awarded = 0;

    for frame in &journal.frames {
        for command in sim.tick(frame) {
            let Command::AwardXp { amount } = command;
            xp_awarded += amount;
        }
    }

    let encounters_won = sim
        .log()
        .iter()
        .filter(|event| matches!(event, LogEvent::EncounterWon { .. }))
        .count() as u32;

    ReplayResult {
        final_tick: sim.current_tick(),
        snapshot_hash: sim.snapshot_hash(),
        chunks_generated: sim.state().world.chunk_count(),
        encounters_won,
        xp_awarded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::InputFrame;

    fn walking_journal(seed: u64, ticks: usize) -> InputJournal {
        let mut journal = InputJournal::new(seed);
        for _ in 0..ticks {
            journal.record(InputFrame { down: true, ..InputFrame::default() });
        }
        journal
    }

    #[test]
    fn identical_journals_replay_to_identical_results() {
        let journal = walking_journal(31_415, 90);
        assert_eq!(replay_to_end(&journal), replay_to_end(&journal));
    }

    #[test]
    fn replay_counts_every_frame() {
        let journal = walking_journal(1, 25);
        let result = replay_to_end(&journal);
        assert_eq!(result.final_tick, 25);
        assert!(result.chunks_generated >= 9);
    }
}
