//! Session state owned by the simulation controller. No component outside
//! `Sim` mutates any of this directly.

use slotmap::SlotMap;

use crate::movement::PlayerState;
use crate::types::{ChunkCoord, EnemyId, PixelPos};
use crate::world::World;

/// A spawned, position-bound hostile entity outside of combat. Created in
/// batches when a chunk is generated, removed individually on victory,
/// otherwise untouched while on the overworld.
#[derive(Clone, Debug)]
pub struct OverworldEnemy {
    pub id: EnemyId,
    pub pos: PixelPos,
    pub chunk: ChunkCoord,
    pub level: u32,
}

/// Exactly one modal may be open; while any is, the movement loop is a
/// no-op and resumes when all close.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    None,
    Bookshelf,
    Spellbook,
    Combat,
}

pub struct GameState {
    pub player: PlayerState,
    pub world: World,
    pub enemies: SlotMap<EnemyId, OverworldEnemy>,
    pub overlay: Overlay,
}

impl GameState {
    pub fn new(world_seed: u64, player_start: PixelPos) -> Self {
        Self {
            player: PlayerState::at(player_start),
            world: World::new(world_seed),
            enemies: SlotMap::with_key(),
            overlay: Overlay::None,
        }
    }
}
