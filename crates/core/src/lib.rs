pub mod combat;
pub mod journal;
pub mod journal_file;
pub mod library;
pub mod movement;
pub mod quiz;
pub mod replay;
pub mod sim;
pub mod state;
pub mod types;
pub mod world;
pub mod worldgen;

pub use combat::{Encounter, Opponent};
pub use journal::InputJournal;
pub use movement::InputFrame;
pub use replay::{ReplayResult, replay_to_end};
pub use sim::{Command, Sim};
pub use state::{GameState, Overlay, OverworldEnemy};
pub use types::*;
pub use world::World;
pub use worldgen::{BORDER_RADIUS, CHUNK_COLS, CHUNK_ROWS, Chunk, ChunkGenerator, TILE_SIZE};
