//! Chunked terrain generation split into coherent submodules.

pub mod model;

mod generator;
mod library;
mod seed;
mod spawns;

pub use generator::ChunkGenerator;
pub use model::Chunk;
pub use seed::derive_chunk_seed;
pub use spawns::{EnemySpawn, spawn_rolls};

use crate::types::ChunkCoord;

pub const CHUNK_ROWS: usize = 16;
pub const CHUNK_COLS: usize = 18;
pub const TILE_SIZE: f32 = 50.0;

/// How many chunks out from the origin the player can walk.
pub const PLAYABLE_RADIUS: i32 = 7;
/// The chunk coordinate where the world ends, rendered as a ring of
/// impassable mountains one chunk past the playable area.
pub const BORDER_RADIUS: i32 = PLAYABLE_RADIUS + 1;

pub const ORIGIN_CHUNK: ChunkCoord = ChunkCoord::new(0, 0);

pub fn is_border_chunk(coord: ChunkCoord) -> bool {
    coord.x.abs() == BORDER_RADIUS || coord.y.abs() == BORDER_RADIUS
}

/// Convenience wrapper for one-off generation.
pub fn generate_chunk(world_seed: u64, coord: ChunkCoord) -> Chunk {
    ChunkGenerator::new(world_seed).generate(coord)
}
