//! Overworld enemy placement rolls for freshly generated chunks.

use crate::types::{ChunkCoord, PixelPos};

use super::seed::{chunk_roll, derive_chunk_seed};
use super::{CHUNK_COLS, CHUNK_ROWS, ORIGIN_CHUNK, TILE_SIZE, is_border_chunk};

const COUNT_STREAM: u64 = 500;
const COL_STREAM_BASE: u64 = 600;
const ROW_STREAM_BASE: u64 = 700;

pub const MAX_SPAWNS_PER_CHUNK: usize = 4;
pub const SPAWN_LEVEL: u32 = 1;

/// A spawn decision produced for a newly generated chunk. Identity is
/// assigned by the simulation when the enemy enters its slot map.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySpawn {
    pub chunk: ChunkCoord,
    pub pos: PixelPos,
    pub level: u32,
}

/// Deterministic per `(world_seed, coord)`: count uniform in 0..=4, each
/// position a random in-chunk cell with one tile of padding from the chunk
/// edges. Positions are not checked against the generated terrain, so a
/// spawn may land on a tree or mountain tile.
pub fn spawn_rolls(world_seed: u64, coord: ChunkCoord) -> Vec<EnemySpawn> {
    if coord == ORIGIN_CHUNK || is_border_chunk(coord) {
        return Vec::new();
    }

    let chunk_seed = derive_chunk_seed(world_seed, coord);
    let count = chunk_roll(chunk_seed, COUNT_STREAM, 0, MAX_SPAWNS_PER_CHUNK);

    (0..count)
        .map(|index| {
            let col = chunk_roll(chunk_seed, COL_STREAM_BASE + index as u64, 1, CHUNK_COLS - 2);
            let row = chunk_roll(chunk_seed, ROW_STREAM_BASE + index as u64, 1, CHUNK_ROWS - 2);
            let global_col = coord.x * CHUNK_COLS as i32 + col as i32;
            let global_row = coord.y * CHUNK_ROWS as i32 + row as i32;
            EnemySpawn {
                chunk: coord,
                pos: PixelPos::new(global_col as f32 * TILE_SIZE, global_row as f32 * TILE_SIZE),
                level: SPAWN_LEVEL,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worldgen::BORDER_RADIUS;

    #[test]
    fn origin_and_border_chunks_spawn_nothing() {
        for seed in [1u64, 99, 4_242] {
            assert!(spawn_rolls(seed, ORIGIN_CHUNK).is_empty());
            assert!(spawn_rolls(seed, ChunkCoord::new(BORDER_RADIUS, 2)).is_empty());
            assert!(spawn_rolls(seed, ChunkCoord::new(-1, -BORDER_RADIUS)).is_empty());
        }
    }

    #[test]
    fn rolls_are_deterministic_for_seed_and_coordinate() {
        let coord = ChunkCoord::new(3, -4);
        assert_eq!(spawn_rolls(2_024, coord), spawn_rolls(2_024, coord));
    }

    #[test]
    fn spawn_count_never_exceeds_the_cap() {
        for seed in 0..64u64 {
            for x in 1..4 {
                let spawns = spawn_rolls(seed, ChunkCoord::new(x, 2));
                assert!(spawns.len() <= MAX_SPAWNS_PER_CHUNK);
            }
        }
    }

    #[test]
    fn spawn_positions_respect_the_edge_padding() {
        for seed in 0..64u64 {
            let coord = ChunkCoord::new(-2, 3);
            for spawn in spawn_rolls(seed, coord) {
                let local_col =
                    (spawn.pos.x / TILE_SIZE) as i32 - coord.x * CHUNK_COLS as i32;
                let local_row =
                    (spawn.pos.y / TILE_SIZE) as i32 - coord.y * CHUNK_ROWS as i32;
                assert!((1..=CHUNK_COLS as i32 - 2).contains(&local_col));
                assert!((1..=CHUNK_ROWS as i32 - 2).contains(&local_row));
                assert_eq!(spawn.chunk, coord);
                assert_eq!(spawn.level, SPAWN_LEVEL);
            }
        }
    }

    #[test]
    fn some_chunk_in_a_small_sweep_spawns_enemies() {
        // Count is uniform over {0..4}; across a 5x5 sweep at least one
        // chunk rolling zero every time would mean the stream is broken.
        let mut total = 0;
        for x in 1..6 {
            for y in 1..6 {
                total += spawn_rolls(31_337, ChunkCoord::new(x, y)).len();
            }
        }
        assert!(total > 0);
    }
}
