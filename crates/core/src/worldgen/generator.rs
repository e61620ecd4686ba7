//! Chunk generation: the constant library at the origin, a solid mountain
//! ring at the world border, weighted random terrain everywhere else.

use crate::types::{ChunkCoord, TileKind};

use super::library::library_chunk;
use super::model::Chunk;
use super::seed::{chunk_roll, derive_chunk_seed};
use super::{CHUNK_COLS, CHUNK_ROWS, ORIGIN_CHUNK, is_border_chunk};

pub struct ChunkGenerator {
    world_seed: u64,
}

impl ChunkGenerator {
    pub fn new(world_seed: u64) -> Self {
        Self { world_seed }
    }

    /// Total function of `(world_seed, coord)`; repeated calls for the same
    /// coordinate return byte-identical chunks.
    pub fn generate(&self, coord: ChunkCoord) -> Chunk {
        if coord == ORIGIN_CHUNK {
            return library_chunk();
        }

        if is_border_chunk(coord) {
            return Chunk::filled(TileKind::Mountain);
        }

        let chunk_seed = derive_chunk_seed(self.world_seed, coord);
        let mut chunk = Chunk::filled(TileKind::Grass3);
        for row in 0..CHUNK_ROWS {
            for col in 0..CHUNK_COLS {
                let cell_stream = (row * CHUNK_COLS + col) as u64;
                let roll = chunk_roll(chunk_seed, cell_stream, 0, 99);
                chunk.set_tile(row, col, terrain_for_roll(roll));
            }
        }
        chunk
    }
}

/// The fixed weighted categorical distribution over a 0..=99 roll:
/// 20% Grass1, 20% Grass2, 10% Tree, 5% Mountain, 45% Grass3.
fn terrain_for_roll(roll: usize) -> TileKind {
    if roll >= 80 {
        TileKind::Grass1
    } else if roll >= 60 {
        TileKind::Grass2
    } else if roll >= 50 {
        TileKind::Tree
    } else if roll >= 45 {
        TileKind::Mountain
    } else {
        TileKind::Grass3
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::worldgen::BORDER_RADIUS;

    #[test]
    fn origin_generation_is_constant_and_idempotent() {
        let first = ChunkGenerator::new(1).generate(ORIGIN_CHUNK);
        let again = ChunkGenerator::new(1).generate(ORIGIN_CHUNK);
        let other_seed = ChunkGenerator::new(999_999).generate(ORIGIN_CHUNK);
        assert_eq!(first.canonical_bytes(), again.canonical_bytes());
        assert_eq!(first.canonical_bytes(), other_seed.canonical_bytes());
    }

    #[test]
    fn border_chunks_are_uniform_mountain() {
        let generator = ChunkGenerator::new(777);
        for coord in [
            ChunkCoord::new(BORDER_RADIUS, 0),
            ChunkCoord::new(-BORDER_RADIUS, 4),
            ChunkCoord::new(3, BORDER_RADIUS),
            ChunkCoord::new(-2, -BORDER_RADIUS),
            ChunkCoord::new(BORDER_RADIUS, BORDER_RADIUS),
        ] {
            let chunk = generator.generate(coord);
            assert!(chunk.iter().all(|tile| tile == TileKind::Mountain), "coord {coord:?}");
        }
    }

    #[test]
    fn same_inputs_produce_byte_identical_terrain() {
        let coord = ChunkCoord::new(4, -6);
        let a = ChunkGenerator::new(123_456).generate(coord);
        let b = ChunkGenerator::new(123_456).generate(coord);
        assert_eq!(a.canonical_bytes(), b.canonical_bytes());
    }

    #[test]
    fn changing_seed_or_coordinate_changes_terrain() {
        let base = ChunkGenerator::new(11).generate(ChunkCoord::new(1, 1));
        let other_seed = ChunkGenerator::new(12).generate(ChunkCoord::new(1, 1));
        let other_coord = ChunkGenerator::new(11).generate(ChunkCoord::new(2, 1));
        assert_ne!(base, other_seed);
        assert_ne!(base, other_coord);
    }

    #[test]
    fn terrain_draws_only_from_the_overworld_palette() {
        let chunk = ChunkGenerator::new(42).generate(ChunkCoord::new(-3, 5));
        for tile in chunk.iter() {
            assert!(matches!(
                tile,
                TileKind::Grass1
                    | TileKind::Grass2
                    | TileKind::Grass3
                    | TileKind::Tree
                    | TileKind::Mountain
            ));
        }
    }

    #[test]
    fn terrain_distribution_roughly_matches_the_breakpoints() {
        let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
        for seed in 0..12u64 {
            let chunk = ChunkGenerator::new(seed).generate(ChunkCoord::new(2, 2));
            for tile in chunk.iter() {
                *counts.entry(tile.code()).or_default() += 1;
            }
        }
        let total = (12 * CHUNK_ROWS * CHUNK_COLS) as f64;
        let share = |code: u8| *counts.get(&code).unwrap_or(&0) as f64 / total;

        // Wide tolerances; this guards against swapped breakpoints, not noise.
        assert!((share(TileKind::Grass3.code()) - 0.45).abs() < 0.10);
        assert!((share(TileKind::Grass1.code()) - 0.20).abs() < 0.08);
        assert!((share(TileKind::Grass2.code()) - 0.20).abs() < 0.08);
        assert!((share(TileKind::Tree.code()) - 0.10).abs() < 0.06);
        assert!((share(TileKind::Mountain.code()) - 0.05).abs() < 0.05);
    }

    #[test]
    fn roll_breakpoints_map_to_expected_kinds() {
        assert_eq!(terrain_for_roll(99), TileKind::Grass1);
        assert_eq!(terrain_for_roll(80), TileKind::Grass1);
        assert_eq!(terrain_for_roll(79), TileKind::Grass2);
        assert_eq!(terrain_for_roll(60), TileKind::Grass2);
        assert_eq!(terrain_for_roll(59), TileKind::Tree);
        assert_eq!(terrain_for_roll(50), TileKind::Tree);
        assert_eq!(terrain_for_roll(49), TileKind::Mountain);
        assert_eq!(terrain_for_roll(45), TileKind::Mountain);
        assert_eq!(terrain_for_roll(44), TileKind::Grass3);
        assert_eq!(terrain_for_roll(0), TileKind::Grass3);
    }
}
