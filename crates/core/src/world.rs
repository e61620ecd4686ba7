//! The sparse world store: chunk-coordinate -> chunk, grown lazily as the
//! player approaches ungenerated regions and never shrunk within a session.

use std::collections::BTreeMap;

use crate::types::{ChunkCoord, PixelPos, TileKind};
use crate::worldgen::{
    BORDER_RADIUS, CHUNK_COLS, CHUNK_ROWS, Chunk, ChunkGenerator, ORIGIN_CHUNK, TILE_SIZE,
    is_border_chunk,
};

/// Result of one `ensure_around` call. `created == 0` means the store was
/// left untouched; `spawnable` lists only the new chunks that are eligible
/// for the enemy-spawn follow-up (created border chunks are stored but
/// excluded).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GrowthReport {
    pub created: u32,
    pub spawnable: Vec<ChunkCoord>,
}

pub struct World {
    world_seed: u64,
    generator: ChunkGenerator,
    chunks: BTreeMap<ChunkCoord, Chunk>,
}

impl World {
    /// A fresh world holds exactly the origin library chunk.
    pub fn new(world_seed: u64) -> Self {
        let generator = ChunkGenerator::new(world_seed);
        let mut chunks = BTreeMap::new();
        chunks.insert(ORIGIN_CHUNK, generator.generate(ORIGIN_CHUNK));
        Self { world_seed, generator, chunks }
    }

    pub fn world_seed(&self) -> u64 {
        self.world_seed
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// Generate any missing chunks in the 3x3 block around `center`.
    /// Coordinates past the border radius are skipped entirely: they are
    /// never generated and never stored.
    pub fn ensure_around(&mut self, center: ChunkCoord) -> GrowthReport {
        let mut report = GrowthReport::default();

        for dy in -1..=1 {
            for dx in -1..=1 {
                let target = ChunkCoord::new(center.x + dx, center.y + dy);
                if target.x.abs() > BORDER_RADIUS || target.y.abs() > BORDER_RADIUS {
                    continue;
                }
                if self.chunks.contains_key(&target) {
                    continue;
                }
                self.chunks.insert(target, self.generator.generate(target));
                report.created += 1;
                if !is_border_chunk(target) {
                    report.spawnable.push(target);
                }
            }
        }

        report
    }

    /// Look up the tile under a global tile coordinate; `None` while the
    /// owning chunk has not been generated.
    pub fn tile_at_global(&self, col: i32, row: i32) -> Option<TileKind> {
        let coord = ChunkCoord::new(
            col.div_euclid(CHUNK_COLS as i32),
            row.div_euclid(CHUNK_ROWS as i32),
        );
        let chunk = self.chunks.get(&coord)?;
        Some(chunk.tile(
            row.rem_euclid(CHUNK_ROWS as i32) as usize,
            col.rem_euclid(CHUNK_COLS as i32) as usize,
        ))
    }

    pub fn tile_at_pixel(&self, point: PixelPos) -> Option<TileKind> {
        let col = (point.x / TILE_SIZE).floor() as i32;
        let row = (point.y / TILE_SIZE).floor() as i32;
        self.tile_at_global(col, row)
    }

    /// Ungenerated terrain is not walkable.
    pub fn walkable_at(&self, point: PixelPos) -> bool {
        self.tile_at_pixel(point).is_some_and(TileKind::is_walkable)
    }

    pub fn chunk_of_pixel(point: PixelPos) -> ChunkCoord {
        let col = (point.x / TILE_SIZE).floor() as i32;
        let row = (point.y / TILE_SIZE).floor() as i32;
        ChunkCoord::new(col.div_euclid(CHUNK_COLS as i32), row.div_euclid(CHUNK_ROWS as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_world_holds_only_the_library() {
        let world = World::new(7);
        assert_eq!(world.chunk_count(), 1);
        assert!(world.contains(ORIGIN_CHUNK));
    }

    #[test]
    fn ensure_around_origin_creates_the_eight_neighbours() {
        let mut world = World::new(7);
        let report = world.ensure_around(ORIGIN_CHUNK);
        assert_eq!(report.created, 8);
        assert_eq!(report.spawnable.len(), 8);
        assert_eq!(world.chunk_count(), 9);
    }

    #[test]
    fn ensure_around_is_idempotent() {
        let mut world = World::new(7);
        world.ensure_around(ORIGIN_CHUNK);
        let second = world.ensure_around(ORIGIN_CHUNK);
        assert_eq!(second.created, 0);
        assert!(second.spawnable.is_empty());
        assert_eq!(world.chunk_count(), 9);
    }

    #[test]
    fn coordinates_past_the_border_are_never_stored() {
        let mut world = World::new(7);
        let corner = ChunkCoord::new(BORDER_RADIUS, BORDER_RADIUS);
        let report = world.ensure_around(corner);
        // Of the 3x3 block only the four in-range coordinates exist.
        assert_eq!(report.created, 4);
        for coord in world.coords() {
            assert!(coord.x.abs() <= BORDER_RADIUS && coord.y.abs() <= BORDER_RADIUS);
        }
    }

    #[test]
    fn border_chunks_are_stored_but_not_spawnable() {
        let mut world = World::new(7);
        let report = world.ensure_around(ChunkCoord::new(BORDER_RADIUS - 1, 0));
        assert!(world.contains(ChunkCoord::new(BORDER_RADIUS, 0)));
        assert!(!report.spawnable.iter().any(|&coord| is_border_chunk(coord)));
    }

    #[test]
    fn global_tile_lookup_spans_chunk_boundaries() {
        let mut world = World::new(7);
        world.ensure_around(ORIGIN_CHUNK);

        // Column -1 falls in chunk (-1, 0), local column CHUNK_COLS - 1.
        let west = world.tile_at_global(-1, 5).expect("west neighbour generated");
        let west_chunk = world.chunk(ChunkCoord::new(-1, 0)).expect("chunk");
        assert_eq!(west, west_chunk.tile(5, CHUNK_COLS - 1));

        // Ungenerated terrain reads as None.
        assert_eq!(world.tile_at_global(CHUNK_COLS as i32 * 3, 0), None);
    }

    #[test]
    fn pixel_helpers_agree_on_chunk_ownership() {
        let point = PixelPos::new(-10.0, 30.0);
        assert_eq!(World::chunk_of_pixel(point), ChunkCoord::new(-1, 0));
        let origin_point = PixelPos::new(10.0, 30.0);
        assert_eq!(World::chunk_of_pixel(origin_point), ORIGIN_CHUNK);
    }

    #[test]
    fn walkability_is_false_off_generated_terrain() {
        let world = World::new(7);
        assert!(!world.walkable_at(PixelPos::new(-10.0, 30.0)));
        // Inside the library hall, an open floor tile.
        assert!(world.walkable_at(PixelPos::new(425.0, 315.0)));
        // The north wall.
        assert!(!world.walkable_at(PixelPos::new(425.0, 10.0)));
    }
}
