//! Deterministic seed mixing and pseudo-random stream helpers for chunk
//! generation. Every draw is a pure function of `(seed, stream)`, so a chunk
//! regenerates identically for a given `(world_seed, coordinate)` pair.

use crate::types::ChunkCoord;

pub(super) fn chunk_roll(seed: u64, stream: u64, min_value: usize, max_value: usize) -> usize {
    debug_assert!(min_value <= max_value);
    let range_size = max_value - min_value + 1;
    min_value + (mix_seed_stream(seed, stream) as usize % range_size)
}

pub(super) fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

pub fn derive_chunk_seed(world_seed: u64, coord: ChunkCoord) -> u64 {
    let mut mixed = world_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= (coord.x as u32 as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= (coord.y as u32 as u64).wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}
