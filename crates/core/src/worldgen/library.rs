//! The hand-authored library hall occupying the origin chunk. The base
//! layout is a char map; the rug in front of the shelves is stamped on top
//! with its corner, edge and center pieces resolved by position.

use crate::types::TileKind;

use super::model::Chunk;
use super::{CHUNK_COLS, CHUNK_ROWS};

#[rustfmt::skip]
const HALL: [&str; CHUNK_ROWS] = [
    "##################",
    "#BBBBBBBBBBBBBBBB#",
    "#................#",
    "#................#",
    "#................#",
    "#................#",
    "#................#",
    "..................",
    "..................",
    "#................#",
    "#................#",
    "#................#",
    "#................#",
    "#................#",
    "#................#",
    "########..########",
];

const RUG_TOP: usize = 2;
const RUG_LEFT: usize = 7;
const RUG_ROWS: usize = 3;
const RUG_COLS: usize = 4;

pub(super) fn library_chunk() -> Chunk {
    let mut chunk = Chunk::filled(TileKind::Floor);
    for (row, line) in HALL.iter().enumerate() {
        for (col, glyph) in line.bytes().enumerate() {
            let kind = match glyph {
                b'#' => TileKind::Wall,
                b'B' => TileKind::Bookshelf,
                _ => TileKind::Floor,
            };
            chunk.set_tile(row, col, kind);
        }
    }
    stamp_rug(&mut chunk);
    chunk
}

fn stamp_rug(chunk: &mut Chunk) {
    for r in 0..RUG_ROWS {
        for c in 0..RUG_COLS {
            let top = r == 0;
            let bottom = r == RUG_ROWS - 1;
            let left = c == 0;
            let right = c == RUG_COLS - 1;
            let piece = match (top, bottom, left, right) {
                (true, _, true, _) => TileKind::RugTopLeft,
                (true, _, _, true) => TileKind::RugTopRight,
                (true, _, _, _) => TileKind::RugTop,
                (_, true, true, _) => TileKind::RugBottomLeft,
                (_, true, _, true) => TileKind::RugBottomRight,
                (_, true, _, _) => TileKind::RugBottom,
                (_, _, true, _) => TileKind::RugLeft,
                (_, _, _, true) => TileKind::RugRight,
                _ => TileKind::RugCenter,
            };
            chunk.set_tile(RUG_TOP + r, RUG_LEFT + c, piece);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hall_rows_span_the_chunk_width() {
        for line in HALL {
            assert_eq!(line.len(), CHUNK_COLS);
        }
    }

    #[test]
    fn shelves_line_the_north_wall() {
        let chunk = library_chunk();
        for col in 1..CHUNK_COLS - 1 {
            assert_eq!(chunk.tile(1, col), TileKind::Bookshelf);
        }
    }

    #[test]
    fn rug_pieces_resolve_by_position() {
        let chunk = library_chunk();
        assert_eq!(chunk.tile(RUG_TOP, RUG_LEFT), TileKind::RugTopLeft);
        assert_eq!(chunk.tile(RUG_TOP, RUG_LEFT + RUG_COLS - 1), TileKind::RugTopRight);
        assert_eq!(chunk.tile(RUG_TOP + RUG_ROWS - 1, RUG_LEFT), TileKind::RugBottomLeft);
        assert_eq!(
            chunk.tile(RUG_TOP + RUG_ROWS - 1, RUG_LEFT + RUG_COLS - 1),
            TileKind::RugBottomRight
        );
        assert_eq!(chunk.tile(RUG_TOP + 1, RUG_LEFT + 1), TileKind::RugCenter);
        assert_eq!(chunk.tile(RUG_TOP, RUG_LEFT + 1), TileKind::RugTop);
        assert_eq!(chunk.tile(RUG_TOP + 1, RUG_LEFT), TileKind::RugLeft);
    }

    #[test]
    fn every_rug_tile_is_walkable_and_in_rug_range() {
        let chunk = library_chunk();
        for r in 0..RUG_ROWS {
            for c in 0..RUG_COLS {
                let tile = chunk.tile(RUG_TOP + r, RUG_LEFT + c);
                assert!(tile.is_rug());
                assert!(tile.is_walkable());
            }
        }
    }

    #[test]
    fn hall_has_exits_on_west_east_and_south() {
        let chunk = library_chunk();
        assert!(chunk.tile(7, 0).is_walkable());
        assert!(chunk.tile(8, CHUNK_COLS - 1).is_walkable());
        assert!(chunk.tile(CHUNK_ROWS - 1, 8).is_walkable());
        assert!(chunk.tile(CHUNK_ROWS - 1, 9).is_walkable());
    }
}
