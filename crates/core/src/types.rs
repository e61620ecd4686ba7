use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EnemyId;
}

/// Integer chunk coordinates. `(0, 0)` is the library hall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Continuous pixel position. Derived tile and chunk indices are always
/// computed on demand, never stored alongside.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelPos {
    pub x: f32,
    pub y: f32,
}

impl PixelPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Down,
    Up,
    Left,
    Right,
}

/// The fixed tile catalog. Every kind carries a stable wire code so chunks
/// can be fingerprinted and hand-authored layouts written as code grids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Floor,
    Wall,
    Grass1,
    Grass2,
    Grass3,
    Tree,
    Mountain,
    Bookshelf,
    RugCenter,
    RugTopLeft,
    RugTop,
    RugTopRight,
    RugLeft,
    RugRight,
    RugBottomLeft,
    RugBottom,
    RugBottomRight,
    /// Decorative wall variants, codes 40..=56. All of them block.
    WallEdge(u8),
}

impl TileKind {
    pub fn code(self) -> u8 {
        match self {
            Self::Floor => 0,
            Self::Wall => 1,
            Self::Grass1 => 2,
            Self::Grass2 => 3,
            Self::Grass3 => 4,
            Self::Tree => 5,
            Self::Mountain => 6,
            Self::Bookshelf => 19,
            Self::RugCenter => 20,
            Self::RugTopLeft => 21,
            Self::RugTop => 22,
            Self::RugTopRight => 23,
            Self::RugLeft => 24,
            Self::RugRight => 25,
            Self::RugBottomLeft => 26,
            Self::RugBottom => 27,
            Self::RugBottomRight => 28,
            Self::WallEdge(variant) => 40 + variant,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Floor),
            1 => Some(Self::Wall),
            2 => Some(Self::Grass1),
            3 => Some(Self::Grass2),
            4 => Some(Self::Grass3),
            5 => Some(Self::Tree),
            6 => Some(Self::Mountain),
            19 => Some(Self::Bookshelf),
            20 => Some(Self::RugCenter),
            21 => Some(Self::RugTopLeft),
            22 => Some(Self::RugTop),
            23 => Some(Self::RugTopRight),
            24 => Some(Self::RugLeft),
            25 => Some(Self::RugRight),
            26 => Some(Self::RugBottomLeft),
            27 => Some(Self::RugBottom),
            28 => Some(Self::RugBottomRight),
            40..=56 => Some(Self::WallEdge(code - 40)),
            _ => None,
        }
    }

    /// Walkability is derived from the kind, never stored: floor, grass and
    /// rug pieces are passable, everything else blocks movement.
    pub fn is_walkable(self) -> bool {
        matches!(
            self,
            Self::Floor
                | Self::Grass1
                | Self::Grass2
                | Self::Grass3
                | Self::RugCenter
                | Self::RugTopLeft
                | Self::RugTop
                | Self::RugTopRight
                | Self::RugLeft
                | Self::RugRight
                | Self::RugBottomLeft
                | Self::RugBottom
                | Self::RugBottomRight
        )
    }

    /// Rug pieces mark the interaction zone in front of the bookshelf.
    pub fn is_rug(self) -> bool {
        (20..=28).contains(&self.code())
    }
}

/// Append-only session event log kept by the simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    ChunksGenerated { center: ChunkCoord, created: u32 },
    EnemiesSpawned { chunk: ChunkCoord, count: u32 },
    EncounterStarted { enemy: EnemyId },
    EncounterWon { enemy: EnemyId },
    PlayerDefeated,
    ShelfOpened,
    ShelfClosed,
}
