//! Per-tick movement with axis-split collision against the walkability
//! predicate. Testing the horizontal and vertical components independently
//! yields wall sliding on diagonal input.

use serde::{Deserialize, Serialize};

use crate::types::{Facing, PixelPos, TileKind};
use crate::world::World;

pub const MOVE_SPEED: f32 = 2.5;
/// Walk-frame advance cadence, in ticks.
pub const ANIM_INTERVAL: u32 = 10;
pub const WALK_FRAMES: u32 = 10;

/// Collision samples at a hit-box point below and inset from the sprite
/// origin; interaction samples closer to the sprite's center.
const HITBOX_OFFSET_X: f32 = 25.0;
const HITBOX_OFFSET_Y: f32 = 40.0;
const INTERACT_OFFSET_X: f32 = 25.0;
const INTERACT_OFFSET_Y: f32 = 25.0;

/// One tick's worth of input. Movement keys are level-triggered (held);
/// `interact`, `attack`, `cancel` and `spellbook` are also reported as held
/// and edge-detected by the simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub interact: bool,
    pub attack: bool,
    pub cancel: bool,
    pub spellbook: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub pos: PixelPos,
    pub facing: Facing,
    pub walking: bool,
    pub frame: u32,
    anim_ticks: u32,
}

impl PlayerState {
    pub fn at(pos: PixelPos) -> Self {
        Self { pos, facing: Facing::default(), walking: false, frame: 0, anim_ticks: 0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepResult {
    pub moved: bool,
}

/// Advance the player one tick from held directional input.
pub fn step(world: &World, player: &mut PlayerState, input: &InputFrame) -> StepResult {
    let dx = i32::from(input.right) - i32::from(input.left);
    let dy = i32::from(input.down) - i32::from(input.up);

    // Vertical intent first, horizontal after: on a diagonal the horizontal
    // facing wins.
    if dy > 0 {
        player.facing = Facing::Down;
    } else if dy < 0 {
        player.facing = Facing::Up;
    }
    if dx > 0 {
        player.facing = Facing::Right;
    } else if dx < 0 {
        player.facing = Facing::Left;
    }

    if dx == 0 && dy == 0 {
        settle(player);
        return StepResult { moved: false };
    }

    let length = ((dx * dx + dy * dy) as f32).sqrt();
    let step_x = dx as f32 / length * MOVE_SPEED;
    let step_y = dy as f32 / length * MOVE_SPEED;

    let current = player.pos;
    let mut next = PixelPos::new(current.x + step_x, current.y + step_y);

    if !hitbox_walkable(world, next.x, current.y) {
        next.x = current.x;
    }
    if !hitbox_walkable(world, current.x, next.y) {
        next.y = current.y;
    }
    if !hitbox_walkable(world, next.x, next.y) {
        next = current;
    }

    let moved = next != current;
    player.pos = next;

    if moved {
        player.walking = true;
        player.anim_ticks += 1;
        if player.anim_ticks > ANIM_INTERVAL {
            player.frame = (player.frame + 1) % WALK_FRAMES;
            player.anim_ticks = 0;
        }
    } else {
        settle(player);
    }

    StepResult { moved }
}

fn settle(player: &mut PlayerState) {
    player.walking = false;
    player.frame = 0;
    player.anim_ticks = 0;
}

/// The collision sample point for a sprite at `pos`.
pub fn hitbox_point(pos: PixelPos) -> PixelPos {
    PixelPos::new(pos.x + HITBOX_OFFSET_X, pos.y + HITBOX_OFFSET_Y)
}

fn hitbox_walkable(world: &World, x: f32, y: f32) -> bool {
    world.walkable_at(hitbox_point(PixelPos::new(x, y)))
}

/// The tile under the interaction sample point, if generated.
pub fn interact_tile(world: &World, pos: PixelPos) -> Option<TileKind> {
    world.tile_at_pixel(PixelPos::new(pos.x + INTERACT_OFFSET_X, pos.y + INTERACT_OFFSET_Y))
}
