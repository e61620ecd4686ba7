//! The simulation controller: one owning struct, one `tick` entry point.
//! All shared mutable session state (player, world, enemies, overlay flags)
//! lives here and is only updated through these transition functions.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::combat::{AttackOutcome, Encounter, EncounterTick, Phase};
use crate::movement::{self, InputFrame};
use crate::state::{GameState, Overlay, OverworldEnemy};
use crate::types::{ChunkCoord, EnemyId, LogEvent, PixelPos};
use crate::world::World;
use crate::worldgen::{TILE_SIZE, spawn_rolls};

/// Center-to-center distance below which an overworld enemy pulls the
/// player into combat.
pub const ENCOUNTER_RADIUS: f32 = 40.0;

/// Spawn point inside the library hall.
pub const PLAYER_START: PixelPos = PixelPos::new(400.0, 275.0);

const SPRITE_CENTER: f32 = TILE_SIZE / 2.0;

/// Side effects the simulation asks its caller to perform. Callers may
/// apply or drop them; failures are theirs to log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    AwardXp { amount: u32 },
}

#[derive(Clone, Copy, Debug, Default)]
struct EdgeLatches {
    interact: bool,
    attack: bool,
    cancel: bool,
    spellbook: bool,
}

impl EdgeLatches {
    /// True exactly on the tick a key transitions from released to held.
    fn rising(latch: &mut bool, held: bool) -> bool {
        let fired = held && !*latch;
        *latch = held;
        fired
    }
}

pub struct Sim {
    world_seed: u64,
    tick: u64,
    rng: ChaCha8Rng,
    state: GameState,
    encounter: Option<Encounter>,
    /// Enemy ignored by the proximity check until distance is
    /// re-established, so dismissing a lost fight cannot instantly
    /// re-trigger it.
    suppressed_enemy: Option<EnemyId>,
    latches: EdgeLatches,
    log: Vec<LogEvent>,
}

impl Sim {
    pub fn new(world_seed: u64) -> Self {
        Self {
            world_seed,
            tick: 0,
            rng: ChaCha8Rng::seed_from_u64(world_seed),
            state: GameState::new(world_seed, PLAYER_START),
            encounter: None,
            suppressed_enemy: None,
            latches: EdgeLatches::default(),
            log: Vec::new(),
        }
    }

    pub fn world_seed(&self) -> u64 {
        self.world_seed
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    /// Advance one frame. Returns the commands the caller should carry out.
    pub fn tick(&mut self, input: &InputFrame) -> Vec<Command> {
        self.tick += 1;
        let mut commands = Vec::new();

        let interact = EdgeLatches::rising(&mut self.latches.interact, input.interact);
        let attack = EdgeLatches::rising(&mut self.latches.attack, input.attack);
        let cancel = EdgeLatches::rising(&mut self.latches.cancel, input.cancel);
        let spellbook = EdgeLatches::rising(&mut self.latches.spellbook, input.spellbook);

        match self.state.overlay {
            Overlay::None => self.overworld_tick(input, interact, spellbook),
            Overlay::Bookshelf => {
                if cancel {
                    self.state.overlay = Overlay::None;
                    self.log.push(LogEvent::ShelfClosed);
                }
            }
            Overlay::Spellbook => {
                if cancel {
                    self.state.overlay = Overlay::None;
                }
            }
            Overlay::Combat => self.combat_tick(attack, cancel, &mut commands),
        }

        commands
    }

    fn overworld_tick(&mut self, input: &InputFrame, interact: bool, spellbook: bool) {
        let result = movement::step(&self.state.world, &mut self.state.player, input);

        if result.moved {
            let center = World::chunk_of_pixel(self.state.player.pos);
            self.grow_world(center);
        }

        self.clear_suppression_if_separated();
        if let Some(enemy_id) = self.nearby_enemy() {
            self.begin_encounter(enemy_id);
            return;
        }

        if interact
            && let Some(tile) = movement::interact_tile(&self.state.world, self.state.player.pos)
            && tile.is_rug()
        {
            self.state.overlay = Overlay::Bookshelf;
            self.log.push(LogEvent::ShelfOpened);
            return;
        }

        if spellbook {
            self.state.overlay = Overlay::Spellbook;
        }
    }

    fn grow_world(&mut self, center: ChunkCoord) {
        let report = self.state.world.ensure_around(center);
        if report.created == 0 {
            return;
        }
        self.log.push(LogEvent::ChunksGenerated { center, created: report.created });
        for coord in report.spawnable {
            self.spawn_enemies_for(coord);
        }
    }

    fn spawn_enemies_for(&mut self, coord: ChunkCoord) {
        let rolls = spawn_rolls(self.world_seed, coord);
        if rolls.is_empty() {
            return;
        }
        self.log.push(LogEvent::EnemiesSpawned { chunk: coord, count: rolls.len() as u32 });
        for spawn in rolls {
            let id = self.state.enemies.insert(OverworldEnemy {
                id: EnemyId::default(), // overwritten below
                pos: spawn.pos,
                chunk: spawn.chunk,
                level: spawn.level,
            });
            self.state.enemies[id].id = id;
        }
    }

    fn player_center(&self) -> PixelPos {
        let pos = self.state.player.pos;
        PixelPos::new(pos.x + SPRITE_CENTER, pos.y + SPRITE_CENTER)
    }

    fn nearby_enemy(&self) -> Option<EnemyId> {
        let center = self.player_center();
        self.state
            .enemies
            .iter()
            .filter(|(id, _)| Some(*id) != self.suppressed_enemy)
            .find(|(_, enemy)| {
                let enemy_center =
                    PixelPos::new(enemy.pos.x + SPRITE_CENTER, enemy.pos.y + SPRITE_CENTER);
                center.distance(enemy_center) < ENCOUNTER_RADIUS
            })
            .map(|(id, _)| id)
    }

    fn clear_suppression_if_separated(&mut self) {
        let Some(enemy_id) = self.suppressed_enemy else {
            return;
        };
        let Some(enemy) = self.state.enemies.get(enemy_id) else {
            self.suppressed_enemy = None;
            return;
        };
        let enemy_center = PixelPos::new(enemy.pos.x + SPRITE_CENTER, enemy.pos.y + SPRITE_CENTER);
        if self.player_center().distance(enemy_center) >= ENCOUNTER_RADIUS {
            self.suppressed_enemy = None;
        }
    }

    fn begin_encounter(&mut self, enemy_id: EnemyId) {
        let level = self.state.enemies[enemy_id].level;
        self.encounter = Some(Encounter::start(enemy_id, level, &mut self.rng));
        self.state.overlay = Overlay::Combat;
        self.log.push(LogEvent::EncounterStarted { enemy: enemy_id });
    }

    fn combat_tick(&mut self, attack: bool, cancel: bool, commands: &mut Vec<Command>) {
        let Some(encounter) = &mut self.encounter else {
            self.state.overlay = Overlay::None;
            return;
        };

        if attack {
            match encounter.attack(&mut self.rng) {
                Ok(AttackOutcome::Victory { xp }) => {
                    commands.push(Command::AwardXp { amount: xp });
                    self.log.push(LogEvent::EncounterWon { enemy: encounter.enemy_id() });
                }
                // Off-turn presses do nothing, mirroring a disabled button.
                Ok(AttackOutcome::EnemyHit { .. }) | Err(_) => {}
            }
        }

        match encounter.tick(&mut self.rng) {
            EncounterTick::VictoryComplete => {
                let enemy_id = encounter.enemy_id();
                self.state.enemies.remove(enemy_id);
                self.encounter = None;
                self.state.overlay = Overlay::None;
            }
            EncounterTick::Defeated => {
                self.log.push(LogEvent::PlayerDefeated);
            }
            EncounterTick::Continue => {
                // Defeat never auto-closes; an explicit cancel dismisses it
                // and suppresses the enemy until the player breaks contact.
                if cancel && *encounter.phase() == Phase::Defeat {
                    self.suppressed_enemy = Some(encounter.enemy_id());
                    self.encounter = None;
                    self.state.overlay = Overlay::None;
                }
            }
        }
    }

    /// Stable digest of the canonical session state, for determinism tests
    /// and replay verification.
    pub fn snapshot_hash(&self) -> u64 {
        use std::hash::Hasher;
        use xxhash_rust::xxh3::Xxh3;

        let mut hasher = Xxh3::new();
        hasher.write_u64(self.world_seed);
        hasher.write_u64(self.tick);
        hasher.write_u32(self.state.player.pos.x.to_bits());
        hasher.write_u32(self.state.player.pos.y.to_bits());
        hasher.write_u8(self.state.player.facing as u8);
        hasher.write_u64(self.state.world.chunk_count() as u64);
        hasher.write_u64(self.state.enemies.len() as u64);
        hasher.write_u8(match self.state.overlay {
            Overlay::None => 0,
            Overlay::Bookshelf => 1,
            Overlay::Spellbook => 2,
            Overlay::Combat => 3,
        });
        if let Some(encounter) = &self.encounter {
            hasher.write_i32(encounter.player_hp());
            hasher.write_i32(encounter.opponent().hp);
            hasher.write_u64(encounter.log().len() as u64);
        }
        hasher.finish()
    }
}
