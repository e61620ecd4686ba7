//! The turn-based encounter state machine: player roll, scheduled enemy
//! turn, healer branch, and an append-only human-readable combat log.

use std::fmt;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

use crate::types::EnemyId;

pub const PLAYER_MAX_HP: i32 = 50;
/// Player damage is a uniform roll in this inclusive range.
pub const PLAYER_ROLL_MIN: i32 = 4;
pub const PLAYER_ROLL_MAX: i32 = 9;
pub const XP_PER_VICTORY: u32 = 2;

/// Ticks between the player's hit landing and the enemy acting. The
/// countdown is owned by the encounter, so leaving `Fighting` for any
/// reason cancels it.
pub const ENEMY_TURN_DELAY: u32 = 30;
/// Ticks the victory screen lingers before the overlay closes.
pub const VICTORY_LINGER: u32 = 90;

const HEAL_AMOUNT: i32 = 5;
const HEAL_CHANCE_PERCENT: u64 = 40;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Archetype {
    Melee,
    Range,
    Healer,
}

impl Archetype {
    pub const ALL: [Self; 3] = [Self::Melee, Self::Range, Self::Healer];
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Melee => "Melee",
            Self::Range => "Range",
            Self::Healer => "Healer",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Opponent {
    pub name: String,
    pub archetype: Archetype,
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub dmg: i32,
}

impl Opponent {
    /// Random archetype, stats derived from the level.
    pub fn goblin(level: u32, rng: &mut ChaCha8Rng) -> Self {
        let archetype = Archetype::ALL[(rng.next_u64() % 3) as usize];
        Self::goblin_of(archetype, level)
    }

    /// Base hp `20 + 5*level` and damage `2 + level`, scaled by the
    /// archetype multipliers and floored to integers.
    pub fn goblin_of(archetype: Archetype, level: u32) -> Self {
        let base_hp = 20.0 + level as f32 * 5.0;
        let base_dmg = 2.0 + level as f32;
        let (hp, dmg) = match archetype {
            Archetype::Melee => (base_hp * 1.5, base_dmg * 0.8),
            Archetype::Range => (base_hp * 0.7, base_dmg * 1.5),
            Archetype::Healer => (base_hp, base_dmg * 0.5),
        };
        let hp = hp.floor() as i32;
        Self {
            name: format!("Goblin {archetype}"),
            archetype,
            level,
            hp,
            max_hp: hp,
            dmg: dmg.floor() as i32,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Fighting,
    Victory { linger: u32 },
    Defeat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombatError {
    /// The encounter is already decided.
    NotFighting,
    /// The enemy turn is still pending; the player must wait it out.
    EnemyTurnPending,
}

impl fmt::Display for CombatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFighting => f.write_str("the encounter is already decided"),
            Self::EnemyTurnPending => f.write_str("the enemy turn is still pending"),
        }
    }
}

impl std::error::Error for CombatError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackOutcome {
    EnemyHit { damage: i32 },
    Victory { xp: u32 },
}

/// What one timer tick did to the encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncounterTick {
    Continue,
    /// The enemy turn just dropped the player to zero.
    Defeated,
    /// The victory linger expired; the caller closes the overlay and
    /// removes the overworld enemy.
    VictoryComplete,
}

#[derive(Clone, Debug)]
pub struct Encounter {
    enemy_id: EnemyId,
    opponent: Opponent,
    player_hp: i32,
    phase: Phase,
    pending_enemy_turn: Option<u32>,
    log: Vec<String>,
}

impl Encounter {
    pub fn start(enemy_id: EnemyId, level: u32, rng: &mut ChaCha8Rng) -> Self {
        Self::from_opponent(enemy_id, Opponent::goblin(level, rng))
    }

    pub fn from_opponent(enemy_id: EnemyId, opponent: Opponent) -> Self {
        let log = vec![format!("A wild {} appeared!", opponent.name)];
        Self {
            enemy_id,
            opponent,
            player_hp: PLAYER_MAX_HP,
            phase: Phase::Fighting,
            pending_enemy_turn: None,
            log,
        }
    }

    pub fn enemy_id(&self) -> EnemyId {
        self.enemy_id
    }

    pub fn opponent(&self) -> &Opponent {
        &self.opponent
    }

    pub fn player_hp(&self) -> i32 {
        self.player_hp
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn enemy_turn_pending(&self) -> bool {
        self.pending_enemy_turn.is_some()
    }

    /// The player's turn: a uniform damage roll against the opponent.
    pub fn attack(&mut self, rng: &mut ChaCha8Rng) -> Result<AttackOutcome, CombatError> {
        if self.phase != Phase::Fighting {
            return Err(CombatError::NotFighting);
        }
        if self.pending_enemy_turn.is_some() {
            return Err(CombatError::EnemyTurnPending);
        }

        let span = (PLAYER_ROLL_MAX - PLAYER_ROLL_MIN + 1) as u64;
        let damage = PLAYER_ROLL_MIN + (rng.next_u64() % span) as i32;
        self.opponent.hp -= damage;
        self.log.push(format!("You hit {} for {damage} dmg.", self.opponent.name));

        if self.opponent.hp <= 0 {
            self.opponent.hp = 0;
            self.log.push(format!("Victory! You defeated {}.", self.opponent.name));
            self.phase = Phase::Victory { linger: VICTORY_LINGER };
            return Ok(AttackOutcome::Victory { xp: XP_PER_VICTORY });
        }

        self.pending_enemy_turn = Some(ENEMY_TURN_DELAY);
        Ok(AttackOutcome::EnemyHit { damage })
    }

    /// Advance the encounter's timers by one tick.
    pub fn tick(&mut self, rng: &mut ChaCha8Rng) -> EncounterTick {
        match &mut self.phase {
            Phase::Victory { linger } => {
                if *linger > 0 {
                    *linger -= 1;
                }
                if *linger == 0 {
                    return EncounterTick::VictoryComplete;
                }
            }
            Phase::Defeat => {}
            Phase::Fighting => {
                if let Some(remaining) = &mut self.pending_enemy_turn {
                    if *remaining > 0 {
                        *remaining -= 1;
                    }
                    if *remaining == 0 {
                        self.pending_enemy_turn = None;
                        return self.enemy_turn(rng);
                    }
                }
            }
        }
        EncounterTick::Continue
    }

    fn enemy_turn(&mut self, rng: &mut ChaCha8Rng) -> EncounterTick {
        let heals = self.opponent.archetype == Archetype::Healer
            && (rng.next_u64() % 100) < HEAL_CHANCE_PERCENT;

        if heals {
            self.opponent.hp = (self.opponent.hp + HEAL_AMOUNT).min(self.opponent.max_hp);
            self.log.push(format!("{} healed itself for {HEAL_AMOUNT}.", self.opponent.name));
            return EncounterTick::Continue;
        }

        self.player_hp -= self.opponent.dmg;
        self.log.push(format!("{} hit you for {} dmg.", self.opponent.name, self.opponent.dmg));
        if self.player_hp <= 0 {
            self.log.push("You were defeated...".to_string());
            self.phase = Phase::Defeat;
            return EncounterTick::Defeated;
        }
        EncounterTick::Continue
    }
}
