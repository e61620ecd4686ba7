use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use game_core::combat::{
    Archetype, AttackOutcome, CombatError, ENEMY_TURN_DELAY, EncounterTick, Opponent, Phase,
    PLAYER_ROLL_MAX, PLAYER_ROLL_MIN, XP_PER_VICTORY,
};
use game_core::{Encounter, EnemyId};

/// Drive the pending enemy turn to resolution, if one is scheduled.
fn settle_enemy_turn(encounter: &mut Encounter, rng: &mut ChaCha8Rng) {
    while encounter.enemy_turn_pending() {
        encounter.tick(rng);
    }
}

#[test]
fn a_level_one_fight_ends_in_exactly_one_victory_and_one_xp_award() {
    for seed in [1u64, 2, 3, 77, 2_024] {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut encounter = Encounter::start(EnemyId::default(), 1, &mut rng);

        let mut awards = 0u32;
        // A level-1 opponent cannot outlast 50 hp against 4..=9 rolls, so
        // this loop always terminates in a victory.
        for _ in 0..200 {
            match encounter.attack(&mut rng) {
                Ok(AttackOutcome::Victory { xp }) => {
                    assert_eq!(xp, XP_PER_VICTORY);
                    awards += 1;
                    break;
                }
                Ok(AttackOutcome::EnemyHit { damage }) => {
                    assert!((PLAYER_ROLL_MIN..=PLAYER_ROLL_MAX).contains(&damage));
                    settle_enemy_turn(&mut encounter, &mut rng);
                }
                Err(CombatError::EnemyTurnPending) => {
                    settle_enemy_turn(&mut encounter, &mut rng);
                }
                Err(CombatError::NotFighting) => break,
            }
        }

        assert_eq!(awards, 1, "seed {seed}");
        let victory_lines =
            encounter.log().iter().filter(|line| line.starts_with("Victory!")).count();
        assert_eq!(victory_lines, 1, "seed {seed}");
        assert_eq!(encounter.opponent().hp, 0, "seed {seed}");
        assert!(matches!(encounter.phase(), Phase::Victory { .. }), "seed {seed}");
    }
}

#[test]
fn dropping_to_exactly_zero_is_a_victory_not_an_enemy_turn() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut opponent = Opponent::goblin_of(Archetype::Range, 1);
    opponent.hp = PLAYER_ROLL_MIN;
    opponent.max_hp = PLAYER_ROLL_MIN;
    let mut encounter = Encounter::from_opponent(EnemyId::default(), opponent);

    // Whatever the roll, hp lands at or below zero.
    let outcome = encounter.attack(&mut rng).expect("attack is legal");
    assert!(matches!(outcome, AttackOutcome::Victory { .. }));
    assert!(!encounter.enemy_turn_pending(), "no enemy turn may follow a victory");

    // The scheduled-turn timer stays quiet afterwards.
    let player_hp = encounter.player_hp();
    for _ in 0..ENEMY_TURN_DELAY * 2 {
        let tick = encounter.tick(&mut rng);
        assert_ne!(tick, EncounterTick::Defeated);
    }
    assert_eq!(encounter.player_hp(), player_hp);
}

#[test]
fn melee_out_tanks_range_and_healer_hits_softest() {
    for level in [1u32, 2, 5, 10] {
        let melee = Opponent::goblin_of(Archetype::Melee, level);
        let range = Opponent::goblin_of(Archetype::Range, level);
        let healer = Opponent::goblin_of(Archetype::Healer, level);

        assert!(melee.hp > range.hp);
        assert!(healer.dmg < melee.dmg);
        assert!(healer.dmg < range.dmg);
    }
}

#[test]
fn healer_output_over_many_exchanges_stays_below_melee_output() {
    let exchanges = 400;

    let output_of = |archetype: Archetype, seed: u64| -> i64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut dealt = 0i64;
        for _ in 0..exchanges {
            // A fresh opponent per exchange keeps both sides alive.
            let mut encounter = Encounter::from_opponent(
                EnemyId::default(),
                Opponent::goblin_of(archetype, 1),
            );
            let before = encounter.player_hp();
            if matches!(encounter.attack(&mut rng), Ok(AttackOutcome::EnemyHit { .. })) {
                settle_enemy_turn(&mut encounter, &mut rng);
            }
            dealt += i64::from(before - encounter.player_hp());
        }
        dealt
    };

    let healer_total = output_of(Archetype::Healer, 55);
    let melee_total = output_of(Archetype::Melee, 55);
    assert!(
        healer_total < melee_total,
        "healer dealt {healer_total}, melee dealt {melee_total}"
    );
}
