use anyhow::Result;
use clap::Parser;
use game_core::movement::{InputFrame, hitbox_point};
use game_core::worldgen::{BORDER_RADIUS, ORIGIN_CHUNK, is_border_chunk};
use game_core::{Overlay, Sim, TileKind};
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 20_000)]
    ticks: u32,
}

/// Hold a random key combination for a stretch of ticks so the walk
/// actually covers ground instead of jittering in place.
fn next_frame_bits(rng: &mut ChaCha8Rng) -> InputFrame {
    let bits = rng.next_u64();
    InputFrame {
        up: bits & 1 != 0,
        down: bits & 2 != 0,
        left: bits & 4 != 0,
        right: bits & 8 != 0,
        interact: bits & 16 != 0,
        attack: bits & 32 != 0,
        cancel: bits & 64 != 0,
        spellbook: bits & 128 != 0,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    println!("Fuzzing the simulation on seed {} for {} ticks...", args.seed, args.ticks);

    let mut sim = Sim::new(args.seed);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut frame = InputFrame::default();
    let mut xp_awarded = 0u32;

    for tick in 0..args.ticks {
        if tick % 12 == 0 {
            frame = next_frame_bits(&mut rng);
        }
        for command in sim.tick(&frame) {
            let game_core::Command::AwardXp { amount } = command;
            xp_awarded += amount;
        }
        assert_invariants(&sim, tick);
    }

    println!(
        "Completed {} ticks: {} chunks, {} enemies alive, {} xp awarded, hash 0x{:016x}",
        args.ticks,
        sim.state().world.chunk_count(),
        sim.state().enemies.len(),
        xp_awarded,
        sim.snapshot_hash(),
    );
    Ok(())
}

fn assert_invariants(sim: &Sim, tick: u32) {
    let state = sim.state();

    for coord in state.world.coords() {
        assert!(
            coord.x.abs() <= BORDER_RADIUS && coord.y.abs() <= BORDER_RADIUS,
            "tick {tick}: chunk {coord:?} stored past the border radius"
        );
        if is_border_chunk(coord) {
            let chunk = state.world.chunk(coord).expect("listed chunk must exist");
            assert!(
                chunk.iter().all(|tile| tile == TileKind::Mountain),
                "tick {tick}: border chunk {coord:?} is not solid mountain"
            );
        }
    }

    for (_, enemy) in &state.enemies {
        assert_ne!(enemy.chunk, ORIGIN_CHUNK, "tick {tick}: enemy in the library");
        assert!(!is_border_chunk(enemy.chunk), "tick {tick}: enemy in the border ring");
        assert!(
            state.world.contains(enemy.chunk),
            "tick {tick}: enemy in an ungenerated chunk"
        );
    }

    assert!(
        state.world.walkable_at(hitbox_point(state.player.pos)),
        "tick {tick}: player hit-box on non-walkable terrain at {:?}",
        state.player.pos
    );

    if let Some(encounter) = sim.encounter() {
        let opponent = encounter.opponent();
        assert!(opponent.hp <= opponent.max_hp, "tick {tick}: enemy hp above max");
        assert!(opponent.hp >= 0, "tick {tick}: enemy hp below zero");
        assert!(encounter.player_hp() <= game_core::combat::PLAYER_MAX_HP);
    } else {
        assert!(
            state.overlay != Overlay::Combat,
            "tick {tick}: combat overlay with no encounter"
        );
    }
}
