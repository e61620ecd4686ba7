use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use game_core::journal_file::load_journal;
use game_core::replay::replay_to_end;
use game_core::worldgen::{self, CHUNK_COLS, CHUNK_ROWS};
use game_core::{ChunkCoord, TileKind};

#[derive(Parser)]
#[command(author, version, about = "Inspection tools for the world simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded session journal and print its final digest
    Replay {
        #[arg(short, long)]
        journal: PathBuf,
    },
    /// Print an ASCII rendering of one generated chunk
    Chunk {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short = 'x', long, default_value_t = 1)]
        chunk_x: i32,
        #[arg(short = 'y', long, default_value_t = 0)]
        chunk_y: i32,
    },
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Commands::Replay { journal } => replay(&journal),
        Commands::Chunk { seed, chunk_x, chunk_y } => {
            print_chunk(seed, ChunkCoord::new(chunk_x, chunk_y));
            Ok(())
        }
    }
}

fn replay(path: &Path) -> Result<()> {
    let (journal, dropped) = load_journal(path)
        .with_context(|| format!("failed to load journal {}", path.display()))?;
    if dropped > 0 {
        eprintln!("warning: dropped {dropped} corrupt trailing line(s)");
    }

    let result = replay_to_end(&journal);
    println!("Replay complete.");
    println!("World seed: {}", journal.world_seed);
    println!("Frames: {}", journal.frames.len());
    println!("Final tick: {}", result.final_tick);
    println!("Chunks generated: {}", result.chunks_generated);
    println!("Encounters won: {} (+{} xp)", result.encounters_won, result.xp_awarded);
    println!("Snapshot hash: 0x{:016x}", result.snapshot_hash);
    Ok(())
}

fn print_chunk(seed: u64, coord: ChunkCoord) {
    let chunk = worldgen::generate_chunk(seed, coord);
    println!("seed {seed}, chunk ({}, {}):", coord.x, coord.y);
    for row in 0..CHUNK_ROWS {
        let line: String = (0..CHUNK_COLS).map(|col| glyph(chunk.tile(row, col))).collect();
        println!("  {line}");
    }
    println!("  . floor  # wall  ,;\" grass  T tree  ^ mountain  B shelf  r rug");
}

fn glyph(tile: TileKind) -> char {
    match tile {
        TileKind::Floor => '.',
        TileKind::Wall | TileKind::WallEdge(_) => '#',
        TileKind::Grass1 => ',',
        TileKind::Grass2 => ';',
        TileKind::Grass3 => '"',
        TileKind::Tree => 'T',
        TileKind::Mountain => '^',
        TileKind::Bookshelf => 'B',
        TileKind::RugCenter
        | TileKind::RugTopLeft
        | TileKind::RugTop
        | TileKind::RugTopRight
        | TileKind::RugLeft
        | TileKind::RugRight
        | TileKind::RugBottomLeft
        | TileKind::RugBottom
        | TileKind::RugBottomRight => 'r',
    }
}
