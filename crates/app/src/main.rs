use std::env;

use game_core::journal_file::JournalWriter;
use game_core::library::{LibraryStore, MemoryStore};
use macroquad::prelude::next_frame;
use macroquad::window::Conf;

use app::app_loop::AppState;
use app::library_file::FileStore;
use app::seed::{self, Launch};
use app::{frame_input, render, window_config};

fn window_conf() -> Conf {
    window_config::build_window_conf()
}

#[macroquad::main(window_conf)]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let launch = match seed::resolve_launch(&args, seed::generate_runtime_seed()) {
        Ok(launch) => launch,
        Err(message) => {
            eprintln!("{message}");
            return;
        }
    };

    let world_seed = launch.seed.value();
    println!("world seed: {world_seed}");

    let store = open_store(&launch);
    let mut recorder = open_recorder(&launch, world_seed);
    let mut app = AppState::new(world_seed, store);

    loop {
        let input = frame_input::capture();

        if let Some(writer) = &mut recorder
            && let Err(err) = writer.append(input.frame)
        {
            eprintln!("session recording stopped: {err}");
            recorder = None;
        }

        app.frame(&input);
        render::draw(&app);
        next_frame().await;
    }
}

/// Prefer the file-backed catalog; fall back to a volatile one rather than
/// refusing to start.
fn open_store(launch: &Launch) -> Box<dyn LibraryStore> {
    let path = launch.store_path.clone().or_else(FileStore::default_path);
    match path {
        Some(path) => match FileStore::open(path) {
            Ok(store) => return Box::new(store),
            Err(err) => eprintln!("library store unavailable, starting in memory: {err}"),
        },
        None => eprintln!("no data directory available, starting in memory"),
    }
    Box::new(MemoryStore::new())
}

fn open_recorder(launch: &Launch, world_seed: u64) -> Option<JournalWriter> {
    let path = launch.record_path.as_deref()?;
    match JournalWriter::create(path, world_seed) {
        Ok(writer) => Some(writer),
        Err(err) => {
            eprintln!("could not open session recording: {err}");
            None
        }
    }
}
