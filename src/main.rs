use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use cave_shelf::{GameState, Outcome, init_logging, load_world_from_store, play};

fn main() -> ExitCode {
    init_logging();

    let store_dir: PathBuf = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let world = match load_world_from_store(&store_dir) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Failed to open world store '{}': {e}", store_dir.display());
            eprintln!("Run cave_initialize first to create it.");
            return ExitCode::FAILURE;
        }
    };

    let mut state = GameState::new(world);
    let stdin = io::stdin();

    match play(&mut state, stdin.lock(), io::stdout().lock()) {
        Ok(Outcome::Exited) | Ok(Outcome::InputClosed) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
