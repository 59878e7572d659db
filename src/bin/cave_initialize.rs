use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use cave_shelf::init_logging;
use cave_shelf::world::{self, World};

fn main() -> ExitCode {
    init_logging();

    let mut args = env::args().skip(1);
    let store_dir: PathBuf = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    let world_path: Option<PathBuf> = args.next().map(PathBuf::from);

    let world = match &world_path {
        Some(path) => match world::load_world_from_file(path) {
            Ok(w) => {
                println!("Using world file: {}", path.display());
                w
            }
            Err(e) => {
                eprintln!("Failed to load world file '{}': {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => match World::cave() {
            Ok(w) => w,
            Err(e) => {
                eprintln!("Failed to load the built-in cave: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    let problems = world::validate_world(&world);
    for p in &problems {
        if p.is_error() {
            eprintln!("error: {}", p.message);
        } else {
            eprintln!("warning: {}", p.message);
        }
    }
    if problems.iter().any(|p| p.is_error()) {
        eprintln!("World has errors; nothing was written.");
        return ExitCode::FAILURE;
    }

    if let Err(e) = world::save_world_to_store(&world, &store_dir) {
        eprintln!("Failed to write world store '{}': {e}", store_dir.display());
        return ExitCode::FAILURE;
    }

    println!(
        "Wrote {} locations and {} words to {}",
        world.locations.len(),
        world.vocabulary.len(),
        store_dir.display()
    );
    ExitCode::SUCCESS
}
