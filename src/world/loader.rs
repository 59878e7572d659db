use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use super::error::WorldError;
use super::model::{DEFAULT_START, DEFAULT_TERMINAL, Location, Vocabulary, World};
use crate::store::{Shelf, StoreError};

pub const LOCATIONS_SHELF: &str = "locations.toml";
pub const VOCABULARY_SHELF: &str = "vocabulary.toml";
pub const HEADER_SHELF: &str = "world.toml";

const START_KEY: &str = "start_room";
const EXIT_KEY: &str = "exit_room";

////////////////////
/// TOML STRUCTS ///
////////////////////

#[derive(Deserialize)]
struct WorldFile {
    #[serde(default)]
    world: WorldHeader,
    #[serde(default)]
    room: Vec<RoomConfig>, // [[room]] blocks
    #[serde(default)]
    vocabulary: BTreeMap<String, String>, // [vocabulary] table
}

#[derive(Deserialize)]
struct WorldHeader {
    #[serde(default = "default_start")]
    start_room: String,
    #[serde(default = "default_terminal")]
    exit_room: String,
}

impl Default for WorldHeader {
    fn default() -> Self {
        WorldHeader {
            start_room: default_start(),
            exit_room: default_terminal(),
        }
    }
}

#[derive(Deserialize)]
struct RoomConfig {
    id: String,
    #[serde(default)]
    desc: String,
    #[serde(default)]
    exits: BTreeMap<String, String>, // [room.exits]
    #[serde(default)]
    named_exits: BTreeMap<String, String>, // [room.named_exits]
}

fn default_start() -> String {
    DEFAULT_START.to_string()
}

fn default_terminal() -> String {
    DEFAULT_TERMINAL.to_string()
}

/////////////////////////////
/// TOML PARSER FUNCTIONS ///
/////////////////////////////

/// Public API: load a world from a .toml file on disk.
pub fn load_world_from_file(path: &Path) -> Result<World, WorldError> {
    let contents = fs::read_to_string(path).map_err(|source| WorldError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_world_from_str(&contents)
}

pub fn load_world_from_str(contents: &str) -> Result<World, WorldError> {
    let world_file: WorldFile = toml::from_str(contents)?;

    if world_file.world.start_room.trim().is_empty() {
        return Err(WorldError::Invalid("start_room must not be empty".to_string()));
    }
    if world_file.world.exit_room.trim().is_empty() {
        return Err(WorldError::Invalid("exit_room must not be empty".to_string()));
    }

    let mut locations: HashMap<String, Location> = HashMap::new();
    for rc in world_file.room {
        let id = rc.id.trim().to_string();
        if id.is_empty() {
            return Err(WorldError::Invalid("room with empty id".to_string()));
        }
        if locations.contains_key(&id) {
            return Err(WorldError::Invalid(format!("duplicate room id '{}'", id)));
        }

        locations.insert(
            id,
            Location {
                desc: normalize_multiline_desc(&rc.desc),
                exits: rc.exits,
                named_exits: rc.named_exits,
            },
        );
    }

    let vocabulary: Vocabulary = world_file.vocabulary.into_iter().collect();

    Ok(World::new(locations, vocabulary)
        .with_start(world_file.world.start_room.trim())
        .with_terminal(world_file.world.exit_room.trim()))
}

///////////////////////
/// SHELF FUNCTIONS ///
///////////////////////

/// Read the locations, vocabulary and header shelves under `dir` into memory.
///
/// All shelves are closed before this returns. A store without a header
/// shelf starts at room "1" and ends at room "0". Nothing is validated: a
/// dangling exit surfaces later as [`WorldError::NotFound`].
pub fn load_world_from_store(dir: &Path) -> Result<World, WorldError> {
    let locations: Shelf<Location> = Shelf::open_existing(dir.join(LOCATIONS_SHELF))?;
    let vocabulary: Shelf<String> = Shelf::open_existing(dir.join(VOCABULARY_SHELF))?;

    let locations: HashMap<String, Location> = locations.into_map()?.into_iter().collect();
    let vocabulary: Vocabulary = vocabulary.into_map()?.into_iter().collect();

    let mut world = World::new(locations, vocabulary);
    match Shelf::<String>::open_existing(dir.join(HEADER_SHELF)) {
        Ok(header) => {
            if let Some(start) = header.get(START_KEY) {
                world.start = start.clone();
            }
            if let Some(exit) = header.get(EXIT_KEY) {
                world.terminal = exit.clone();
            }
            header.close()?;
        }
        Err(StoreError::Missing(_)) => {
            tracing::debug!(dir = %dir.display(), "no header shelf, using default start and exit");
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!(
        dir = %dir.display(),
        locations = world.locations.len(),
        words = world.vocabulary.len(),
        start = %world.start,
        exit = %world.terminal,
        "loaded world from store"
    );
    Ok(world)
}

/// Write every location and vocabulary word of `world` into the shelves under
/// `dir`. The data is on disk when this returns `Ok`.
pub fn save_world_to_store(world: &World, dir: &Path) -> Result<(), WorldError> {
    let mut locations: Shelf<Location> = Shelf::open(dir.join(LOCATIONS_SHELF))?;
    for (id, location) in &world.locations {
        locations.set(id.clone(), location.clone());
    }
    locations.close()?;

    let mut vocabulary: Shelf<String> = Shelf::open(dir.join(VOCABULARY_SHELF))?;
    for (word, code) in world.vocabulary.iter() {
        vocabulary.set(word, code.to_string());
    }
    vocabulary.close()?;

    let mut header: Shelf<String> = Shelf::open(dir.join(HEADER_SHELF))?;
    header.set(START_KEY, world.start.clone());
    header.set(EXIT_KEY, world.terminal.clone());
    header.close()?;

    tracing::info!(
        dir = %dir.display(),
        locations = world.locations.len(),
        words = world.vocabulary.len(),
        "saved world to store"
    );
    Ok(())
}

fn normalize_multiline_desc(raw: &str) -> String {
    let mut result = String::new();
    let mut pending_blank_lines = 0usize;

    for line in raw.lines() {
        // Indentation in the TOML file should not reach the player.
        let trimmed = line.trim();

        if trimmed.is_empty() {
            pending_blank_lines += 1;
            continue;
        }

        if !result.is_empty() {
            match pending_blank_lines {
                0 => result.push(' '),
                1 => result.push('\n'),
                _ => result.push_str("\n\n"),
            }
        }
        result.push_str(trimmed);
        pending_blank_lines = 0;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_WORLD: &str = r#"
        [world]
        start_room = "a"
        exit_room = "z"

        [[room]]
        id = "a"
        desc = """
            A narrow
            ledge.
        """
        exits = { N = "z" }
        named_exits = { Z = "z" }

        [[room]]
        id = "z"
        desc = "Outside."

        [vocabulary]
        north = "N"
    "#;

    #[test]
    fn parses_rooms_vocabulary_and_header() {
        let world = load_world_from_str(SMALL_WORLD).unwrap();
        assert_eq!(world.start, "a");
        assert_eq!(world.terminal, "z");

        let ledge = world.location("a").unwrap();
        assert_eq!(ledge.desc, "A narrow ledge.");
        assert_eq!(ledge.exits.get("N").map(String::as_str), Some("z"));
        assert_eq!(ledge.named_exits.get("Z").map(String::as_str), Some("z"));

        let outside = world.location("z").unwrap();
        assert!(outside.exits.is_empty());

        assert_eq!(world.vocabulary.code_for("NORTH"), Some("N"));
    }

    #[test]
    fn header_defaults_to_room_one_and_exit_zero() {
        let world = load_world_from_str("[[room]]\nid = \"1\"\ndesc = \"Road\"\n").unwrap();
        assert_eq!(world.start, "1");
        assert_eq!(world.terminal, "0");
    }

    #[test]
    fn duplicate_room_ids_are_rejected() {
        let err = load_world_from_str("[[room]]\nid = \"1\"\n[[room]]\nid = \"1\"\n").unwrap_err();
        assert!(matches!(err, WorldError::Invalid(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = load_world_from_str("[[room]\nid = ").unwrap_err();
        assert!(matches!(err, WorldError::Parse(_)));
    }

    #[test]
    fn multiline_desc_keeps_paragraphs() {
        assert_eq!(
            normalize_multiline_desc("  one\n  two\n\n  three\n\n\n four"),
            "one two\nthree\n\nfour"
        );
    }

    #[test]
    fn store_round_trip_keeps_the_cave() {
        let dir = tempfile::tempdir().unwrap();
        let cave = World::cave().unwrap();
        save_world_to_store(&cave, dir.path()).unwrap();

        let loaded = load_world_from_store(dir.path()).unwrap();
        assert_eq!(loaded.locations, cave.locations);
        assert_eq!(loaded.vocabulary, cave.vocabulary);
    }

    #[test]
    fn store_keeps_custom_start_and_exit() {
        let dir = tempfile::tempdir().unwrap();
        let world = load_world_from_str(SMALL_WORLD).unwrap();
        save_world_to_store(&world, dir.path()).unwrap();

        let loaded = load_world_from_store(dir.path()).unwrap();
        assert_eq!(loaded.start, "a");
        assert_eq!(loaded.terminal, "z");
        assert!(loaded.location(&loaded.start).is_ok());
    }

    #[test]
    fn store_without_header_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let world = load_world_from_str(SMALL_WORLD).unwrap();
        save_world_to_store(&world, dir.path()).unwrap();
        std::fs::remove_file(dir.path().join(HEADER_SHELF)).unwrap();

        let loaded = load_world_from_store(dir.path()).unwrap();
        assert_eq!(loaded.start, DEFAULT_START);
        assert_eq!(loaded.terminal, DEFAULT_TERMINAL);
    }

    #[test]
    fn missing_store_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_world_from_store(dir.path()).unwrap_err();
        assert!(matches!(err, WorldError::Store(crate::store::StoreError::Missing(_))));
    }
}
