/// Initializer and game talking through the shelves on disk.
use std::io::Cursor;

use cave_shelf::store::{Shelf, StoreError};
use cave_shelf::world::{self, Location, World, WorldError};
use cave_shelf::{GameState, Outcome, play};

#[test]
fn initialized_store_plays_to_the_exit() {
    let dir = tempfile::tempdir().unwrap();
    world::save_world_to_store(&World::cave().unwrap(), dir.path()).unwrap();

    let loaded = world::load_world_from_store(dir.path()).unwrap();
    let mut state = GameState::new(loaded);
    let mut out: Vec<u8> = Vec::new();
    let outcome = play(&mut state, Cursor::new("e\nw\nq\n"), &mut out).unwrap();

    assert_eq!(outcome, Outcome::Exited);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("New position = 3: Description = This is the building"));
    assert!(text.contains("New position = 1: Description = This is the Road"));
}

#[test]
fn shelves_hold_locations_and_words_by_key() {
    let dir = tempfile::tempdir().unwrap();
    world::save_world_to_store(&World::cave().unwrap(), dir.path()).unwrap();

    let locations: Shelf<Location> =
        Shelf::open_existing(dir.path().join(world::LOCATIONS_SHELF)).unwrap();
    assert_eq!(locations.len(), 6);
    assert_eq!(locations.get("4").map(|l| l.desc.as_str()), Some("This is the Valley"));

    let vocabulary: Shelf<String> =
        Shelf::open_existing(dir.path().join(world::VOCABULARY_SHELF)).unwrap();
    assert_eq!(vocabulary.get("BUILDING").map(String::as_str), Some("3"));
}

#[test]
fn reinitializing_overwrites_existing_entries() {
    let dir = tempfile::tempdir().unwrap();
    world::save_world_to_store(&World::cave().unwrap(), dir.path()).unwrap();

    let mut cave = World::cave().unwrap();
    if let Some(hill) = cave.locations.get_mut("2") {
        hill.desc = "This is the windy Hill".to_string();
    }
    world::save_world_to_store(&cave, dir.path()).unwrap();

    let loaded = world::load_world_from_store(dir.path()).unwrap();
    assert_eq!(loaded.location("2").unwrap().desc, "This is the windy Hill");
}

#[test]
fn game_refuses_to_start_without_a_vocabulary_shelf() {
    let dir = tempfile::tempdir().unwrap();
    let mut locations: Shelf<Location> = Shelf::open(dir.path().join(world::LOCATIONS_SHELF)).unwrap();
    locations.set("1", Location::new("This is the Road"));
    locations.close().unwrap();

    let err = world::load_world_from_store(dir.path()).unwrap_err();
    assert!(matches!(err, WorldError::Store(StoreError::Missing(p)) if p.ends_with(world::VOCABULARY_SHELF)));
}

#[test]
fn custom_start_and_exit_survive_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let ledge = world::load_world_from_str(
        r#"
        [world]
        start_room = "a"
        exit_room = "z"

        [[room]]
        id = "a"
        desc = "A narrow ledge."
        exits = { N = "z" }

        [[room]]
        id = "z"
        desc = "Outside."
        "#,
    )
    .unwrap();
    assert!(world::validate_world(&ledge).is_empty());
    world::save_world_to_store(&ledge, dir.path()).unwrap();

    let loaded = world::load_world_from_store(dir.path()).unwrap();
    let mut state = GameState::new(loaded);
    let mut out: Vec<u8> = Vec::new();
    let outcome = play(&mut state, Cursor::new("n\n"), &mut out).unwrap();

    assert_eq!(outcome, Outcome::Exited);
    assert_eq!(state.current_location, "z");
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("First position: a\n"));
}
