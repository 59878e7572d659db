use std::collections::{BTreeSet, HashSet, VecDeque};

use super::model::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    /// Not enforced at play time, but probably a mistake in the world data.
    Warning,
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub severity: Severity,
    pub message: String,
}

impl ValidationError {
    fn error(msg: impl Into<String>) -> Self {
        ValidationError {
            severity: Severity::Error,
            message: msg.into(),
        }
    }

    fn warning(msg: impl Into<String>) -> Self {
        ValidationError {
            severity: Severity::Warning,
            message: msg.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

pub fn validate_world(world: &World) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    if world.locations.is_empty() {
        errors.push(ValidationError::error("world has no locations"));
    }

    if !world.locations.contains_key(&world.start) {
        errors.push(ValidationError::error(format!(
            "start location '{}' not found among locations",
            world.start
        )));
    }

    if !world.locations.contains_key(&world.terminal) {
        errors.push(ValidationError::error(format!(
            "exit location '{}' not found among locations",
            world.terminal
        )));
    }

    // Sorted so reports are stable between runs.
    let ids: BTreeSet<&String> = world.locations.keys().collect();

    for id in &ids {
        let location = &world.locations[*id];
        for (code, target) in &location.exits {
            if !world.locations.contains_key(target) {
                errors.push(ValidationError::error(format!(
                    "location '{}' exit '{}' targets missing location '{}'",
                    id, code, target
                )));
            }
        }
        for (alias, target) in &location.named_exits {
            if !world.locations.contains_key(target) {
                errors.push(ValidationError::error(format!(
                    "location '{}' named exit '{}' targets missing location '{}'",
                    id, alias, target
                )));
            }
        }
    }

    let accepted: HashSet<&str> = world
        .locations
        .values()
        .flat_map(|l| l.exits.keys().chain(l.named_exits.keys()))
        .map(String::as_str)
        .collect();

    let mut words: Vec<(&str, &str)> = world.vocabulary.iter().collect();
    words.sort();
    for (word, code) in words {
        if !accepted.contains(code) {
            errors.push(ValidationError::warning(format!(
                "vocabulary word '{}' maps to '{}', which no location accepts",
                word, code
            )));
        }
    }

    errors
}

/// Ids reachable from `start` by any sequence of exit codes, `start` included.
///
/// Destinations that are not locations are still returned, so a caller can
/// compare the result against the world's keys to find dangling exits.
pub fn reachable_from(world: &World, start: &str) -> BTreeSet<String> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();

    seen.insert(start.to_string());
    queue.push_back(start.to_string());

    while let Some(id) = queue.pop_front() {
        let Some(location) = world.locations.get(&id) else {
            continue;
        };
        for target in location.destinations() {
            if seen.insert(target.to_string()) {
                queue.push_back(target.to_string());
            }
        }
    }

    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Location, Vocabulary};
    use std::collections::HashMap;

    #[test]
    fn cave_is_valid() {
        let errors = validate_world(&World::cave().unwrap());
        assert!(errors.is_empty(), "unexpected: {:?}", errors);
    }

    #[test]
    fn every_reachable_cave_location_exists() {
        let cave = World::cave().unwrap();
        let reachable = reachable_from(&cave, &cave.start);
        for id in &reachable {
            assert!(cave.location(id).is_ok(), "dangling id '{}'", id);
        }
        assert!(reachable.contains(&cave.terminal));
        assert_eq!(reachable.len(), 6);
    }

    #[test]
    fn dangling_exits_are_reported() {
        let mut locations = HashMap::new();
        locations.insert("1".to_string(), Location::new("Road").exit("N", "7").exit("Q", "0"));
        locations.insert("0".to_string(), Location::new("Exit").named_exit("8", "8"));
        let world = World::new(locations, Vocabulary::new());

        let errors = validate_world(&world);
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(errors.len(), 2, "{:?}", messages);
        assert!(errors.iter().all(ValidationError::is_error));
        assert!(messages[0].contains("'0' named exit '8'"));
        assert!(messages[1].contains("'1' exit 'N' targets missing location '7'"));

        let reachable = reachable_from(&world, "1");
        assert!(reachable.contains("7"));
        assert!(reachable.contains("8"));
    }

    #[test]
    fn missing_start_and_exit_rooms_are_errors() {
        let mut locations = HashMap::new();
        locations.insert("5".to_string(), Location::new("Forest"));
        let world = World::new(locations, Vocabulary::new());

        let errors = validate_world(&world);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("start location '1'"));
        assert!(errors[1].message.contains("exit location '0'"));
    }

    #[test]
    fn unused_vocabulary_is_only_a_warning() {
        let mut cave = World::cave().unwrap();
        cave.vocabulary.insert("UP", "U");

        let errors = validate_world(&cave);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].severity, Severity::Warning);
        assert!(errors[0].message.contains("'UP'"));
    }
}
