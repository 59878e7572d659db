use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::error::WorldError;

pub const DEFAULT_START: &str = "1";
pub const DEFAULT_TERMINAL: &str = "0";

const CAVE_TOML: &str = include_str!("../../worlds/cave.toml");

//////////////////////////////
/// GAME STRUCTS AND ENUMS ///
//////////////////////////////

/// One node of the room graph, as stored on the locations shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub desc: String,
    #[serde(default)]
    pub exits: BTreeMap<String, String>, // direction letter -> room id
    #[serde(default)]
    pub named_exits: BTreeMap<String, String>, // alias (usually a room id) -> room id
}

impl Location {
    pub fn new(desc: impl Into<String>) -> Self {
        Location {
            desc: desc.into(),
            exits: BTreeMap::new(),
            named_exits: BTreeMap::new(),
        }
    }

    pub fn exit(mut self, code: impl Into<String>, target: impl Into<String>) -> Self {
        self.exits.insert(code.into(), target.into());
        self
    }

    pub fn named_exit(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.named_exits.insert(alias.into(), target.into());
        self
    }

    /// Exit codes shown to the player. Named exits work but are not listed.
    pub fn available_exits(&self) -> Vec<&str> {
        self.exits.keys().map(String::as_str).collect()
    }

    /// Primary exits with the named exits laid over them; a named exit wins
    /// when both tables share a code.
    pub fn combined_exits(&self) -> BTreeMap<String, String> {
        let mut all = self.exits.clone();
        all.extend(
            self.named_exits
                .iter()
                .map(|(code, target)| (code.clone(), target.clone())),
        );
        all
    }

    /// Every destination id this location points at, from either table.
    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.exits
            .values()
            .chain(self.named_exits.values())
            .map(String::as_str)
    }
}

/// Uppercase words mapped to exit codes ("NORTH" -> "N", "ROAD" -> "1").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    words: HashMap<String, String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a word; it is stored uppercased so lookups of normalized input match.
    pub fn insert(&mut self, word: impl AsRef<str>, code: impl Into<String>) {
        self.words.insert(word.as_ref().to_uppercase(), code.into());
    }

    pub fn code_for(&self, word: &str) -> Option<&str> {
        self.words.get(word).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.words.iter().map(|(w, c)| (w.as_str(), c.as_str()))
    }
}

impl<W, C> FromIterator<(W, C)> for Vocabulary
where
    W: AsRef<str>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (W, C)>>(iter: I) -> Self {
        let mut vocabulary = Vocabulary::new();
        for (word, code) in iter {
            vocabulary.insert(word, code);
        }
        vocabulary
    }
}

/// Runtime world type used by the game loop. Read-only once built.
#[derive(Debug, Clone)]
pub struct World {
    pub locations: HashMap<String, Location>,
    pub vocabulary: Vocabulary,
    pub start: String,
    pub terminal: String,
}

impl World {
    pub fn new(locations: HashMap<String, Location>, vocabulary: Vocabulary) -> Self {
        World {
            locations,
            vocabulary,
            start: DEFAULT_START.to_string(),
            terminal: DEFAULT_TERMINAL.to_string(),
        }
    }

    pub fn with_start(mut self, id: impl Into<String>) -> Self {
        self.start = id.into();
        self
    }

    pub fn with_terminal(mut self, id: impl Into<String>) -> Self {
        self.terminal = id.into();
        self
    }

    pub fn location(&self, id: &str) -> Result<&Location, WorldError> {
        self.locations
            .get(id)
            .ok_or_else(|| WorldError::NotFound(id.to_string()))
    }

    pub fn is_terminal(&self, id: &str) -> bool {
        self.terminal == id
    }

    /// The road, hill, building, valley and forest, plus the exit room,
    /// parsed from the bundled `worlds/cave.toml`.
    pub fn cave() -> Result<Self, WorldError> {
        super::loader::load_world_from_str(CAVE_TOML)
    }
}
