mod error;
mod loader;
mod model;
mod validator;

pub use error::WorldError;
pub use loader::{
    HEADER_SHELF, LOCATIONS_SHELF, VOCABULARY_SHELF, load_world_from_file, load_world_from_store,
    load_world_from_str, save_world_to_store,
};

pub use model::{DEFAULT_START, DEFAULT_TERMINAL, Location, Vocabulary, World};
pub use validator::{Severity, ValidationError, reachable_from, validate_world};
