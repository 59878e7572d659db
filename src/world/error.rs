use std::io;
use std::path::PathBuf;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A room id that is not in the world, e.g. the target of a dangling exit.
    #[error("location '{0}' not found")]
    NotFound(String),
    #[error("could not read world file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("world file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid world file: {0}")]
    Invalid(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
