use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("shelf '{0}' does not exist")]
    Missing(PathBuf),
    #[error("IO error on shelf '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("shelf '{path}' is not valid TOML: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("could not encode shelf '{path}': {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: toml::ser::Error,
    },
}
