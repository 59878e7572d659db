use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::error::StoreError;

/// A persistent dictionary: string keys, serde values, one TOML file on disk.
///
/// The whole file is read into memory on open. Writes land in the cache and
/// reach the disk on [`Shelf::sync`] or [`Shelf::close`]. Dropping an open shelf
/// syncs as a last resort so pending writes survive early returns.
pub struct Shelf<V>
where
    V: Serialize + DeserializeOwned,
{
    path: PathBuf,
    entries: BTreeMap<String, V>,
    dirty: bool,
}

impl<V> Shelf<V>
where
    V: Serialize + DeserializeOwned,
{
    /// Open a shelf for reading and writing, creating it if the file is absent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        match read_entries(&path)? {
            Some(entries) => {
                tracing::debug!(path = %path.display(), keys = entries.len(), "opened shelf");
                Ok(Shelf {
                    path,
                    entries,
                    dirty: false,
                })
            }
            None => {
                tracing::debug!(path = %path.display(), "creating new shelf");
                Ok(Shelf {
                    path,
                    entries: BTreeMap::new(),
                    dirty: true,
                })
            }
        }
    }

    /// Open a shelf that must already exist on disk.
    pub fn open_existing(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = read_entries(&path)?.ok_or_else(|| StoreError::Missing(path.clone()))?;
        tracing::debug!(path = %path.display(), keys = entries.len(), "opened shelf");
        Ok(Shelf {
            path,
            entries,
            dirty: false,
        })
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// Mutable access to a cached value. The shelf is marked dirty, since the
    /// caller may change the value in place.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let value = self.entries.get_mut(key)?;
        self.dirty = true;
        Some(value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: V) {
        self.entries.insert(key.into(), value);
        self.dirty = true;
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, V> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the cache to disk if anything changed since the last sync.
    ///
    /// The new contents go to a sibling temp file which is then renamed over
    /// the shelf, so readers never see a half-written file.
    pub fn sync(&mut self) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }

        let encoded = toml::to_string(&self.entries).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;

        let io_err = |source: io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let tmp = temp_path_for(&self.path);
        if let Err(e) = fs::write(&tmp, encoded).and_then(|()| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(io_err(e));
        }

        self.dirty = false;
        tracing::debug!(path = %self.path.display(), keys = self.entries.len(), "synced shelf");
        Ok(())
    }

    pub fn close(mut self) -> Result<(), StoreError> {
        self.sync()?;
        tracing::debug!(path = %self.path.display(), "closed shelf");
        Ok(())
    }

    /// Close the shelf and hand back its contents.
    pub fn into_map(mut self) -> Result<BTreeMap<String, V>, StoreError> {
        self.sync()?;
        Ok(std::mem::take(&mut self.entries))
    }
}

impl<V> Drop for Shelf<V>
where
    V: Serialize + DeserializeOwned,
{
    fn drop(&mut self) {
        if self.dirty {
            if let Err(e) = self.sync() {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to sync shelf on drop");
            }
        }
    }
}

fn read_entries<V: DeserializeOwned>(path: &Path) -> Result<Option<BTreeMap<String, V>>, StoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let entries = toml::from_str(&contents).map_err(|source| StoreError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(entries))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
