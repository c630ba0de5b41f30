//! Store backed by one JSON file per key
//!
//! The directory is chosen by the caller, normally the XDG cache directory
//! resolved by `AppConfig` (`~/.cache/cinesearch/` on Linux). Writes go
//! through a temp file and a rename so a crash mid-write never leaves a
//! truncated payload behind. There is no file locking: two processes doing
//! read-modify-write cycles on the same key can lose one of the updates.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use super::KeyValueStore;
use crate::error::StorageError;

/// Persists each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Directory where payload files are stored
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at a specific directory
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Returns the path to the payload file for the given key
    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }

    /// Ensures the store directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let path = self.path_for(key);
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(payload.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Replaces characters that are unsafe in file names with underscores
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
