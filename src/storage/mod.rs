//! Key-value persistence for JSON values
//!
//! A `KeyValueStore` holds serialized JSON payloads under string keys. Reads
//! are forgiving: a missing key, an unreadable file, or a payload that no
//! longer matches the expected shape all come back as `None`, with a warning
//! logged for the latter two. Writes overwrite unconditionally and removing an
//! absent key is a no-op.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;

/// Durable, synchronous string-keyed store of JSON payloads
pub trait KeyValueStore {
    /// Raw payload stored under `key`, if any
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `payload` under `key`, replacing any previous value
    fn save(&self, key: &str, payload: &str) -> Result<(), StorageError>;

    /// Delete `key`; absent keys are not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Read and deserialize the value under `key`
    ///
    /// Returns `None` when the key is absent, the backend fails, or the payload
    /// cannot be deserialized into `T`.
    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T>
    where
        Self: Sized,
    {
        let payload = match self.load(key) {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Error reading from storage");
                return None;
            }
        };

        match serde_json::from_str(&payload) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Error reading from storage: invalid payload");
                None
            }
        }
    }

    /// Serialize `value` and store it under `key`
    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError>
    where
        Self: Sized,
    {
        let payload = serde_json::to_string(value)?;
        self.save(key, &payload)
    }
}

impl<S: KeyValueStore> KeyValueStore for Arc<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        (**self).save(key, payload)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
