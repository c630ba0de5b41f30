//! Error types for the search client
//!
//! Storage failures never escape the cache (they are logged and treated as
//! absence), so `StorageError` only surfaces from the raw store primitives.
//! `SearchError` is what the orchestrator and the CLI see.

use thiserror::Error;

use crate::config::ConfigError;

/// Message OMDb returns in `Error` when a search has no hits
pub const OMDB_NOT_FOUND: &str = "Movie not found!";

/// Errors raised by the key-value store primitives
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The value could not be encoded as JSON
    #[error("failed to serialize stored value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors that can occur while searching for movies
#[derive(Debug, Error)]
pub enum SearchError {
    /// Connection problem, timeout, or other transport failure
    #[error("Network problem, please check your connection: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered but reported a failure
    #[error("The movie service reported an error: {0}")]
    Api(String),

    /// The API reported no match for the query
    #[error("No movie found for \"{0}\"")]
    MovieNotFound(String),

    /// The query was empty after trimming
    #[error("Search query must not be empty")]
    EmptyQuery,

    /// Pages are 1-based
    #[error("Invalid page number: {0} (pages start at 1)")]
    InvalidPage(u32),

    /// Configuration needed for the request is missing or invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SearchError {
    /// Classifies an OMDb `Error` field for the given query
    pub fn from_api_message(query: &str, message: &str) -> Self {
        if message == OMDB_NOT_FOUND {
            SearchError::MovieNotFound(query.to_string())
        } else {
            SearchError::Api(message.to_string())
        }
    }
}
