//! OMDb metadata API
//!
//! The remote side of a search: free-text title search (paginated, ten hits
//! per page) and per-title detail lookup.

mod client;
mod types;

pub use client::OmdbClient;
pub use types::{Movie, MovieDetail, Rating, SearchPage};

/// Hits OMDb returns per search page
pub const RESULTS_PER_PAGE: u64 = 10;
