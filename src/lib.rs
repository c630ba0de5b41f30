//! cinesearch library
//!
//! A movie search client whose core is a persisted, paginated, expiring,
//! capacity-bounded cache of search responses. The binary wires these modules
//! into a CLI; the library is exposed for integration tests.

pub mod cache;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod omdb;
pub mod search;
pub mod storage;
