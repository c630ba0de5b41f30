//! Command-line interface parsing for cinesearch
//!
//! Subcommands map one-to-one onto search service operations; global flags
//! override where state is persisted and how chatty logging is.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The IMDb id does not look like `tt` followed by digits
    #[error("Invalid IMDb id: '{0}'. Expected something like tt1375666")]
    InvalidImdbId(String),
}

/// cinesearch - search movies with a local result cache
#[derive(Parser, Debug)]
#[command(name = "cinesearch")]
#[command(about = "Movie search with a bounded, expiring local cache")]
#[command(version)]
pub struct Cli {
    /// Directory for persisted cache and history (defaults to the XDG cache dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Keep cache and history in memory only for this run
    #[arg(long, global = true)]
    pub no_persist: bool,

    /// Log cache hits, misses, and evictions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search titles, serving from the cache when possible
    Search {
        /// Free-text title query
        query: String,

        /// 1-based result page
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },

    /// Show the full record for one title
    Details {
        /// IMDb id, e.g. tt1375666
        imdb_id: String,
    },

    /// List recent searches, newest first
    History,

    /// Remove a query from the history and drop all of its cached pages
    Forget {
        query: String,
    },

    /// Empty the result cache
    ClearCache,
}

/// Checks that an argument looks like an IMDb title id
///
/// # Returns
/// * `Ok(String)` - the trimmed id
/// * `Err(CliError::InvalidImdbId)` - anything else
pub fn parse_imdb_id(s: &str) -> Result<String, CliError> {
    let id = s.trim();
    let valid = id.len() > 2
        && id.starts_with("tt")
        && id[2..].chars().all(|c| c.is_ascii_digit());

    if valid {
        Ok(id.to_string())
    } else {
        Err(CliError::InvalidImdbId(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_imdb_id_valid() {
        assert_eq!(parse_imdb_id("tt1375666").unwrap(), "tt1375666");
        assert_eq!(parse_imdb_id(" tt0468569 ").unwrap(), "tt0468569");
    }

    #[test]
    fn test_parse_imdb_id_invalid() {
        for bad in ["", "tt", "1375666", "tt13x5666", "nm0634240"] {
            let err = parse_imdb_id(bad).unwrap_err();
            assert!(err.to_string().contains("Invalid IMDb id"));
        }
    }

    #[test]
    fn test_cli_parse_search_defaults_to_page_one() {
        let cli = Cli::parse_from(["cinesearch", "search", "batman"]);
        assert_eq!(
            cli.command,
            Command::Search {
                query: "batman".into(),
                page: 1
            }
        );
        assert!(!cli.verbose);
        assert!(!cli.no_persist);
        assert!(cli.cache_dir.is_none());
    }

    #[test]
    fn test_cli_parse_search_with_page() {
        let cli = Cli::parse_from(["cinesearch", "search", "the dark knight", "--page", "3"]);
        assert_eq!(
            cli.command,
            Command::Search {
                query: "the dark knight".into(),
                page: 3
            }
        );
    }

    #[test]
    fn test_cli_rejects_page_zero() {
        let result = Cli::try_parse_from(["cinesearch", "search", "batman", "--page", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["cinesearch", "history", "--cache-dir", "/tmp/cs", "-v"]);
        assert_eq!(cli.command, Command::History);
        assert_eq!(cli.cache_dir, Some(PathBuf::from("/tmp/cs")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_parse_forget_and_clear() {
        let cli = Cli::parse_from(["cinesearch", "forget", "Batman"]);
        assert_eq!(
            cli.command,
            Command::Forget {
                query: "Batman".into()
            }
        );

        let cli = Cli::parse_from(["cinesearch", "clear-cache"]);
        assert_eq!(cli.command, Command::ClearCache);
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["cinesearch"]).is_err());
    }
}
