//! cinesearch - search movies from the terminal
//!
//! Results are served from a local cache when possible and fetched from OMDb
//! otherwise. Logs go to stderr so stdout carries only results.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cinesearch::cli::{parse_imdb_id, Cli, Command};
use cinesearch::config::AppConfig;
use cinesearch::error::SearchError;
use cinesearch::omdb::{MovieDetail, OmdbClient};
use cinesearch::search::{SearchOutcome, SearchService};
use cinesearch::storage::{JsonFileStore, KeyValueStore, MemoryStore};

/// Installs the stderr log subscriber; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "cinesearch=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Prints one page of search results
fn print_outcome(query: &str, page: u32, outcome: &SearchOutcome) {
    let source = if outcome.from_cache { " [cached]" } else { "" };
    println!(
        "Results for \"{}\" - page {} of {} ({} total){}",
        query.trim(),
        page,
        outcome.total_pages().max(1),
        outcome.total_results,
        source
    );

    for (i, movie) in outcome.results.iter().enumerate() {
        println!(
            "{:>4}. {} ({}) [{}] {}",
            (page as usize - 1) * 10 + i + 1,
            movie.title,
            movie.year,
            movie.kind,
            movie.imdb_id
        );
    }
}

/// Prints the full record for one title
fn print_detail(detail: &MovieDetail) {
    println!("{} ({})", detail.title, detail.year);

    let fields = [
        ("Rated", &detail.rated),
        ("Released", &detail.released),
        ("Runtime", &detail.runtime),
        ("Genre", &detail.genre),
        ("Director", &detail.director),
        ("Writer", &detail.writer),
        ("Actors", &detail.actors),
        ("Language", &detail.language),
        ("Country", &detail.country),
        ("Awards", &detail.awards),
        ("IMDb rating", &detail.imdb_rating),
    ];
    for (label, value) in fields {
        if !value.is_empty() && value != "N/A" {
            println!("  {:<12} {}", label, value);
        }
    }

    for rating in &detail.ratings {
        println!("  {:<12} {} ({})", "Rating", rating.value, rating.source);
    }

    if !detail.poster.is_empty() && detail.poster != "N/A" {
        println!("  {:<12} {}", "Poster", detail.poster);
    }

    if !detail.plot.is_empty() && detail.plot != "N/A" {
        println!();
        println!("{}", detail.plot);
    }
}

/// Executes the parsed command against a store
async fn run<S>(command: Command, config: &AppConfig, store: S) -> Result<(), Box<dyn std::error::Error>>
where
    S: KeyValueStore + Clone,
{
    let client = OmdbClient::from_config(config)?;
    let mut service = SearchService::new(client, store);

    match command {
        Command::Search { query, page } => {
            let outcome = service.search(&query, page).await?;
            print_outcome(&query, page, &outcome);
        }
        Command::Details { imdb_id } => {
            let imdb_id = parse_imdb_id(&imdb_id)?;
            match service.details(&imdb_id).await? {
                Some(detail) => print_detail(&detail),
                None => return Err(SearchError::MovieNotFound(imdb_id).into()),
            }
        }
        Command::History => {
            for query in service.history() {
                println!("{}", query);
            }
        }
        Command::Forget { query } => {
            if service.forget(&query) {
                println!("Forgot \"{}\"", query.trim());
            } else {
                println!("\"{}\" was not in the history; cached pages dropped", query.trim());
            }
        }
        Command::ClearCache => {
            service.clear_cache();
            println!("Search cache cleared");
        }
    }

    Ok(())
}

async fn try_main(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load()?;
    if let Some(dir) = cli.cache_dir {
        config.cache_dir = Some(dir);
    }

    if cli.no_persist {
        return run(cli.command, &config, Arc::new(MemoryStore::new())).await;
    }

    let dir = config
        .resolved_cache_dir()
        .ok_or("could not determine a cache directory; pass --cache-dir")?;
    tracing::debug!(dir = %dir.display(), "using persisted state");

    run(cli.command, &config, Arc::new(JsonFileStore::with_dir(dir))).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match try_main(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
