//! Integration tests for the cinesearch binary
//!
//! Every test points `--cache-dir` at a fresh temp dir. Tests strip the API
//! key from the environment, except the one that serves a canned response
//! from a local socket, so nothing here reaches the real service.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::process::{Command, Output};
use std::thread;

use cinesearch::cache::SearchCache;
use cinesearch::history::{SearchHistory, HISTORY_KEY};
use cinesearch::omdb::Movie;
use cinesearch::storage::{JsonFileStore, KeyValueStore};
use tempfile::TempDir;

/// Helper to run the CLI against `cache_dir` with no API key configured
fn run_cli(cache_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cinesearch"))
        .args(args)
        .arg("--cache-dir")
        .arg(cache_dir)
        .env_remove("CINESEARCH_API_KEY")
        .env_remove("CINESEARCH_CONFIG_FILE")
        .env_remove("CINESEARCH_CACHE_DIR")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute cinesearch")
}

/// Answers one HTTP request with `body` and returns the base URL to hit
fn serve_once(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();
        let mut buf = [0u8; 8192];
        let _ = socket.read(&mut buf);
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).unwrap();
    });

    format!("http://{}/", addr)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn movie(title: &str, imdb_id: &str) -> Movie {
    Movie {
        title: title.into(),
        year: "1989".into(),
        imdb_id: imdb_id.into(),
        kind: "movie".into(),
        poster: "N/A".into(),
    }
}

#[test]
fn test_help_lists_subcommands() {
    let output = Command::new(env!("CARGO_BIN_EXE_cinesearch"))
        .arg("--help")
        .output()
        .expect("Failed to execute cinesearch");

    assert!(output.status.success(), "Expected --help to exit successfully");
    let help = stdout(&output);
    assert!(help.contains("cinesearch"));
    for subcommand in ["search", "details", "history", "forget", "clear-cache"] {
        assert!(help.contains(subcommand), "Help should mention {}", subcommand);
    }
}

#[test]
fn test_page_zero_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(dir.path(), &["search", "batman", "--page", "0"]);

    assert!(!output.status.success(), "Expected page 0 to fail");
    assert!(stderr(&output).contains("page"));
}

#[test]
fn test_search_miss_without_api_key_explains_how_to_set_it() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(dir.path(), &["search", "batman"]);

    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("CINESEARCH_API_KEY"),
        "Should point at the API key variable: {}",
        stderr(&output)
    );
    assert!(!dir.path().join("searchHistory.json").exists());
}

#[test]
fn test_cached_page_is_served_without_api_key() {
    let dir = TempDir::new().unwrap();
    let mut cache = SearchCache::new(JsonFileStore::with_dir(dir.path().to_path_buf()));
    cache.set(
        "batman",
        1,
        &[movie("Batman", "tt0096895"), movie("Batman Returns", "tt0103776")],
        2,
    );

    let output = run_cli(dir.path(), &["search", "  BATMAN "]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("[cached]"));
    assert!(out.contains("Batman Returns"));
    assert!(out.contains("tt0096895"));

    let history = SearchHistory::new(JsonFileStore::with_dir(dir.path().to_path_buf()));
    assert_eq!(history.entries(), vec!["BATMAN"]);
}

#[test]
fn test_history_forget_and_clear_cache_work_offline() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::with_dir(dir.path().to_path_buf());
    store
        .write(HISTORY_KEY, &["matrix".to_string(), "batman".to_string()])
        .unwrap();
    SearchCache::new(store.clone()).set("batman", 1, &[movie("Batman", "tt0096895")], 1);

    let output = run_cli(dir.path(), &["history"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).lines().collect::<Vec<_>>(), vec!["matrix", "batman"]);

    let output = run_cli(dir.path(), &["forget", "Batman"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Forgot"));
    assert!(SearchCache::new(store.clone()).entries().is_empty());

    let output = run_cli(dir.path(), &["history"]);
    assert_eq!(stdout(&output).trim(), "matrix");

    SearchCache::new(store.clone()).set("alien", 1, &[movie("Alien", "tt0078748")], 1);
    let output = run_cli(dir.path(), &["clear-cache"]);
    assert!(output.status.success());
    assert_eq!(
        store.load("movieSearchCache").unwrap().as_deref(),
        Some("{}")
    );
}

#[test]
fn test_history_on_empty_dir_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(dir.path(), &["history"]);

    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_invalid_imdb_id_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(dir.path(), &["details", "not-an-id"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid IMDb id"));
}

#[test]
fn test_no_persist_leaves_cache_dir_untouched() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(dir.path(), &["clear-cache", "--no-persist"]);

    assert!(output.status.success());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_details_prints_poster_when_available() {
    let dir = TempDir::new().unwrap();
    let base_url = serve_once(
        r#"{"Title":"Alien","Year":"1979","Director":"Ridley Scott","Poster":"https://example.com/alien.jpg","Plot":"N/A","imdbID":"tt0078748","Type":"movie","Response":"True"}"#,
    );

    let output = Command::new(env!("CARGO_BIN_EXE_cinesearch"))
        .args(["details", "tt0078748", "--cache-dir"])
        .arg(dir.path())
        .env("CINESEARCH_API_KEY", "test-key")
        .env("CINESEARCH_BASE_URL", &base_url)
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy")
        .env_remove("CINESEARCH_CONFIG_FILE")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute cinesearch");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.starts_with("Alien (1979)"));
    assert!(out.contains("Ridley Scott"));
    assert!(out.contains("Poster       https://example.com/alien.jpg"));
    assert!(!out.contains("N/A"));
}
