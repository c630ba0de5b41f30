//! Search orchestration
//!
//! Every search consults the cache first and only goes to the network on a
//! miss, populating the cache with the fetched page. Successful searches are
//! recorded in the history; forgetting a query purges it from the history and
//! drops every cached page for it.

use std::future::Future;

use crate::cache::SearchCache;
use crate::clock::{Clock, SystemClock};
use crate::error::SearchError;
use crate::history::SearchHistory;
use crate::omdb::{Movie, MovieDetail, OmdbClient, SearchPage, RESULTS_PER_PAGE};
use crate::storage::KeyValueStore;

/// Remote provider of search pages and title details
pub trait MovieSource {
    fn search_movies(
        &self,
        query: &str,
        page: u32,
    ) -> impl Future<Output = Result<SearchPage, SearchError>> + Send;

    fn movie_details(
        &self,
        imdb_id: &str,
    ) -> impl Future<Output = Result<Option<MovieDetail>, SearchError>> + Send;
}

impl MovieSource for OmdbClient {
    async fn search_movies(&self, query: &str, page: u32) -> Result<SearchPage, SearchError> {
        OmdbClient::search_movies(self, query, page).await
    }

    async fn movie_details(&self, imdb_id: &str) -> Result<Option<MovieDetail>, SearchError> {
        OmdbClient::movie_details(self, imdb_id).await
    }
}

/// Results of one search, and where they came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub results: Vec<Movie>,
    pub total_results: u64,
    pub from_cache: bool,
}

impl SearchOutcome {
    /// Number of result pages the service reports for the query
    pub fn total_pages(&self) -> u64 {
        self.total_results.div_ceil(RESULTS_PER_PAGE)
    }
}

/// Cache-first search over a `MovieSource`
pub struct SearchService<M, S, C = SystemClock> {
    source: M,
    cache: SearchCache<S, C>,
    history: SearchHistory<S>,
}

impl<M: MovieSource, S: KeyValueStore + Clone> SearchService<M, S, SystemClock> {
    pub fn new(source: M, store: S) -> Self {
        Self::with_clock(source, store, SystemClock)
    }
}

impl<M: MovieSource, S: KeyValueStore + Clone, C: Clock> SearchService<M, S, C> {
    /// Service whose cache and history share `store`
    pub fn with_clock(source: M, store: S, clock: C) -> Self {
        Self {
            source,
            cache: SearchCache::with_clock(store.clone(), clock),
            history: SearchHistory::new(store),
        }
    }

    /// Search for `query` at a 1-based `page`
    ///
    /// A cached page is returned without touching the network. On a miss the
    /// page is fetched and cached; if the fetch fails nothing is cached or
    /// recorded.
    pub async fn search(&mut self, query: &str, page: u32) -> Result<SearchOutcome, SearchError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        if page == 0 {
            return Err(SearchError::InvalidPage(page));
        }

        if let Some(hit) = self.cache.get::<Movie>(query, page) {
            self.history.record(trimmed);
            return Ok(SearchOutcome {
                results: hit.results,
                total_results: hit.total_results,
                from_cache: true,
            });
        }

        let fetched = self.source.search_movies(trimmed, page).await?;
        self.cache
            .set(query, page, &fetched.results, fetched.total_results);
        self.history.record(trimmed);

        Ok(SearchOutcome {
            results: fetched.results,
            total_results: fetched.total_results,
            from_cache: false,
        })
    }

    /// Full record for one title; not cached
    pub async fn details(&self, imdb_id: &str) -> Result<Option<MovieDetail>, SearchError> {
        self.source.movie_details(imdb_id.trim()).await
    }

    /// Drop `query` from the history and every cached page of it
    pub fn forget(&mut self, query: &str) -> bool {
        self.cache.remove(query, None);
        self.history.remove(query)
    }

    /// Past queries, newest first
    pub fn history(&self) -> Vec<String> {
        self.history.entries()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache(&self) -> &SearchCache<S, C> {
        &self.cache
    }
}
