/// Movie metadata provider abstraction
///
/// The recommendation pipeline only ever reads metadata through this trait, so the
/// TMDB client can be swapped for a stub in tests or another catalog later.
use crate::{
    error::AppResult,
    models::{DiscoverQuery, MovieSummary},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Search for movies by free-text title
    ///
    /// Returns matches in the provider's relevance order; the first entry is the best match.
    async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>>;

    /// Search for movies by free-text title, keeping the provider's result documents intact
    async fn search_results(&self, query: &str) -> AppResult<Vec<serde_json::Value>>;

    /// Fetch the full detail document for one movie
    ///
    /// The document is passed through to the client untouched.
    async fn movie_details(&self, movie_id: i64) -> AppResult<serde_json::Value>;

    /// Discover movies matching every genre in the query
    async fn discover_by_genres(&self, query: &DiscoverQuery) -> AppResult<Vec<MovieSummary>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
