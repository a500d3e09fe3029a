use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod recommendation;

pub use recommendation::{
    CandidateRecommendation, EnrichedRecommendation, RecommendationRequest,
    RecommendationResponse,
};

/// Release date placeholder used when the provider omits one
pub const UNKNOWN_RELEASE_DATE: &str = "N/A";

/// A genre as the metadata provider identifies it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// The movie recommendations are requested for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedMovie {
    pub title: String,
    pub overview: String,
    pub genres: Vec<Genre>,
}

impl SeedMovie {
    /// Genre names joined with ", " in request order
    pub fn genre_names(&self) -> String {
        join_genre_names(&self.genres)
    }
}

pub fn join_genre_names(genres: &[Genre]) -> String {
    genres
        .iter()
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Movie metadata as returned to the client and used for enrichment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: String,
    pub vote_average: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
}

/// Sort orders understood by genre discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    VoteAverageDesc,
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::VoteAverageDesc => write!(f, "vote_average.desc"),
        }
    }
}

/// Parameters for a genre discovery query
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverQuery {
    pub genre_ids: Vec<i64>,
    pub min_vote_count: u32,
    pub sort_by: SortOrder,
}

impl DiscoverQuery {
    /// Comma-joined genre ids, the provider's AND syntax
    pub fn genre_param(&self) -> String {
        self.genre_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Paged result envelope shared by /search/movie and /discover/movie
///
/// `T` is `serde_json::Value` when results are forwarded to the client as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage<T = TmdbMovie> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Raw movie entry from a TMDB result page
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl From<TmdbMovie> for MovieSummary {
    fn from(movie: TmdbMovie) -> Self {
        // TMDB sends "" for unreleased titles; only a missing key gets the placeholder
        let release_date = movie
            .release_date
            .unwrap_or_else(|| UNKNOWN_RELEASE_DATE.to_string());

        MovieSummary {
            id: movie.id,
            title: movie.title,
            poster_path: movie.poster_path,
            release_date,
            vote_average: movie.vote_average.unwrap_or(0.0),
            overview: movie.overview,
        }
    }
}
