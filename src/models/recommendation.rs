use serde::{Deserialize, Serialize};

use super::{Genre, MovieSummary, SeedMovie};

/// A title the model proposed, before it is checked against metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecommendation {
    pub title: String,
    pub reason: String,
}

/// A recommendation returned to the client.
///
/// Everything except `reason` comes from the metadata provider, so the model
/// can never introduce an id or title that is not in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedRecommendation {
    pub id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub reason: String,
    pub release_date: String,
    pub vote_average: f64,
}

impl EnrichedRecommendation {
    pub fn from_metadata(movie: MovieSummary, reason: impl Into<String>) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            poster_path: movie.poster_path,
            reason: reason.into(),
            release_date: movie.release_date,
            vote_average: movie.vote_average,
        }
    }
}

/// Body of POST /api/recommend
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl From<RecommendationRequest> for SeedMovie {
    fn from(request: RecommendationRequest) -> Self {
        SeedMovie {
            title: request.title,
            overview: request.overview,
            genres: request.genres,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<EnrichedRecommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enriched_takes_metadata_fields() {
        let movie = MovieSummary {
            id: 157336,
            title: "Interstellar".to_string(),
            poster_path: Some("/poster.jpg".to_string()),
            release_date: "2014-11-05".to_string(),
            vote_average: 8.4,
            overview: Some("ignored".to_string()),
        };

        let rec = EnrichedRecommendation::from_metadata(movie, "Mind-bending sci-fi");
        assert_eq!(rec.id, 157336);
        assert_eq!(rec.title, "Interstellar");
        assert_eq!(rec.reason, "Mind-bending sci-fi");

        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["poster_path"], "/poster.jpg");
        assert_eq!(json["release_date"], "2014-11-05");
        assert!(json.get("overview").is_none());
    }

    #[test]
    fn test_request_defaults_optional_fields() {
        let request: RecommendationRequest =
            serde_json::from_str(r#"{"title": "Inception"}"#).unwrap();
        let seed: SeedMovie = request.into();

        assert_eq!(seed.title, "Inception");
        assert!(seed.overview.is_empty());
        assert!(seed.genres.is_empty());
    }
}
