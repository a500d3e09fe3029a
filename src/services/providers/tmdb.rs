/// TMDB v3 metadata provider
///
/// API Flow:
/// 1. Title Search: /search/movie → ranked matches for autocomplete and enrichment
/// 2. Details: /movie/{id} → full document, passed through
/// 3. Discover: /discover/movie → genre-filtered ranking for the fallback path
use crate::{
    error::{AppError, AppResult},
    models::{DiscoverQuery, MovieSummary, TmdbMovie, TmdbPage},
    services::providers::MetadataProvider,
};
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

const LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetches the first result page of a listing endpoint
    async fn fetch_page<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AppResult<Vec<T>> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE), ("page", "1")])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let page: TmdbPage<T> = response.json().await?;
        Ok(page.results)
    }

    async fn fetch_summaries(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AppResult<Vec<MovieSummary>> {
        let movies: Vec<TmdbMovie> = self.fetch_page(path, params).await?;
        Ok(movies.into_iter().map(MovieSummary::from).collect())
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>> {
        let movies = self
            .fetch_summaries("/search/movie", &[("query", query.to_string())])
            .await?;

        tracing::debug!(
            query = %query,
            results = movies.len(),
            provider = self.name(),
            "Movie search completed"
        );

        Ok(movies)
    }

    async fn search_results(&self, query: &str) -> AppResult<Vec<serde_json::Value>> {
        let results: Vec<serde_json::Value> = self
            .fetch_page("/search/movie", &[("query", query.to_string())])
            .await?;

        tracing::debug!(
            query = %query,
            results = results.len(),
            provider = self.name(),
            "Raw movie search completed"
        );

        Ok(results)
    }

    async fn movie_details(&self, movie_id: i64) -> AppResult<serde_json::Value> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("Movie {} not found", movie_id)));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let details: serde_json::Value = response.json().await?;

        tracing::debug!(movie_id, provider = self.name(), "Movie details fetched");

        Ok(details)
    }

    async fn discover_by_genres(&self, query: &DiscoverQuery) -> AppResult<Vec<MovieSummary>> {
        let params = [
            ("with_genres", query.genre_param()),
            ("sort_by", query.sort_by.to_string()),
            ("vote_count.gte", query.min_vote_count.to_string()),
        ];

        let movies = self.fetch_summaries("/discover/movie", &params).await?;

        tracing::info!(
            genres = %query.genre_param(),
            results = movies.len(),
            provider = self.name(),
            "Genre discovery completed"
        );

        Ok(movies)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    /// Serves a canned TMDB search page on an ephemeral local port
    async fn serve_search_page() -> String {
        let router = Router::new().route(
            "/search/movie",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                Json(json!({
                    "page": 1,
                    "results": [
                        {
                            "id": 1084736,
                            "title": params.get("query").cloned().unwrap_or_default(),
                            "original_title": "Unreleased Original",
                            "backdrop_path": "/backdrop.jpg",
                            "genre_ids": [878],
                            "poster_path": null,
                            "release_date": "",
                            "vote_average": 0.0
                        }
                    ],
                    "total_results": 1
                }))
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_search_results_keep_every_provider_field() {
        let provider = TmdbProvider::new("key".to_string(), serve_search_page().await);

        let results = provider.search_results("Unreleased").await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["title"], "Unreleased");
        assert_eq!(results[0]["original_title"], "Unreleased Original");
        assert_eq!(results[0]["backdrop_path"], "/backdrop.jpg");
        assert_eq!(results[0]["genre_ids"], json!([878]));
        assert_eq!(results[0]["release_date"], Value::String(String::new()));
    }

    #[tokio::test]
    async fn test_search_movies_keeps_blank_release_date() {
        let provider = TmdbProvider::new("key".to_string(), serve_search_page().await);

        let movies = provider.search_movies("Unreleased").await.unwrap();

        assert_eq!(movies[0].id, 1084736);
        assert_eq!(movies[0].release_date, "");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let provider = TmdbProvider::new("key".to_string(), "https://api.themoviedb.org/3/".to_string());
        assert_eq!(provider.api_url, "https://api.themoviedb.org/3");
        assert_eq!(provider.name(), "tmdb");
    }

    #[test]
    fn test_page_without_results_is_empty() {
        let page: TmdbPage = serde_json::from_str(r#"{"page": 1, "total_results": 0}"#).unwrap();
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_page_results_keep_provider_order() {
        let page: TmdbPage = serde_json::from_value(serde_json::json!({
            "page": 1,
            "results": [
                {"id": 27205, "title": "Inception", "vote_average": 8.4},
                {"id": 157336, "title": "Interstellar", "vote_average": 8.5}
            ]
        }))
        .unwrap();

        let movies: Vec<MovieSummary> = page.results.into_iter().map(MovieSummary::from).collect();
        assert_eq!(movies[0].id, 27205);
        assert_eq!(movies[1].title, "Interstellar");
    }
}
