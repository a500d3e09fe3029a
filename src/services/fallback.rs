use crate::{
    error::{AppError, AppResult},
    models::{join_genre_names, DiscoverQuery, EnrichedRecommendation, Genre, SortOrder},
    services::{enrichment::MAX_CANDIDATES, providers::MetadataProvider},
};

/// Only the seed's leading genres are used, more makes discovery too narrow
pub const FALLBACK_GENRE_LIMIT: usize = 2;
/// Minimum vote count for a discovered title to qualify
pub const MIN_VOTE_COUNT: u32 = 1000;
/// How many discovered titles are examined before self-exclusion
pub const CANDIDATE_POOL: usize = 10;

/// Reason text attached to every genre-based recommendation
pub fn fallback_reason(genre_names: &str) -> String {
    format!(
        "Shares the {} genre with strong ratings and similar audience appeal",
        genre_names
    )
}

/// Model-free recommendations from genre overlap and rating
///
/// Deterministic given the provider's data. An empty genre list yields an
/// empty result without touching the provider; a provider failure is the
/// only error this returns.
pub async fn rank_by_genre(
    provider: &dyn MetadataProvider,
    genres: &[Genre],
    exclude_title: &str,
) -> AppResult<Vec<EnrichedRecommendation>> {
    if genres.is_empty() {
        tracing::info!("No genres on seed movie, nothing to fall back to");
        return Ok(Vec::new());
    }

    let genres = &genres[..genres.len().min(FALLBACK_GENRE_LIMIT)];
    let query = DiscoverQuery {
        genre_ids: genres.iter().map(|g| g.id).collect(),
        min_vote_count: MIN_VOTE_COUNT,
        sort_by: SortOrder::VoteAverageDesc,
    };

    let movies = provider
        .discover_by_genres(&query)
        .await
        .map_err(|e| AppError::Recommendation(e.to_string()))?;

    let reason = fallback_reason(&join_genre_names(genres));

    let recommendations: Vec<EnrichedRecommendation> = movies
        .into_iter()
        .take(CANDIDATE_POOL)
        .filter(|movie| movie.title != exclude_title)
        .take(MAX_CANDIDATES)
        .map(|movie| EnrichedRecommendation::from_metadata(movie, reason.as_str()))
        .collect();

    tracing::info!(
        genres = %query.genre_param(),
        count = recommendations.len(),
        "Genre fallback ranked"
    );

    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::MovieSummary, services::providers::MockMetadataProvider};

    fn movie(id: i64, title: &str) -> MovieSummary {
        MovieSummary {
            id,
            title: title.to_string(),
            poster_path: None,
            release_date: "2000-01-01".to_string(),
            vote_average: 8.0,
            overview: None,
        }
    }

    fn genre(id: i64, name: &str) -> Genre {
        Genre {
            id,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_genres_returns_empty_without_lookup() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_discover_by_genres().never();

        let result = rank_by_genre(&provider, &[], "Inception").await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_uses_first_two_genres() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_discover_by_genres()
            .withf(|query| {
                query.genre_ids == vec![28, 878]
                    && query.min_vote_count == 1000
                    && query.sort_by == SortOrder::VoteAverageDesc
            })
            .times(1)
            .returning(|_| Ok(vec![movie(1, "The Dark Knight")]));

        let genres = [genre(28, "Action"), genre(878, "Science Fiction"), genre(12, "Adventure")];
        let result = rank_by_genre(&provider, &genres, "Inception").await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(
            result[0].reason,
            "Shares the Action, Science Fiction genre with strong ratings and similar audience appeal"
        );
    }

    #[tokio::test]
    async fn test_excludes_seed_and_caps_results() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_discover_by_genres().returning(|_| {
            let mut movies = vec![movie(27205, "Inception")];
            movies.extend((1..=12).map(|i| movie(i, &format!("Drama {}", i))));
            Ok(movies)
        });

        let result = rank_by_genre(&provider, &[genre(18, "Drama")], "Inception")
            .await
            .unwrap();

        assert_eq!(result.len(), 6);
        assert!(result.iter().all(|r| r.title != "Inception"));
        let ids: Vec<i64> = result.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn test_pool_limits_what_is_examined() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_discover_by_genres().returning(|_| {
            // Nine copies of the seed followed by plenty of others: only one survives the pool
            let mut movies: Vec<MovieSummary> = (0..9).map(|i| movie(i, "Inception")).collect();
            movies.extend((100..110).map(|i| movie(i, &format!("Other {}", i))));
            Ok(movies)
        });

        let result = rank_by_genre(&provider, &[genre(18, "Drama")], "Inception")
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 100);
    }

    #[tokio::test]
    async fn test_exclusion_is_exact_match() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_discover_by_genres()
            .returning(|_| Ok(vec![movie(1, "inception"), movie(2, "Inception 2")]));

        let result = rank_by_genre(&provider, &[genre(18, "Drama")], "Inception")
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_provider_failure_is_surfaced() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_discover_by_genres()
            .returning(|_| Err(AppError::ExternalApi("TMDB API returned status 503".to_string())));

        let error = tokio_test::assert_err!(
            rank_by_genre(&provider, &[genre(18, "Drama")], "Inception").await
        );
        assert!(matches!(error, AppError::Recommendation(_)));
        assert!(error.to_string().contains("503"));
    }
}
