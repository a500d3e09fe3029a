use std::sync::Arc;

use serde_json::Value;

use crate::{
    error::PipelineError,
    models::{CandidateRecommendation, EnrichedRecommendation},
    services::providers::MetadataProvider,
};

/// Upper bound on model candidates considered per request
pub const MAX_CANDIDATES: usize = 6;

/// Why a recovered item was not usable as a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateDefect {
    NotObject,
    MissingTitle,
    MissingReason,
}

impl CandidateDefect {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateDefect::NotObject => "not_object",
            CandidateDefect::MissingTitle => "missing_title",
            CandidateDefect::MissingReason => "missing_reason",
        }
    }
}

/// Reads a non-blank string field from a candidate object
fn required_text(object: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}

/// Checks one recovered item has the `{title, reason}` shape
pub fn validate_candidate(item: &Value) -> Result<CandidateRecommendation, CandidateDefect> {
    let object = item.as_object().ok_or(CandidateDefect::NotObject)?;

    Ok(CandidateRecommendation {
        title: required_text(object, "title").ok_or(CandidateDefect::MissingTitle)?,
        reason: required_text(object, "reason").ok_or(CandidateDefect::MissingReason)?,
    })
}

/// Caps the recovered items and keeps the well-formed ones, in emission order
pub fn validate_candidates(items: &[Value]) -> Vec<CandidateRecommendation> {
    if items.len() > MAX_CANDIDATES {
        tracing::debug!(
            emitted = items.len(),
            considered = MAX_CANDIDATES,
            "Model emitted more candidates than considered"
        );
    }

    items
        .iter()
        .take(MAX_CANDIDATES)
        .enumerate()
        .filter_map(|(index, item)| match validate_candidate(item) {
            Ok(candidate) => Some(candidate),
            Err(defect) => {
                tracing::warn!(index, reason = defect.as_str(), "Discarding malformed candidate");
                None
            }
        })
        .collect()
}

/// Cross-references candidates against metadata.
///
/// Lookups run concurrently, one per candidate, but the result follows the
/// candidates' order. A candidate whose lookup finds nothing (or fails) is
/// dropped; an empty result is reported as [`PipelineError::ValidationEmpty`].
pub async fn enrich_candidates(
    provider: Arc<dyn MetadataProvider>,
    candidates: Vec<CandidateRecommendation>,
) -> Result<Vec<EnrichedRecommendation>, PipelineError> {
    let mut tasks = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let provider = Arc::clone(&provider);
        let task = tokio::spawn(async move {
            let matches = provider.search_movies(&candidate.title).await;
            (candidate, matches)
        });
        tasks.push(task);
    }

    let mut enriched = Vec::with_capacity(tasks.len());

    for task in tasks {
        match task.await {
            Ok((candidate, Ok(matches))) => match matches.into_iter().next() {
                Some(movie) => {
                    enriched.push(EnrichedRecommendation::from_metadata(movie, candidate.reason))
                }
                None => {
                    tracing::info!(title = %candidate.title, "No metadata match for candidate");
                }
            },
            Ok((candidate, Err(e))) => {
                tracing::warn!(title = %candidate.title, error = %e, "Metadata lookup failed for candidate");
            }
            Err(e) => {
                tracing::error!(error = %e, "Task join error");
            }
        }
    }

    if enriched.is_empty() {
        return Err(PipelineError::ValidationEmpty);
    }

    Ok(enriched)
}
