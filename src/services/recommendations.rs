use std::sync::Arc;

use serde_json::Value;

use crate::{
    config::Config,
    error::{AppResult, PipelineError},
    models::{EnrichedRecommendation, SeedMovie},
    services::{
        enrichment::{enrich_candidates, validate_candidates},
        fallback::rank_by_genre,
        llm::{CompletionRequest, ModelClient},
        prompt::{build_prompt, SYSTEM_INSTRUCTION},
        providers::MetadataProvider,
        recovery::{recover_candidates, RecoveryPath},
    },
};

/// Generation parameters for the model call, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: 2000,
            temperature: 0.7,
        }
    }
}

impl From<&Config> for GenerationSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_tokens: config.model_max_tokens,
            temperature: config.model_temperature,
        }
    }
}

/// Where the returned recommendations came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationSource {
    Model,
    GenreFallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationOutcome {
    pub recommendations: Vec<EnrichedRecommendation>,
    pub source: RecommendationSource,
}

enum PipelineState {
    AttemptingModel,
    Enriching(Vec<Value>),
    FallingBack(PipelineError),
    Done(RecommendationOutcome),
}

/// Generates "similar movie" recommendations for a seed movie
///
/// Asks the model first and verifies its picks against metadata. Any failure on
/// that path, including every pick being discarded, switches to the genre
/// fallback. Only a failure of the fallback's own lookup is returned as an error.
pub struct Recommender {
    model: Arc<dyn ModelClient>,
    metadata: Arc<dyn MetadataProvider>,
    settings: GenerationSettings,
}

impl Recommender {
    pub fn new(
        model: Arc<dyn ModelClient>,
        metadata: Arc<dyn MetadataProvider>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            model,
            metadata,
            settings,
        }
    }

    pub async fn recommend(&self, seed: &SeedMovie) -> AppResult<RecommendationOutcome> {
        let mut state = PipelineState::AttemptingModel;

        loop {
            state = match state {
                PipelineState::AttemptingModel => match self.ask_model(seed).await {
                    Ok(items) => PipelineState::Enriching(items),
                    Err(e) => PipelineState::FallingBack(e),
                },
                PipelineState::Enriching(items) => {
                    let candidates = validate_candidates(&items);
                    match enrich_candidates(Arc::clone(&self.metadata), candidates).await {
                        Ok(recommendations) => PipelineState::Done(RecommendationOutcome {
                            recommendations,
                            source: RecommendationSource::Model,
                        }),
                        Err(e) => PipelineState::FallingBack(e),
                    }
                }
                PipelineState::FallingBack(reason) => {
                    tracing::warn!(
                        seed = %seed.title,
                        failure = reason.kind(),
                        error = %reason,
                        "Model recommendations unavailable, falling back to genre ranking"
                    );

                    let recommendations =
                        rank_by_genre(self.metadata.as_ref(), &seed.genres, &seed.title).await?;

                    PipelineState::Done(RecommendationOutcome {
                        recommendations,
                        source: RecommendationSource::GenreFallback,
                    })
                }
                PipelineState::Done(outcome) => {
                    tracing::info!(
                        seed = %seed.title,
                        source = ?outcome.source,
                        count = outcome.recommendations.len(),
                        "Recommendations ready"
                    );
                    return Ok(outcome);
                }
            };
        }
    }

    /// Prompt, invoke, and recover: the part of the pipeline that talks to the model
    async fn ask_model(&self, seed: &SeedMovie) -> Result<Vec<Value>, PipelineError> {
        let request = CompletionRequest::new(SYSTEM_INSTRUCTION, build_prompt(seed))
            .with_max_tokens(self.settings.max_tokens)
            .with_temperature(self.settings.temperature);

        tracing::info!(seed = %seed.title, "Requesting model recommendations");

        let raw = self.model.complete(&request).await?;
        tracing::debug!(raw_len = raw.len(), raw = %raw, "Model completion received");

        let recovered = recover_candidates(&raw)?;
        if recovered.path == RecoveryPath::Repaired {
            tracing::info!(items = recovered.items.len(), "Model output needed repair");
        }

        Ok(recovered.items)
    }
}
