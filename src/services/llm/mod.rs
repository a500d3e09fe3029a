/// Hosted language model abstraction
use crate::error::PipelineError;

pub mod huggingface;

pub use huggingface::HuggingFaceClient;

/// A single chat-style completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            max_tokens: 2000,
            temperature: 0.7,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Trait for text-generation backends
///
/// One call, one attempt: implementations must not retry, and must report a
/// failure instead of guessing when the upstream body has an unexpected shape.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ModelClient: Send + Sync {
    /// Returns the raw text of the first completion choice
    async fn complete(&self, request: &CompletionRequest) -> Result<String, PipelineError>;
}
