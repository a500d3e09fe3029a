//! OpenAI-compatible chat completions client (Hugging Face router by default).

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::{
    error::PipelineError,
    services::llm::{CompletionRequest, ModelClient},
};

#[derive(Clone)]
pub struct HuggingFaceClient {
    http_client: HttpClient,
    api_url: String,
    api_key: Option<String>,
    model: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl HuggingFaceClient {
    pub fn new(api_url: String, api_key: String, model: String, timeout: Duration) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
            api_key: Some(api_key).filter(|key| !key.is_empty()),
            model,
            timeout,
        }
    }

    fn request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": request.system},
                {"role": "user", "content": request.prompt},
            ],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        })
    }
}

/// Pulls `choices[0].message.content` out of a completion body
fn extract_content(body: &str) -> Result<String, PipelineError> {
    let completion: ChatCompletion = serde_json::from_str(body)
        .map_err(|e| PipelineError::MalformedUpstreamBody(e.to_string()))?;

    completion
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| PipelineError::MalformedUpstreamBody("response has no choices".to_string()))
}

#[async_trait::async_trait]
impl ModelClient for HuggingFaceClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, PipelineError> {
        debug!(model = %self.model, prompt_len = request.prompt.len(), "Calling completion endpoint");

        let mut builder = self
            .http_client
            .post(&self.api_url)
            .timeout(self.timeout)
            .json(&self.request_body(request));

        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| PipelineError::Transport(e.to_string()))?;

        let status = response.status();
        info!(model = %self.model, status = status.as_u16(), "Completion endpoint responded");

        if !status.is_success() {
            return Err(PipelineError::UpstreamStatus {
                code: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::Transport(e.to_string()))?;

        extract_content(&body)
    }
}
