use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    /// The genre fallback could not reach the metadata provider
    #[error("Recommendation error: {0}")]
    Recommendation(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Recommendation(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::ExternalApi(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::HttpClient(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Failures on the model-backed recommendation path.
///
/// These never reach the client: the orchestrator logs them and switches to
/// the genre fallback. Kept distinct so the log says which stage gave up.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("upstream returned status {code}")]
    UpstreamStatus { code: u16 },

    #[error("malformed upstream body: {0}")]
    MalformedUpstreamBody(String),

    #[error("unrecoverable model response: {0}")]
    UnrecoverableResponse(String),

    #[error("no candidate survived validation")]
    ValidationEmpty,
}

impl PipelineError {
    /// Short stable label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Transport(_) => "transport",
            PipelineError::UpstreamStatus { .. } => "upstream_status",
            PipelineError::MalformedUpstreamBody(_) => "malformed_upstream_body",
            PipelineError::UnrecoverableResponse(_) => "unrecoverable_response",
            PipelineError::ValidationEmpty => "validation_empty",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (AppError::ExternalApi("x".into()), StatusCode::BAD_GATEWAY),
            (
                AppError::Recommendation("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_pipeline_error_kind() {
        assert_eq!(
            PipelineError::UpstreamStatus { code: 503 }.kind(),
            "upstream_status"
        );
        assert_eq!(PipelineError::ValidationEmpty.kind(), "validation_empty");
        assert_eq!(
            PipelineError::UpstreamStatus { code: 503 }.to_string(),
            "upstream returned status 503"
        );
    }
}
