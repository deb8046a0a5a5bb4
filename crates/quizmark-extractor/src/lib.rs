use std::collections::BTreeMap;

use quizmark_types::AnswerQuery;

pub mod gemini;

pub use gemini::GeminiExtractor;

pub type QuestionId = String;

/// Remote question/answer extraction interface.
///
/// Implementations take a PNG screenshot and return, per question id, the
/// question text and the answer text to locate on screen. Question ids are
/// decimal integers rendered as strings; downstream fallback positioning
/// parses them as such.
#[async_trait::async_trait]
pub trait AnswerExtractor: Send + Sync {
    /// Extract all question/answer pairs visible in the screenshot
    async fn extract(
        &self,
        png: &[u8],
    ) -> Result<BTreeMap<QuestionId, AnswerQuery>, ExtractError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,

    #[error("Model returned no usable answers")]
    EmptyResponse,
}
