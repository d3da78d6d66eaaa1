use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeminiError>;

#[derive(Debug, Error)]
pub enum GeminiError {
    /// HTTP 429 from the provider. Callers treat this as retryable;
    /// every other variant is terminal for the request.
    #[error("Rate limited by Gemini API")]
    RateLimited,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Empty response: no candidates returned")]
    Empty,
}

impl GeminiError {
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, GeminiError::RateLimited)
    }
}

impl From<reqwest::Error> for GeminiError {
    fn from(err: reqwest::Error) -> Self {
        GeminiError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for GeminiError {
    fn from(err: serde_json::Error) -> Self {
        GeminiError::Parse(err.to_string())
    }
}
