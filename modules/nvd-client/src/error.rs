use thiserror::Error;

pub type Result<T> = std::result::Result<T, NvdError>;

#[derive(Debug, Error)]
pub enum NvdError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for NvdError {
    fn from(err: reqwest::Error) -> Self {
        NvdError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for NvdError {
    fn from(err: serde_json::Error) -> Self {
        NvdError::Parse(err.to_string())
    }
}
