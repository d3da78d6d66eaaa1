use thiserror::Error;

#[derive(Error, Debug)]
pub enum OtGuardError {
    #[error("Source error: {0}")]
    Source(String),

    #[error("Classification error: {0}")]
    Classification(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
