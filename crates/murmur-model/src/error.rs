use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("completion stream failed: {0}")]
    Stream(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
