use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("malformed item: {0}")]
    Malformed(String),

    #[error("invalid role for this write path: {0}")]
    InvalidRole(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("DynamoDB Query error: {0}")]
    Query(String),

    #[error("DynamoDB PutItem error: {0}")]
    PutItem(String),

    #[error("DynamoDB BatchWriteItem error: {0}")]
    Delete(String),

    #[error("{0}")]
    Deprecated(String),
}
