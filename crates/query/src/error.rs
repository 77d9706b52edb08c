//! Error types for the result-set layer

use thiserror::Error;

/// Result type alias for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Error types for query building and execution
#[derive(Debug, Error)]
pub enum QueryError {
    /// Database connection or statement error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Row could not be mapped onto a model
    #[error("row mapping error: {0}")]
    Mapping(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
