//! Error types for the paging helpers

use gridkit_query::QueryError;
use thiserror::Error;

/// Result type alias for paging operations
pub type PagingResult<T> = Result<T, PagingError>;

/// Error types for paging, search, sort, and deletion helpers
#[derive(Debug, Error)]
pub enum PagingError {
    /// `limit` must parse as a positive row count
    #[error("limit must be a positive row count, got '{0}'")]
    InvalidPageSize(String),

    /// `to_delete` was absent, or carried no usable key values
    #[error("to_delete parameter is required and must not be empty")]
    MissingDeletionKey,

    /// A composite-key tuple had the wrong number of components
    #[error("expected {expected} key column(s), got {got} in '{tuple}'")]
    KeyArityMismatch {
        expected: usize,
        got: usize,
        tuple: String,
    },

    /// Underlying result-set error
    #[error(transparent)]
    Query(#[from] QueryError),
}
