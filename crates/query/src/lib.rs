//! # gridkit-query: Result-Set Layer for gridkit
//!
//! A model-typed, fluent query builder used as the result-set abstraction
//! behind the gridkit paging helpers. Covers SELECT and DELETE statement
//! construction, WHERE condition trees, ordering, offset pagination, and
//! execution against a PostgreSQL pool.

pub mod error;
pub mod model;
pub mod query;


// Re-export core traits and types
pub use error::*;
pub use model::*;
pub use query::*;
