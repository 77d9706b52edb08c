//! Query Builder Module - fluent construction of SELECT and DELETE
//! statements over a model's table

pub mod builder;
pub mod dml;
pub mod execution;
pub mod ordering;
pub mod pagination;
pub mod select;
pub mod sql_generation;
pub mod types;
pub mod where_clause;

// Re-export main types and builder
pub use builder::QueryBuilder;
pub use types::{OrderDirection, QueryOperator, WhereCondition};
