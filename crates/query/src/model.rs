//! Model trait - the contract a row type fulfils so result sets can be
//! built and hydrated for it.

use crate::error::QueryResult;
use crate::query::QueryBuilder;

/// A database-backed row type with a well-defined table and primary key.
pub trait Model: Sized {
    /// Table the model's rows live in
    fn table_name() -> &'static str;

    /// Column(s) uniquely identifying a row, in declaration order.
    /// Composite keys list every component column.
    fn primary_key_columns() -> &'static [&'static str] {
        &["id"]
    }

    /// Hydrate a model from a database row
    fn from_row(row: &sqlx::postgres::PgRow) -> QueryResult<Self>;

    /// Start a result set over this model's table
    fn query() -> QueryBuilder<Self> {
        QueryBuilder::new().select("*").from(Self::table_name())
    }
}
