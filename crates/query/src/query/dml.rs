//! Query Builder DELETE operations

use super::builder::QueryBuilder;
use super::types::*;

impl<M> QueryBuilder<M> {
    /// Start a DELETE query
    pub fn delete_from(mut self, table: &str) -> Self {
        self.query_type = QueryType::Delete;
        self.delete_table = Some(table.to_string());
        self
    }

    /// Convert this result set into a DELETE over the same table,
    /// keeping its WHERE conditions
    pub fn delete(mut self) -> Self {
        self.query_type = QueryType::Delete;
        if self.delete_table.is_none() {
            self.delete_table = self.from_tables.first().cloned();
        }
        self
    }
}
