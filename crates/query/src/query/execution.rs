//! Query Builder execution for Model types

use sqlx::Row;

use super::builder::QueryBuilder;
use crate::error::QueryResult;
use crate::model::Model;

// Implement specialized methods for Model-typed query builders
impl<M: Model> QueryBuilder<M> {
    /// Execute query and return models
    pub async fn get(self, pool: &sqlx::Pool<sqlx::Postgres>) -> QueryResult<Vec<M>> {
        let sql = self.to_sql();
        tracing::debug!(%sql, "fetching result set");
        let rows = sqlx::query(&sql).fetch_all(pool).await?;

        let mut models = Vec::with_capacity(rows.len());
        for row in rows {
            models.push(M::from_row(&row)?);
        }

        Ok(models)
    }

    /// Count the rows the current conditions match, ignoring any
    /// ordering and pagination already applied
    pub async fn count(self, pool: &sqlx::Pool<sqlx::Postgres>) -> QueryResult<i64> {
        let mut query = self;
        query.select_fields = vec!["COUNT(*)".to_string()];
        query.order_by.clear();
        query.limit_count = None;
        query.offset_value = None;

        let sql = query.to_sql();
        tracing::debug!(%sql, "counting result set");
        let row = sqlx::query(&sql).fetch_one(pool).await?;
        Ok(row.get::<i64, _>(0))
    }

    /// Execute a statement (DELETE) and return the number of affected rows
    pub async fn execute(self, pool: &sqlx::Pool<sqlx::Postgres>) -> QueryResult<u64> {
        let sql = self.to_sql();
        tracing::debug!(%sql, "executing statement");
        let result = sqlx::query(&sql).execute(pool).await?;
        Ok(result.rows_affected())
    }
}
