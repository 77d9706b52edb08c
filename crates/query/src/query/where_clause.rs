//! Query Builder WHERE clause operations

use super::builder::QueryBuilder;
use super::types::*;
use serde_json::Value;

impl<M> QueryBuilder<M> {
    /// Add WHERE condition with equality
    pub fn where_eq<T>(mut self, column: &str, value: T) -> Self
    where
        T: Into<Value>,
    {
        self.where_conditions
            .push(WhereCondition::simple(column, QueryOperator::Equal, value));
        self
    }

    /// Add WHERE condition with not equal
    pub fn where_ne<T: Into<Value>>(mut self, column: &str, value: T) -> Self {
        self.where_conditions
            .push(WhereCondition::simple(column, QueryOperator::NotEqual, value));
        self
    }

    /// Add WHERE condition with greater than
    pub fn where_gt<T: Into<Value>>(mut self, column: &str, value: T) -> Self {
        self.where_conditions.push(WhereCondition::simple(
            column,
            QueryOperator::GreaterThan,
            value,
        ));
        self
    }

    /// Add WHERE condition with greater than or equal
    pub fn where_gte<T: Into<Value>>(mut self, column: &str, value: T) -> Self {
        self.where_conditions.push(WhereCondition::simple(
            column,
            QueryOperator::GreaterThanOrEqual,
            value,
        ));
        self
    }

    /// Add WHERE condition with less than
    pub fn where_lt<T: Into<Value>>(mut self, column: &str, value: T) -> Self {
        self.where_conditions
            .push(WhereCondition::simple(column, QueryOperator::LessThan, value));
        self
    }

    /// Add WHERE condition with less than or equal
    pub fn where_lte<T: Into<Value>>(mut self, column: &str, value: T) -> Self {
        self.where_conditions.push(WhereCondition::simple(
            column,
            QueryOperator::LessThanOrEqual,
            value,
        ));
        self
    }

    /// Add WHERE condition with LIKE
    pub fn where_like(mut self, column: &str, pattern: &str) -> Self {
        self.where_conditions.push(WhereCondition::simple(
            column,
            QueryOperator::Like,
            pattern.to_string(),
        ));
        self
    }

    /// Add WHERE condition with ILIKE (case-insensitive match)
    pub fn where_ilike(mut self, column: &str, pattern: &str) -> Self {
        self.where_conditions.push(WhereCondition::simple(
            column,
            QueryOperator::ILike,
            pattern.to_string(),
        ));
        self
    }

    /// Add WHERE condition matching any of the given ILIKE patterns.
    /// A single pattern stays a plain predicate; several become one
    /// parenthesized OR group.
    pub fn where_any_ilike<I>(mut self, column: &str, patterns: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut alternatives: Vec<WhereCondition> = patterns
            .into_iter()
            .map(|p| WhereCondition::simple(column, QueryOperator::ILike, p))
            .collect();

        match alternatives.len() {
            0 => {}
            1 => self.where_conditions.push(alternatives.remove(0)),
            _ => self.where_conditions.push(WhereCondition::AnyOf(alternatives)),
        }
        self
    }

    /// Add WHERE condition with IN
    pub fn where_in<T: Into<Value>>(mut self, column: &str, values: Vec<T>) -> Self {
        self.where_conditions.push(WhereCondition::with_values(
            column,
            QueryOperator::In,
            values.into_iter().map(|v| v.into()).collect(),
        ));
        self
    }

    /// Add WHERE condition with IS NULL
    pub fn where_null(mut self, column: &str) -> Self {
        self.where_conditions
            .push(WhereCondition::bare(column, QueryOperator::IsNull));
        self
    }

    /// Add WHERE condition with IS NOT NULL
    pub fn where_not_null(mut self, column: &str) -> Self {
        self.where_conditions
            .push(WhereCondition::bare(column, QueryOperator::IsNotNull));
        self
    }

    /// Add a parenthesized group where any branch may match (OR)
    pub fn where_any(mut self, conditions: Vec<WhereCondition>) -> Self {
        if !conditions.is_empty() {
            self.where_conditions.push(WhereCondition::AnyOf(conditions));
        }
        self
    }

    /// Add a parenthesized group where every branch must match (AND)
    pub fn where_all(mut self, conditions: Vec<WhereCondition>) -> Self {
        if !conditions.is_empty() {
            self.where_conditions.push(WhereCondition::AllOf(conditions));
        }
        self
    }
}
