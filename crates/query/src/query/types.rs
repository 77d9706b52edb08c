//! Query Builder Types - Core types and enums for query building

use serde_json::Value;
use std::fmt;

/// Query operator types
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOperator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Like,
    ILike,
    In,
    IsNull,
    IsNotNull,
}

impl fmt::Display for QueryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryOperator::Equal => write!(f, "="),
            QueryOperator::NotEqual => write!(f, "!="),
            QueryOperator::GreaterThan => write!(f, ">"),
            QueryOperator::GreaterThanOrEqual => write!(f, ">="),
            QueryOperator::LessThan => write!(f, "<"),
            QueryOperator::LessThanOrEqual => write!(f, "<="),
            QueryOperator::Like => write!(f, "LIKE"),
            QueryOperator::ILike => write!(f, "ILIKE"),
            QueryOperator::In => write!(f, "IN"),
            QueryOperator::IsNull => write!(f, "IS NULL"),
            QueryOperator::IsNotNull => write!(f, "IS NOT NULL"),
        }
    }
}

/// A WHERE clause condition tree. Groups render parenthesized, so nested
/// alternatives (e.g. composite-key tuples) keep their intended precedence.
#[derive(Debug, Clone)]
pub enum WhereCondition {
    /// A single `column OP value` predicate
    Simple {
        column: String,
        operator: QueryOperator,
        value: Option<Value>,
        values: Vec<Value>, // For IN
    },
    /// Alternatives joined with OR
    AnyOf(Vec<WhereCondition>),
    /// Requirements joined with AND
    AllOf(Vec<WhereCondition>),
}

impl WhereCondition {
    /// Single-value predicate
    pub fn simple<T: Into<Value>>(column: &str, operator: QueryOperator, value: T) -> Self {
        WhereCondition::Simple {
            column: column.to_string(),
            operator,
            value: Some(value.into()),
            values: Vec::new(),
        }
    }

    /// Predicate without a bound value (IS NULL / IS NOT NULL)
    pub fn bare(column: &str, operator: QueryOperator) -> Self {
        WhereCondition::Simple {
            column: column.to_string(),
            operator,
            value: None,
            values: Vec::new(),
        }
    }

    /// Multi-value predicate (IN)
    pub fn with_values(column: &str, operator: QueryOperator, values: Vec<Value>) -> Self {
        WhereCondition::Simple {
            column: column.to_string(),
            operator,
            value: None,
            values,
        }
    }

    /// Equality predicate shorthand
    pub fn eq<T: Into<Value>>(column: &str, value: T) -> Self {
        Self::simple(column, QueryOperator::Equal, value)
    }
}

/// Order by direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    /// Parse a request-supplied direction, case-insensitively.
    /// Anything other than `asc`/`desc` is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(OrderDirection::Asc),
            "desc" => Some(OrderDirection::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDirection::Asc => write!(f, "ASC"),
            OrderDirection::Desc => write!(f, "DESC"),
        }
    }
}

/// Query types supported by the builder
#[derive(Debug, Clone, PartialEq)]
pub enum QueryType {
    Select,
    Delete,
}
