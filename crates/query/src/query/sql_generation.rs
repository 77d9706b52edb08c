//! Query Builder SQL generation

use super::builder::QueryBuilder;
use super::types::*;
use serde_json::Value;

impl<M> QueryBuilder<M> {
    /// Convert the query to a SQL string with values inlined
    pub fn to_sql(&self) -> String {
        match self.query_type {
            QueryType::Select => self.build_select_sql(),
            QueryType::Delete => self.build_delete_sql(),
        }
    }

    /// Generate SQL with `$n` placeholders and return the bound parameters
    pub fn to_sql_with_params(&self) -> (String, Vec<String>) {
        let mut params = Vec::new();
        let mut param_counter = 1;

        let mut sql = match self.query_type {
            QueryType::Select => {
                let mut sql = self.build_select_head();
                self.push_where_clause_params(&mut sql, &mut params, &mut param_counter);
                self.push_order_limit_clause(&mut sql);
                sql
            }
            QueryType::Delete => {
                let mut sql = self.build_delete_head();
                self.push_where_clause_params(&mut sql, &mut params, &mut param_counter);
                sql
            }
        };

        sql.shrink_to_fit();
        (sql, params)
    }

    fn build_select_sql(&self) -> String {
        let mut sql = self.build_select_head();

        if !self.where_conditions.is_empty() {
            sql.push_str(" WHERE ");
            let conditions: Vec<String> = self
                .where_conditions
                .iter()
                .map(|c| self.render_condition(c))
                .collect();
            sql.push_str(&conditions.join(" AND "));
        }

        self.push_order_limit_clause(&mut sql);
        sql
    }

    fn build_delete_sql(&self) -> String {
        let mut sql = self.build_delete_head();

        if !self.where_conditions.is_empty() {
            sql.push_str(" WHERE ");
            let conditions: Vec<String> = self
                .where_conditions
                .iter()
                .map(|c| self.render_condition(c))
                .collect();
            sql.push_str(&conditions.join(" AND "));
        }

        sql
    }

    fn build_select_head(&self) -> String {
        let mut sql = String::new();

        if self.distinct {
            sql.push_str("SELECT DISTINCT ");
        } else {
            sql.push_str("SELECT ");
        }

        if self.select_fields.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.select_fields.join(", "));
        }

        if !self.from_tables.is_empty() {
            sql.push_str(" FROM ");
            sql.push_str(&self.from_tables.join(", "));
        }

        sql
    }

    fn build_delete_head(&self) -> String {
        match &self.delete_table {
            Some(table) => format!("DELETE FROM {}", table),
            None => String::new(),
        }
    }

    fn push_order_limit_clause(&self, sql: &mut String) {
        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            let order_clauses: Vec<String> = self
                .order_by
                .iter()
                .map(|(column, direction)| format!("{} {}", column, direction))
                .collect();
            sql.push_str(&order_clauses.join(", "));
        }

        if let Some(limit) = self.limit_count {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        if let Some(offset) = self.offset_value {
            sql.push_str(&format!(" OFFSET {}", offset));
        }
    }

    /// Render one condition node with values inlined
    fn render_condition(&self, condition: &WhereCondition) -> String {
        match condition {
            WhereCondition::Simple {
                column,
                operator,
                value,
                values,
            } => match operator {
                QueryOperator::IsNull | QueryOperator::IsNotNull => {
                    format!("{} {}", column, operator)
                }
                QueryOperator::In => {
                    let rendered: Vec<String> =
                        values.iter().map(|v| self.format_value(v)).collect();
                    format!("{} {} ({})", column, operator, rendered.join(", "))
                }
                _ => match value {
                    Some(value) => {
                        format!("{} {} {}", column, operator, self.format_value(value))
                    }
                    // A valueless predicate can only mean a null check
                    None => format!("{} {}", column, QueryOperator::IsNull),
                },
            },
            WhereCondition::AnyOf(branches) => {
                let rendered: Vec<String> =
                    branches.iter().map(|c| self.render_condition(c)).collect();
                format!("({})", rendered.join(" OR "))
            }
            WhereCondition::AllOf(branches) => {
                let rendered: Vec<String> =
                    branches.iter().map(|c| self.render_condition(c)).collect();
                format!("({})", rendered.join(" AND "))
            }
        }
    }

    fn push_where_clause_params(
        &self,
        sql: &mut String,
        params: &mut Vec<String>,
        param_counter: &mut i32,
    ) {
        if self.where_conditions.is_empty() {
            return;
        }

        sql.push_str(" WHERE ");
        let conditions: Vec<String> = self
            .where_conditions
            .iter()
            .map(|c| self.render_condition_params(c, params, param_counter))
            .collect();
        sql.push_str(&conditions.join(" AND "));
    }

    /// Render one condition node with `$n` placeholders
    fn render_condition_params(
        &self,
        condition: &WhereCondition,
        params: &mut Vec<String>,
        param_counter: &mut i32,
    ) -> String {
        match condition {
            WhereCondition::Simple {
                column,
                operator,
                value,
                values,
            } => match operator {
                QueryOperator::IsNull | QueryOperator::IsNotNull => {
                    format!("{} {}", column, operator)
                }
                QueryOperator::In => {
                    let mut placeholders = Vec::with_capacity(values.len());
                    for value in values {
                        placeholders.push(format!("${}", param_counter));
                        params.push(self.param_value(value));
                        *param_counter += 1;
                    }
                    format!("{} {} ({})", column, operator, placeholders.join(", "))
                }
                _ => match value {
                    Some(value) => {
                        let rendered = format!("{} {} ${}", column, operator, param_counter);
                        params.push(self.param_value(value));
                        *param_counter += 1;
                        rendered
                    }
                    // A valueless predicate can only mean a null check
                    None => format!("{} {}", column, QueryOperator::IsNull),
                },
            },
            WhereCondition::AnyOf(branches) => {
                let rendered: Vec<String> = branches
                    .iter()
                    .map(|c| self.render_condition_params(c, params, param_counter))
                    .collect();
                format!("({})", rendered.join(" OR "))
            }
            WhereCondition::AllOf(branches) => {
                let rendered: Vec<String> = branches
                    .iter()
                    .map(|c| self.render_condition_params(c, params, param_counter))
                    .collect();
                format!("({})", rendered.join(" AND "))
            }
        }
    }

    /// Format a value for inline SQL
    pub(crate) fn format_value(&self, value: &Value) -> String {
        match value {
            Value::String(s) => format!("'{}'", s.replace('\'', "''")), // Escape single quotes
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => "NULL".to_string(),
            _ => "NULL".to_string(), // Arrays and objects not supported
        }
    }

    /// Format a value for parameter binding (unquoted)
    fn param_value(&self, value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
