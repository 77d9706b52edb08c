//! The controller paging role
//!
//! `Paging` is mixed into a controller for one model and maps the grid
//! query parameters onto its result set. Every operation has a working
//! default; `controller_search` and `controller_sort` are the strategy
//! override points.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use gridkit_query::model::Model;
use gridkit_query::query::{OrderDirection, QueryBuilder, WhereCondition};

use crate::error::{PagingError, PagingResult};
use crate::params::Params;

/// Rows per page when the request does not say otherwise
pub const DEFAULT_PAGE_SIZE: i64 = 25;

/// Parameter keys that are never treated as filter columns
pub const DEFAULT_IGNORED_PARAMS: &[&str] =
    &["limit", "start", "sort", "dir", "_dc", "rm", "xaction"];

/// Resolved pagination options: row count per page and one-based page number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSpec {
    pub rows: i64,
    pub page: i64,
}

/// A primary-key value parsed from `to_delete`: one component for simple
/// keys, one per key column for composite keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimaryKey(Vec<String>);

impl PrimaryKey {
    /// Single-column key
    pub fn single(value: impl Into<String>) -> Self {
        PrimaryKey(vec![value.into()])
    }

    /// Composite key from its components, in key-column order
    pub fn composite<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PrimaryKey(components.into_iter().map(Into::into).collect())
    }

    /// Key components, in key-column order
    pub fn components(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for PrimaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

/// A prepared bulk deletion: the DELETE query plus the identifiers it
/// targets, so callers can report what was removed
#[derive(Debug, Clone)]
pub struct Deletion<M: Model> {
    pub query: QueryBuilder<M>,
    pub keys: Vec<PrimaryKey>,
}

impl<M: Model> Deletion<M> {
    /// Run the DELETE and return the targeted identifiers
    pub async fn execute(self, pool: &sqlx::Pool<sqlx::Postgres>) -> PagingResult<Vec<PrimaryKey>> {
        let affected = self.query.execute(pool).await?;
        tracing::debug!(affected, keys = self.keys.len(), "bulk deletion executed");
        Ok(self.keys)
    }
}

/// Pagination/search/sort helpers for a controller serving one model.
///
/// Filter keys in `simple_search` come straight from the request, so a
/// controller exposing it should constrain them via [`Paging::ignored_params`]
/// or a [`Paging::controller_search`] override.
pub trait Paging {
    type Model: Model;

    /// Rows per page when the request carries no `limit`
    fn page_size(&self) -> i64 {
        DEFAULT_PAGE_SIZE
    }

    /// Parameter keys `simple_search` never treats as filter columns
    fn ignored_params(&self) -> &[&str] {
        DEFAULT_IGNORED_PARAMS
    }

    /// Resolve `limit`/`start` into a page specification.
    ///
    /// `limit` defaults to [`Paging::page_size`]; a present but
    /// non-positive or unparsable value is an error rather than a silent
    /// division by zero. `start` is a zero-based row offset, defaulting
    /// to 0 and clamped there for negative input.
    fn page_spec(&self, params: &Params) -> PagingResult<PageSpec> {
        let rows = match params.first("limit").map(str::trim).filter(|s| !s.is_empty()) {
            None => self.page_size(),
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| PagingError::InvalidPageSize(raw.to_string()))?,
        };

        let start = params
            .first("start")
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(0)
            .max(0);

        Ok(PageSpec {
            rows,
            page: start / rows + 1,
        })
    }

    /// Apply LIMIT/OFFSET from the `limit` and `start` parameters
    fn paginate(
        &self,
        rs: QueryBuilder<Self::Model>,
        params: &Params,
    ) -> PagingResult<QueryBuilder<Self::Model>> {
        let spec = self.page_spec(params)?;
        tracing::debug!(rows = spec.rows, page = spec.page, "applying pagination");
        Ok(rs.paginate(spec.rows, spec.page))
    }

    /// Filter the result set from the request's free-form parameters.
    /// Delegates to [`Paging::controller_search`], whose default is
    /// [`Paging::simple_search`].
    fn search(&self, rs: QueryBuilder<Self::Model>, params: &Params) -> QueryBuilder<Self::Model> {
        self.controller_search(rs, params)
    }

    /// Search strategy hook; override for custom filtering
    fn controller_search(
        &self,
        rs: QueryBuilder<Self::Model>,
        params: &Params,
    ) -> QueryBuilder<Self::Model> {
        self.simple_search(rs, params)
    }

    /// Case-insensitive substring filter per non-ignored parameter key.
    /// Several values under one key become OR alternatives; distinct keys
    /// combine with AND. Empty values are skipped.
    fn simple_search(
        &self,
        mut rs: QueryBuilder<Self::Model>,
        params: &Params,
    ) -> QueryBuilder<Self::Model> {
        for (key, values) in params.iter() {
            if self.ignored_params().contains(&key) {
                continue;
            }

            let patterns: Vec<String> = values
                .iter()
                .filter(|value| !value.is_empty())
                .map(|value| format!("%{}%", value))
                .collect();

            if patterns.is_empty() {
                tracing::debug!(key, "skipping filter key with no usable value");
                continue;
            }

            rs = rs.where_any_ilike(key, patterns);
        }
        rs
    }

    /// Order the result set from the `sort`/`dir` parameters.
    /// Delegates to [`Paging::controller_sort`], whose default is
    /// [`Paging::simple_sort`].
    fn sort(&self, rs: QueryBuilder<Self::Model>, params: &Params) -> QueryBuilder<Self::Model> {
        self.controller_sort(rs, params)
    }

    /// Sort strategy hook; override for custom ordering
    fn controller_sort(
        &self,
        rs: QueryBuilder<Self::Model>,
        params: &Params,
    ) -> QueryBuilder<Self::Model> {
        self.simple_sort(rs, params)
    }

    /// Order by `sort`/`dir` when both are present and `dir` parses as
    /// `asc`/`desc`; otherwise order by the model's primary-key column(s)
    fn simple_sort(
        &self,
        rs: QueryBuilder<Self::Model>,
        params: &Params,
    ) -> QueryBuilder<Self::Model> {
        let column = params.first("sort").map(str::trim).filter(|s| !s.is_empty());
        let dir = params.first("dir");

        if let (Some(column), Some(dir)) = (column, dir) {
            match OrderDirection::parse(dir) {
                Some(direction) => return rs.order_by_dir(column, direction),
                None => {
                    tracing::debug!(dir, "unrecognized sort direction, using key ordering");
                }
            }
        }

        Self::Model::primary_key_columns()
            .iter()
            .fold(rs, |rs, key_column| rs.order_by(key_column))
    }

    /// Sort, then paginate
    fn page_and_sort(
        &self,
        rs: QueryBuilder<Self::Model>,
        params: &Params,
    ) -> PagingResult<QueryBuilder<Self::Model>> {
        let rs = self.sort(rs, params);
        self.paginate(rs, params)
    }

    /// Prepare a bulk deletion from the `to_delete` parameter.
    ///
    /// With a single-column key every `to_delete` value is split on commas
    /// and the union of tokens forms the id list. With a composite key each
    /// value is one comma-separated tuple whose arity must match the key
    /// columns. Fails when `to_delete` is absent or carries nothing usable.
    fn simple_deletion(
        &self,
        rs: QueryBuilder<Self::Model>,
        params: &Params,
    ) -> PagingResult<Deletion<Self::Model>> {
        let raw_values: Vec<&String> = params
            .all("to_delete")
            .iter()
            .filter(|value| !value.trim().is_empty())
            .collect();

        if raw_values.is_empty() {
            return Err(PagingError::MissingDeletionKey);
        }

        let key_columns = Self::Model::primary_key_columns();

        if key_columns.len() == 1 {
            let tokens: Vec<&str> = raw_values
                .iter()
                .flat_map(|value| value.split(','))
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .collect();

            if tokens.is_empty() {
                return Err(PagingError::MissingDeletionKey);
            }

            let keys: Vec<PrimaryKey> = tokens.iter().map(|token| PrimaryKey::single(*token)).collect();
            // Key tokens bind as text verbatim, so the returned identifiers
            // are exactly what the DELETE matched
            let id_values: Vec<Value> = tokens.iter().map(|token| Value::from(*token)).collect();
            let query = rs.delete().where_in(key_columns[0], id_values);

            return Ok(Deletion { query, keys });
        }

        let mut keys = Vec::with_capacity(raw_values.len());
        let mut tuple_conditions = Vec::with_capacity(raw_values.len());

        for value in raw_values {
            let components: Vec<&str> = value.split(',').map(str::trim).collect();
            if components.len() != key_columns.len() {
                return Err(PagingError::KeyArityMismatch {
                    expected: key_columns.len(),
                    got: components.len(),
                    tuple: value.to_string(),
                });
            }

            let pairs: Vec<WhereCondition> = key_columns
                .iter()
                .zip(&components)
                .map(|(column, component)| WhereCondition::eq(column, *component))
                .collect();

            tuple_conditions.push(WhereCondition::AllOf(pairs));
            keys.push(PrimaryKey::composite(components));
        }

        let query = rs.delete().where_any(tuple_conditions);
        Ok(Deletion { query, keys })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridkit_query::error::QueryResult;

    #[derive(Debug, Clone)]
    struct Person;

    impl Model for Person {
        fn table_name() -> &'static str {
            "people"
        }

        fn from_row(_row: &sqlx::postgres::PgRow) -> QueryResult<Self> {
            Ok(Person)
        }
    }

    #[derive(Debug, Clone)]
    struct OrderLine;

    impl Model for OrderLine {
        fn table_name() -> &'static str {
            "order_lines"
        }

        fn primary_key_columns() -> &'static [&'static str] {
            &["order_id", "line_no"]
        }

        fn from_row(_row: &sqlx::postgres::PgRow) -> QueryResult<Self> {
            Ok(OrderLine)
        }
    }

    struct PeopleController;

    impl Paging for PeopleController {
        type Model = Person;
    }

    struct OrderLineController;

    impl Paging for OrderLineController {
        type Model = OrderLine;
    }

    /// Controller overriding the search strategy hook
    struct ExactMatchController;

    impl Paging for ExactMatchController {
        type Model = Person;

        fn controller_search(
            &self,
            mut rs: QueryBuilder<Person>,
            params: &Params,
        ) -> QueryBuilder<Person> {
            if let Some(name) = params.first("name") {
                rs = rs.where_eq("name", name);
            }
            rs
        }
    }

    mod pagination {
        use super::*;

        #[test]
        fn test_start_and_limit_become_page_and_rows() {
            let controller = PeopleController;
            let params = Params::from_query("start=50&limit=25");

            let spec = controller.page_spec(&params).unwrap();
            assert_eq!(spec, PageSpec { rows: 25, page: 3 });

            let sql = controller
                .paginate(Person::query(), &params)
                .unwrap()
                .to_sql();
            assert!(sql.contains("LIMIT 25"));
            assert!(sql.contains("OFFSET 50"));
        }

        #[test]
        fn test_defaults_when_parameters_are_absent() {
            let controller = PeopleController;
            let params = Params::new();

            let spec = controller.page_spec(&params).unwrap();
            assert_eq!(spec, PageSpec { rows: DEFAULT_PAGE_SIZE, page: 1 });

            let sql = controller
                .paginate(Person::query(), &params)
                .unwrap()
                .to_sql();
            assert!(sql.contains("LIMIT 25"));
            assert!(sql.contains("OFFSET 0"));
        }

        #[test]
        fn test_empty_limit_falls_back_to_page_size() {
            let controller = PeopleController;
            let params = Params::from_query("limit=&start=30");

            let spec = controller.page_spec(&params).unwrap();
            assert_eq!(spec, PageSpec { rows: 25, page: 2 });
        }

        #[test]
        fn test_zero_limit_is_an_explicit_error() {
            let controller = PeopleController;
            let params = Params::from_query("limit=0");

            let err = controller.page_spec(&params).unwrap_err();
            assert!(matches!(err, PagingError::InvalidPageSize(raw) if raw == "0"));
        }

        #[test]
        fn test_unparsable_limit_is_an_explicit_error() {
            let controller = PeopleController;
            let params = Params::from_query("limit=lots");

            assert!(matches!(
                controller.page_spec(&params),
                Err(PagingError::InvalidPageSize(_))
            ));
        }

        #[test]
        fn test_negative_start_clamps_to_first_page() {
            let controller = PeopleController;
            let params = Params::from_query("start=-10&limit=25");

            let spec = controller.page_spec(&params).unwrap();
            assert_eq!(spec, PageSpec { rows: 25, page: 1 });
        }

        #[test]
        fn test_custom_page_size() {
            struct SmallPages;
            impl Paging for SmallPages {
                type Model = Person;
                fn page_size(&self) -> i64 {
                    10
                }
            }

            let spec = SmallPages.page_spec(&Params::from_query("start=30")).unwrap();
            assert_eq!(spec, PageSpec { rows: 10, page: 4 });
        }
    }

    mod search {
        use super::*;

        #[test]
        fn test_substring_filter_on_named_column() {
            let controller = PeopleController;
            let params = Params::from_query("name=foo");

            let sql = controller.search(Person::query(), &params).to_sql();
            assert_eq!(sql, "SELECT * FROM people WHERE name ILIKE '%foo%'");
        }

        #[test]
        fn test_repeated_values_combine_with_or() {
            let controller = PeopleController;
            let params = Params::from_query("name=foo&name=bar");

            let sql = controller.search(Person::query(), &params).to_sql();
            assert_eq!(
                sql,
                "SELECT * FROM people WHERE (name ILIKE '%foo%' OR name ILIKE '%bar%')"
            );
        }

        #[test]
        fn test_distinct_keys_combine_with_and() {
            let controller = PeopleController;
            let params = Params::from_query("name=foo&city=berlin");

            let sql = controller.search(Person::query(), &params).to_sql();
            assert_eq!(
                sql,
                "SELECT * FROM people WHERE name ILIKE '%foo%' AND city ILIKE '%berlin%'"
            );
        }

        #[test]
        fn test_paging_and_bookkeeping_keys_are_ignored() {
            let controller = PeopleController;
            let params =
                Params::from_query("limit=25&start=0&sort=name&dir=asc&_dc=123&rm=x&xaction=read");

            let sql = controller.search(Person::query(), &params).to_sql();
            assert_eq!(sql, "SELECT * FROM people");
        }

        #[test]
        fn test_empty_values_are_ignored() {
            let controller = PeopleController;
            let params = Params::from_query("name=&city=berlin");

            let sql = controller.search(Person::query(), &params).to_sql();
            assert_eq!(sql, "SELECT * FROM people WHERE city ILIKE '%berlin%'");
        }

        #[test]
        fn test_controller_search_override_wins() {
            let controller = ExactMatchController;
            let params = Params::from_query("name=foo");

            let sql = controller.search(Person::query(), &params).to_sql();
            assert_eq!(sql, "SELECT * FROM people WHERE name = 'foo'");
        }
    }

    mod sorting {
        use super::*;

        #[test]
        fn test_defaults_to_primary_key_ordering() {
            let controller = PeopleController;

            let sql = controller.sort(Person::query(), &Params::new()).to_sql();
            assert_eq!(sql, "SELECT * FROM people ORDER BY id ASC");
        }

        #[test]
        fn test_composite_key_orders_by_every_column() {
            let controller = OrderLineController;

            let sql = controller.sort(OrderLine::query(), &Params::new()).to_sql();
            assert_eq!(
                sql,
                "SELECT * FROM order_lines ORDER BY order_id ASC, line_no ASC"
            );
        }

        #[test]
        fn test_sort_and_dir_order_the_named_column() {
            let controller = PeopleController;

            let sql = controller
                .sort(Person::query(), &Params::from_query("sort=name&dir=asc"))
                .to_sql();
            assert_eq!(sql, "SELECT * FROM people ORDER BY name ASC");

            let sql = controller
                .sort(Person::query(), &Params::from_query("sort=name&dir=DESC"))
                .to_sql();
            assert_eq!(sql, "SELECT * FROM people ORDER BY name DESC");
        }

        #[test]
        fn test_sort_without_dir_uses_key_ordering() {
            let controller = PeopleController;

            let sql = controller
                .sort(Person::query(), &Params::from_query("sort=name"))
                .to_sql();
            assert_eq!(sql, "SELECT * FROM people ORDER BY id ASC");
        }

        #[test]
        fn test_unrecognized_dir_uses_key_ordering() {
            let controller = PeopleController;

            let sql = controller
                .sort(
                    Person::query(),
                    &Params::from_query("sort=name&dir=sideways"),
                )
                .to_sql();
            assert_eq!(sql, "SELECT * FROM people ORDER BY id ASC");
        }

        #[test]
        fn test_controller_sort_override_wins() {
            struct NewestFirst;
            impl Paging for NewestFirst {
                type Model = Person;
                fn controller_sort(
                    &self,
                    rs: QueryBuilder<Person>,
                    _params: &Params,
                ) -> QueryBuilder<Person> {
                    rs.order_by_desc("created_at")
                }
            }

            let sql = NewestFirst
                .sort(Person::query(), &Params::from_query("sort=name&dir=asc"))
                .to_sql();
            assert_eq!(sql, "SELECT * FROM people ORDER BY created_at DESC");
        }
    }

    mod page_and_sort {
        use super::*;

        #[test]
        fn test_orders_then_paginates() {
            let controller = PeopleController;
            let params = Params::from_query("sort=name&dir=desc&start=50&limit=25");

            let sql = controller
                .page_and_sort(Person::query(), &params)
                .unwrap()
                .to_sql();
            assert_eq!(
                sql,
                "SELECT * FROM people ORDER BY name DESC LIMIT 25 OFFSET 50"
            );
        }

        #[test]
        fn test_propagates_pagination_errors() {
            let controller = PeopleController;
            let params = Params::from_query("sort=name&dir=desc&limit=0");

            assert!(matches!(
                controller.page_and_sort(Person::query(), &params),
                Err(PagingError::InvalidPageSize(_))
            ));
        }
    }

    mod deletion {
        use super::*;

        #[test]
        fn test_requires_to_delete() {
            let controller = PeopleController;

            let err = controller
                .simple_deletion(Person::query(), &Params::new())
                .unwrap_err();
            assert!(matches!(err, PagingError::MissingDeletionKey));
        }

        #[test]
        fn test_rejects_empty_to_delete() {
            let controller = PeopleController;
            let params = Params::from_query("to_delete=");

            assert!(matches!(
                controller.simple_deletion(Person::query(), &params),
                Err(PagingError::MissingDeletionKey)
            ));
        }

        #[test]
        fn test_single_key_comma_list() {
            let controller = PeopleController;
            let params = Params::from_query("to_delete=1,2,3");

            let deletion = controller
                .simple_deletion(Person::query(), &params)
                .unwrap();
            assert_eq!(
                deletion.query.to_sql(),
                "DELETE FROM people WHERE id IN ('1', '2', '3')"
            );
            assert_eq!(
                deletion.keys,
                vec![
                    PrimaryKey::single("1"),
                    PrimaryKey::single("2"),
                    PrimaryKey::single("3"),
                ]
            );
        }

        #[test]
        fn test_repeated_to_delete_params_union() {
            let controller = PeopleController;
            let params = Params::from_query("to_delete=1,2&to_delete=3");

            let deletion = controller
                .simple_deletion(Person::query(), &params)
                .unwrap();
            assert_eq!(
                deletion.query.to_sql(),
                "DELETE FROM people WHERE id IN ('1', '2', '3')"
            );
            assert_eq!(deletion.keys.len(), 3);
        }

        #[test]
        fn test_identifiers_bind_verbatim() {
            let controller = PeopleController;
            let params = Params::from_query("to_delete=007,042");

            let deletion = controller
                .simple_deletion(Person::query(), &params)
                .unwrap();
            assert_eq!(
                deletion.query.to_sql(),
                "DELETE FROM people WHERE id IN ('007', '042')"
            );
            assert_eq!(
                deletion.keys,
                vec![PrimaryKey::single("007"), PrimaryKey::single("042")]
            );
        }

        #[test]
        fn test_non_numeric_identifiers_bind_as_text() {
            let controller = PeopleController;
            let params = Params::from_query("to_delete=abc,def");

            let deletion = controller
                .simple_deletion(Person::query(), &params)
                .unwrap();
            assert_eq!(
                deletion.query.to_sql(),
                "DELETE FROM people WHERE id IN ('abc', 'def')"
            );
        }

        #[test]
        fn test_composite_key_tuples() {
            let controller = OrderLineController;
            let params = Params::from_query("to_delete=1,10&to_delete=2,20");

            let deletion = controller
                .simple_deletion(OrderLine::query(), &params)
                .unwrap();
            assert_eq!(
                deletion.query.to_sql(),
                "DELETE FROM order_lines WHERE \
                 ((order_id = '1' AND line_no = '10') OR (order_id = '2' AND line_no = '20'))"
            );
            assert_eq!(
                deletion.keys,
                vec![
                    PrimaryKey::composite(["1", "10"]),
                    PrimaryKey::composite(["2", "20"]),
                ]
            );
        }

        #[test]
        fn test_composite_arity_mismatch() {
            let controller = OrderLineController;
            let params = Params::from_query("to_delete=1,10,99");

            let err = controller
                .simple_deletion(OrderLine::query(), &params)
                .unwrap_err();
            match err {
                PagingError::KeyArityMismatch {
                    expected,
                    got,
                    tuple,
                } => {
                    assert_eq!(expected, 2);
                    assert_eq!(got, 3);
                    assert_eq!(tuple, "1,10,99");
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_key_display_joins_components() {
            assert_eq!(PrimaryKey::single("7").to_string(), "7");
            assert_eq!(PrimaryKey::composite(["1", "10"]).to_string(), "1,10");
        }
    }
}
