//! # gridkit-paging: Controller Paging Helpers
//!
//! A reusable role for web-application controllers: translates the
//! conventional grid query parameters (`limit`, `start`, `sort`, `dir`,
//! `to_delete`, plus free-form filter keys) into operations on a
//! [`gridkit_query::QueryBuilder`] result set, and performs bulk deletion
//! by primary key.
//!
//! Mix the [`Paging`] trait into a controller by naming the model it
//! serves; every operation has a working default, and the
//! `controller_search`/`controller_sort` hooks are the override points for
//! custom filter or ordering strategies.

pub mod controller;
pub mod error;
pub mod params;

pub use controller::{
    Deletion, PageSpec, Paging, PrimaryKey, DEFAULT_IGNORED_PARAMS, DEFAULT_PAGE_SIZE,
};
pub use error::{PagingError, PagingResult};
pub use params::Params;
