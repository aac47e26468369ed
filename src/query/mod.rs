//! Query builder module
//!
//! Structured file-event search queries and their wire form.
//!
//! # Overview
//!
//! A [`Query`] is a value object: grouped filter clauses, an inter-group
//! combinator, sort and page size, plus the pagination cursor. The cursor is
//! the only part that changes between pages, and it changes by producing a
//! new query with [`Query::with_cursor`], never by mutating one in place, so
//! a base query can be shared across concurrent paginations.
//!
//! # Example
//!
//! ```
//! use ffs_client::query::{FilterClause, FilterGroup, Operator, Query};
//!
//! let query = Query::builder()
//!     .group(FilterGroup::all(vec![FilterClause::new(
//!         Operator::Is,
//!         "fileName",
//!         "secret.txt",
//!     )]))
//!     .page_size(2)
//!     .build();
//!
//! let next = query.with_cursor("p2");
//! assert_eq!(query.cursor(), None);
//! assert_eq!(next.cursor(), Some("p2"));
//! ```

mod builder;
mod types;

pub use builder::QueryBuilder;
pub use types::{
    Combinator, FilterClause, FilterGroup, Operator, Query, Sort, SortDirection, MAX_PAGE_SIZE,
};
