//! Pagination module
//!
//! # Overview
//!
//! The service pages results with an opaque cursor (`nextPgToken`). The
//! [`Paginator`] sends the query, decodes the page with a
//! [`PageDecoder`](crate::decode::PageDecoder), and repeats with the cursor
//! substituted into a fresh copy of the query until the cursor is empty.
//!
//! Pages are strictly sequential. The run is all-or-nothing: any transport
//! error, decode error or server-reported query problem ends it, and no
//! partial collection is returned.

mod paginator;
mod types;

pub use paginator::{Paginator, DEFAULT_AUTHORIZATION_SCHEME};
pub use types::{BadFilter, PageResponse, PaginationState, Phase, QueryProblem};
