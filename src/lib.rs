// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # FFS Client
//!
//! Client for a forensic file-activity search service: build a structured
//! query, walk its cursor-paginated results, and decode CSV or JSON payloads
//! into one typed record shape.
//!
//! ## Features
//!
//! - **Query Builder**: grouped filter clauses, sort, page size, immutable cursor substitution
//! - **Strict Decoding**: empty is absent, malformed is an error naming the field and row
//! - **Schema Drift Detection**: tabular headers are checked before any row is trusted
//! - **Cursor Pagination**: iterative, all-or-nothing, no retries in the core
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ffs_client::{ClientConfig, FfsClient, FilterClause, FilterGroup, Operator, Query};
//!
//! #[tokio::main]
//! async fn main() -> ffs_client::Result<()> {
//!     let client = FfsClient::from_config(ClientConfig::from_path("ffs.yaml")?)?;
//!     let credential = client.authenticate().await?;
//!
//!     let query = Query::builder()
//!         .group(FilterGroup::all(vec![FilterClause::new(
//!             Operator::Is,
//!             "fileName",
//!             "secret.txt",
//!         )]))
//!         .build();
//!
//!     for event in client.search(&query, &credential).await? {
//!         println!("{:?}", event.event_id);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          FfsClient                           │
//! │     authenticate() → Credential    search() / export_csv()   │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬───────────┐
//! │   Auth   │   HTTP    │   Paginate    │  Decode   │  Schema   │
//! ├──────────┼───────────┼───────────────┼───────────┼───────────┤
//! │ Basic    │ Transport │ Cursor loop   │ JSON      │ Registry  │
//! │ Bearer   │ Retry     │ Problems      │ CSV       │ Drift     │
//! │ Legacy   │ Rate Limit│ All-or-nothing│ Fields    │           │
//! └──────────┴───────────┴───────────────┴───────────┴───────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Token exchange
pub mod auth;

/// Transport seam and HTTP implementation
pub mod http;

/// Query builder
pub mod query;

/// Cursor pagination
pub mod pagination;

/// Record decoders (CSV, JSON)
pub mod decode;

/// Expected export columns and drift detection
pub mod schema;

/// Client configuration
pub mod config;

/// Template interpolation
pub mod template;

/// Search client facade
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{DecodeError, Error, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::{Authenticator, BasicAuthenticator, Credential};
pub use client::FfsClient;
pub use config::ClientConfig;
pub use decode::{FileEvent, JsonPageDecoder, PageDecoder, TabularReader};
pub use http::{HttpTransport, Transport, TransportRequest, TransportResponse};
pub use pagination::{PageResponse, Paginator, QueryProblem};
pub use query::{Combinator, FilterClause, FilterGroup, Operator, Query, Sort, SortDirection};
pub use schema::{SchemaRegistry, SchemaVersion};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
