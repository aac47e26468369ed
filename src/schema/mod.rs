//! Schema registry module
//!
//! Holds the expected column list of the tabular export and checks observed
//! headers against it before any row is trusted.
//!
//! Positional decoding assumes column order never changes. If the upstream
//! service renames, adds, drops or reorders a column, the header check fails
//! loudly with [`Error::SchemaDrift`](crate::Error::SchemaDrift) instead of
//! letting rows decode into the wrong fields.

mod registry;
mod types;

pub use registry::SchemaRegistry;
pub use types::{Column, FieldKind, SchemaVersion, TimestampFormat};
