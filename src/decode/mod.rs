//! Response decoder module
//!
//! Supports: tabular (CSV) exports and the `fileEvents` JSON envelope
//!
//! # Overview
//!
//! Both wire variants decode into the same [`FileEvent`] shape. Field
//! coercion is strict: an empty value is absent, a malformed value is a
//! [`DecodeError`](crate::error::DecodeError) naming the field and the raw
//! row, and no partially decoded record is ever returned.

mod columns;
mod fields;
mod json;
mod record;
mod tabular;
mod types;

pub use columns::CSV_EXPORT_COLUMNS;
pub use json::JsonPageDecoder;
pub use record::FileEvent;
pub use tabular::{TabularReader, TabularRecords};
pub use types::PageDecoder;
