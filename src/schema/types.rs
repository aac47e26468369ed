//! Schema types
//!
//! Column descriptors and the wire-variant tag carried by decoded records.

use serde::{Deserialize, Serialize};

/// Wire variant a record was translated from
///
/// The upstream API has shipped incompatible response shapes over time.
/// Each decoded record is tagged with the variant it came from rather than
/// keeping a parallel record type per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVersion {
    /// 67-column tabular export
    #[default]
    CsvExportV2,
    /// `fileEvents` JSON envelope
    JsonV1,
}

/// Timestamp layout used by a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampFormat {
    /// RFC 3339 with optional fractional seconds, e.g. `2021-04-01T10:15:30.123456789Z`
    Rfc3339,
    /// `YYYY-MM-DD HH:MM:SS`, interpreted as UTC
    SpaceSeparated,
}

/// How a raw cell is coerced into a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, empty is absent
    Text,
    /// Timestamp in the given layout
    Timestamp(TimestampFormat),
    /// Base-10 integer
    Integer,
    /// Strict boolean literal
    Boolean,
    /// Comma-delimited list
    List,
    /// One text value stored as a one-element list
    Single,
    /// Public IP address with CIDR/port suffix normalization
    PublicIp,
}

/// One column of a positional export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Header cell as emitted by the service
    pub header: &'static str,
    /// Canonical record field the column decodes into
    pub field: &'static str,
    /// Coercion rule
    pub kind: FieldKind,
}
