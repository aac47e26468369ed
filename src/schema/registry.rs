//! Expected header registry and drift detection

use super::types::{Column, SchemaVersion};
use crate::decode::CSV_EXPORT_COLUMNS;
use crate::error::{Error, Result};
use tracing::{debug, warn};

/// Ordered list of expected column names for one export variant
#[derive(Debug, Clone, Copy)]
pub struct SchemaRegistry {
    version: SchemaVersion,
    columns: &'static [Column],
}

impl SchemaRegistry {
    /// Create a registry over an arbitrary column table
    pub fn new(version: SchemaVersion, columns: &'static [Column]) -> Self {
        Self { version, columns }
    }

    /// Registry for the current tabular export
    pub fn csv_export() -> Self {
        Self::new(SchemaVersion::CsvExportV2, CSV_EXPORT_COLUMNS)
    }

    /// Export variant this registry describes
    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    /// Column descriptors in positional order
    pub fn columns(&self) -> &'static [Column] {
        self.columns
    }

    /// Expected header cells in positional order
    pub fn headers(&self) -> impl Iterator<Item = &'static str> {
        self.columns.iter().map(|c| c.header)
    }

    /// Number of expected columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the registry has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Compare an observed header row against the expected column list.
    ///
    /// Count and content must match exactly and in order. Only the final
    /// cell may carry a trailing CR/LF artifact, which is stripped before
    /// comparing.
    pub fn check_header<S: AsRef<str>>(&self, observed: &[S]) -> Result<()> {
        let observed_line = || {
            observed
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(",")
        };

        if observed.len() != self.columns.len() {
            warn!(
                expected = self.columns.len(),
                found = observed.len(),
                "Export header column count changed"
            );
            return Err(Error::schema_drift(
                observed_line(),
                format!(
                    "expected {} columns, found {}",
                    self.columns.len(),
                    observed.len()
                ),
            ));
        }

        let last = observed.len().saturating_sub(1);
        for (index, (cell, column)) in observed.iter().zip(self.columns).enumerate() {
            let cell = cell.as_ref();
            let cell = if index == last {
                cell.trim_end_matches(['\r', '\n'])
            } else {
                cell
            };

            if cell != column.header {
                warn!(
                    column = index,
                    expected = column.header,
                    found = cell,
                    "Export header column renamed or reordered"
                );
                return Err(Error::schema_drift(
                    observed_line(),
                    format!(
                        "column {index}: expected {:?}, found {cell:?}",
                        column.header
                    ),
                ));
            }
        }

        debug!(version = ?self.version, columns = self.columns.len(), "Export header matches");
        Ok(())
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::csv_export()
    }
}
