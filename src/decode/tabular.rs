//! Tabular export reader
//!
//! Validates the header row against the schema registry, then decodes every
//! data row positionally. A header mismatch fails the whole payload before
//! any row is touched.

use super::columns::decode_csv_row;
use super::record::FileEvent;
use super::types::PageDecoder;
use crate::error::{DecodeError, Error, Result};
use crate::pagination::PageResponse;
use crate::schema::SchemaRegistry;
use crate::types::ExportFormat;
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use rayon::prelude::*;
use std::io::{BufRead, BufReader, Read};
use tracing::debug;

/// UTF-8 byte-order mark
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads a comma-separated export into file events
#[derive(Debug, Clone, Copy)]
pub struct TabularReader {
    registry: SchemaRegistry,
    parallel: bool,
}

impl Default for TabularReader {
    fn default() -> Self {
        Self {
            registry: SchemaRegistry::csv_export(),
            parallel: true,
        }
    }
}

impl TabularReader {
    /// Create a reader for the current export schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode rows on the calling thread only
    #[must_use]
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Schema the header is checked against
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Validate the header and return a lazy iterator over decoded rows.
    ///
    /// Fails with [`Error::SchemaDrift`] before yielding anything if the
    /// header does not match.
    pub fn records<R: Read>(&self, reader: R) -> Result<TabularRecords<R>> {
        let mut rows = csv_reader(reader)?.into_records();
        let header = rows
            .next()
            .transpose()?
            .ok_or_else(|| Error::schema_drift("", "payload has no header row"))?;

        self.registry.check_header(&header.iter().collect::<Vec<_>>())?;

        Ok(TabularRecords { rows, row: 0 })
    }

    /// Read a complete payload into memory and decode every row.
    ///
    /// Row order is preserved even when rows are decoded in parallel. If any
    /// row fails, the earliest failing row is reported and no records are
    /// returned.
    pub fn read_all(&self, body: &[u8]) -> Result<Vec<FileEvent>> {
        let rows = self
            .records(body)?
            .rows
            .collect::<std::result::Result<Vec<StringRecord>, csv::Error>>()?;

        debug!(rows = rows.len(), parallel = self.parallel, "Decoding export rows");

        let decoded: Vec<std::result::Result<FileEvent, DecodeError>> = if self.parallel {
            rows.par_iter()
                .enumerate()
                .map(|(index, record)| decode_record(record, index + 1))
                .collect()
        } else {
            rows.iter()
                .enumerate()
                .map(|(index, record)| decode_record(record, index + 1))
                .collect()
        };

        decoded
            .into_iter()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }
}

impl PageDecoder for TabularReader {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn decode_page(&self, body: &[u8]) -> Result<PageResponse> {
        // Tabular exports are never cursor-paginated
        Ok(PageResponse::last(self.read_all(body)?))
    }
}

/// Lazy sequence of decoded rows following a validated header
pub struct TabularRecords<R: Read> {
    rows: StringRecordsIntoIter<BufReader<R>>,
    row: usize,
}

impl<R: Read> Iterator for TabularRecords<R> {
    type Item = Result<FileEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.rows.next()?;
        self.row += 1;
        let row = self.row;
        Some(
            record
                .map_err(Error::from)
                .and_then(|record| decode_record(&record, row).map_err(Error::from)),
        )
    }
}

fn decode_record(record: &StringRecord, row: usize) -> std::result::Result<FileEvent, DecodeError> {
    let cells: Vec<&str> = record.iter().collect();
    decode_csv_row(&cells, row)
}

/// Build a CSV reader over `reader` with any leading byte-order mark removed.
///
/// Rows are read without header handling so the header can be compared
/// verbatim; `flexible` lets short or long rows reach the decoder, which
/// reports them as decode errors with the row attached.
fn csv_reader<R: Read>(reader: R) -> Result<csv::Reader<BufReader<R>>> {
    let mut buffered = BufReader::new(reader);
    if buffered.fill_buf()?.starts_with(UTF8_BOM) {
        buffered.consume(UTF8_BOM.len());
    }

    Ok(ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(b',')
        .from_reader(buffered))
}
