//! Decoder traits
//!
//! Defines the seam between the paginator and the wire formats.

use crate::error::Result;
use crate::pagination::PageResponse;
use crate::types::ExportFormat;

/// Turns one response body into a decoded page
pub trait PageDecoder: Send + Sync {
    /// Wire format this decoder understands
    fn format(&self) -> ExportFormat;

    /// Decode a complete response body.
    ///
    /// Decoding is strict: either every record in the body decodes, or the
    /// whole page fails.
    fn decode_page(&self, body: &[u8]) -> Result<PageResponse>;
}
