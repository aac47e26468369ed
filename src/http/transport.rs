//! Transport seam
//!
//! Request/response exchange used by the authenticator and the paginator.
//! Deadlines and cancellation belong to the implementation.

use crate::error::Result;
use crate::types::{HeaderList, Method};
use async_trait::async_trait;
use bytes::Bytes;

/// One outbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute endpoint URL
    pub url: String,
    /// Request headers, in insertion order
    pub headers: HeaderList,
    /// Request body
    pub body: Option<Bytes>,
}

impl TransportRequest {
    /// Create a request with no headers or body
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Set the body
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Look up a header value (case-insensitive)
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Response as returned by the wire, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Status line text, e.g. `"404 Not Found"`
    pub status_text: String,
    /// Complete response body
    pub body: Bytes,
}

impl TransportResponse {
    /// Create a response; the status text is derived from the code
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .map_or_else(|| status.to_string(), |reason| format!("{status} {reason}"));
        Self {
            status,
            status_text,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, lossily decoded
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Performs one request/response exchange
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the response, including non-2xx responses.
    ///
    /// Only failures to obtain a response at all are errors here.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        (**self).send(request).await
    }
}
