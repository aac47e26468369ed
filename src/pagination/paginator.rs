//! Cursor-chain paginator
//!
//! Sends a query, decodes the page, and repeats with the server's cursor
//! until the cursor comes back empty. The loop is iterative so long result
//! sets never grow the call stack.

use super::types::{PageResponse, PaginationState};
use crate::auth::Credential;
use crate::decode::{FileEvent, PageDecoder};
use crate::error::{Error, Result};
use crate::http::{Transport, TransportRequest};
use crate::query::Query;
use crate::types::Method;
use tracing::{debug, info, warn};

/// Authorization scheme the search service expects by default
pub const DEFAULT_AUTHORIZATION_SCHEME: &str = "v3_user_token";

/// Walks every page of one query
///
/// Holds no per-run state, so one paginator can serve concurrent runs.
pub struct Paginator<'t, T: ?Sized, D> {
    transport: &'t T,
    decoder: D,
    endpoint: String,
    authorization_scheme: String,
}

impl<'t, T, D> Paginator<'t, T, D>
where
    T: Transport + ?Sized,
    D: PageDecoder,
{
    /// Create a paginator posting queries to `endpoint`
    pub fn new(transport: &'t T, decoder: D, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            decoder,
            endpoint: endpoint.into(),
            authorization_scheme: DEFAULT_AUTHORIZATION_SCHEME.to_string(),
        }
    }

    /// Override the `Authorization` header scheme
    #[must_use]
    pub fn authorization_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.authorization_scheme = scheme.into();
        self
    }

    /// Run `query` to completion.
    ///
    /// Returns every record of every page in page order, or the first error.
    /// A page carrying query problems ends the run with
    /// [`Error::QueryProblems`] and records from earlier pages are dropped.
    pub async fn run(&self, query: &Query, credential: &Credential) -> Result<Vec<FileEvent>> {
        let mut state = PaginationState::new();
        let result = self.walk(query, credential, &mut state).await;
        if let Err(ref e) = result {
            state.fail();
            warn!(pages = state.pages_fetched, "Pagination failed: {e}");
        }
        result
    }

    async fn walk(
        &self,
        query: &Query,
        credential: &Credential,
        state: &mut PaginationState,
    ) -> Result<Vec<FileEvent>> {
        if credential.is_empty() {
            return Err(Error::MissingCredential);
        }
        query.validate()?;

        let authorization = format!("{} {}", self.authorization_scheme, credential.token);
        let mut events = Vec::new();
        let mut next_query: Option<Query> = None;

        loop {
            let current = next_query.as_ref().unwrap_or(query);
            state.await_page();
            let page = self.fetch_page(current, &authorization).await?;

            if !page.problems.is_empty() {
                let serialized = serde_json::to_string(&page.problems)?;
                return Err(Error::QueryProblems {
                    problems: page.problems,
                    serialized,
                });
            }

            state.accept_page(page.events.len());
            let cursor = page.cursor().map(str::to_owned);
            debug!(
                page = state.pages_fetched,
                records = page.events.len(),
                total_count = ?page.total_count,
                has_next = cursor.is_some(),
                "Received page"
            );
            events.extend(page.events);

            match cursor {
                Some(cursor) => {
                    // Derive from the base query so only the cursor differs
                    next_query = Some(query.with_cursor(cursor.as_str()));
                    state.set_cursor(cursor);
                }
                None => {
                    state.succeed();
                    info!(
                        pages = state.pages_fetched,
                        records = state.records_fetched,
                        "Pagination complete"
                    );
                    return Ok(events);
                }
            }
        }
    }

    async fn fetch_page(&self, query: &Query, authorization: &str) -> Result<PageResponse> {
        let request = TransportRequest::new(Method::POST, &self.endpoint)
            .header("Content-Type", "application/json")
            .header("Accept", self.decoder.format().accept())
            .header("Authorization", authorization)
            .body(query.to_json_bytes()?);

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(Error::transport(
                response.status,
                response.status_text.clone(),
                response.text(),
            ));
        }

        self.decoder.decode_page(&response.body)
    }
}
