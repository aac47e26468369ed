//! Pagination types
//!
//! Page shape shared by every decoder, server-side query problems, and the
//! state tracked while walking a cursor chain.

use crate::decode::FileEvent;
use serde::{Deserialize, Serialize};

/// Filter the server singled out in a [`QueryProblem`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Server-reported rejection of part of a query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryProblem {
    /// Offending filter, if the server named one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bad_filter: Option<BadFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub problem_type: Option<String>,
}

/// One decoded page of results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResponse {
    /// Records of this page, in wire order
    pub events: Vec<FileEvent>,
    /// Cursor of the next page; `None` or empty ends pagination
    pub next_cursor: Option<String>,
    /// Problems the server reported instead of results
    pub problems: Vec<QueryProblem>,
    /// Total match count, when the server reports one
    pub total_count: Option<i64>,
}

impl PageResponse {
    /// A terminal page carrying `events` and nothing else
    pub fn last(events: Vec<FileEvent>) -> Self {
        Self {
            events,
            ..Default::default()
        }
    }

    /// The non-empty next cursor, if any
    pub fn cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref().filter(|c| !c.is_empty())
    }

    /// Whether another page follows this one
    pub fn has_next(&self) -> bool {
        self.cursor().is_some()
    }
}

/// Where a pagination run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingPage,
    Accumulating,
    Succeeded,
    Failed,
}

impl Phase {
    /// Whether the run has ended, successfully or not
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Tracks one pagination run
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    pub phase: Phase,
    /// Pages received so far
    pub pages_fetched: u32,
    /// Records accepted so far
    pub records_fetched: u64,
    /// Cursor the next request will carry
    pub cursor: Option<String>,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// A request is in flight
    pub fn await_page(&mut self) {
        self.phase = Phase::AwaitingPage;
    }

    /// A problem-free page arrived with `count` records
    pub fn accept_page(&mut self, count: usize) {
        self.phase = Phase::Accumulating;
        self.pages_fetched += 1;
        self.records_fetched += count as u64;
    }

    /// Record the cursor for the next request
    pub fn set_cursor(&mut self, cursor: impl Into<String>) {
        self.cursor = Some(cursor.into());
    }

    /// The chain ended with an empty cursor
    pub fn succeed(&mut self) {
        self.phase = Phase::Succeeded;
        self.cursor = None;
    }

    /// The run failed; accumulated records are void
    pub fn fail(&mut self) {
        self.phase = Phase::Failed;
        self.records_fetched = 0;
    }
}
