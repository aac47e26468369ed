//! Query types
//!
//! Field names follow the service's wire format (`groupClause`, `pgSize`,
//! `pgToken`, `srtKey`, ...).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest page size the service accepts
pub const MAX_PAGE_SIZE: u32 = 10_000;

/// Filter operator
///
/// The named variants are the operators the service documents. Anything
/// else is carried verbatim in `Other` and left for the server to judge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    Is,
    IsNot,
    OnOrAfter,
    OnOrBefore,
    WithinTheLast,
    Exists,
    DoesNotExist,
    #[serde(untagged)]
    Other(String),
}

impl Operator {
    fn is_blank(&self) -> bool {
        matches!(self, Operator::Other(name) if name.trim().is_empty())
    }
}

/// Boolean combinator between clauses or groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Combinator {
    #[default]
    And,
    Or,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::And => write!(f, "AND"),
            Combinator::Or => write!(f, "OR"),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort key and direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    /// Field to sort on, e.g. `eventTimestamp`
    pub key: String,
    /// Direction
    pub direction: SortDirection,
}

impl Sort {
    /// Ascending sort on `key`
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on `key`
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::asc("eventTimestamp")
    }
}

/// One atomic predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterClause {
    pub operator: Operator,
    pub term: String,
    #[serde(default)]
    pub value: String,
}

impl FilterClause {
    /// Create a filter clause
    pub fn new(operator: Operator, term: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            operator,
            term: term.into(),
            value: value.into(),
        }
    }
}

/// Ordered clauses joined by one combinator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroup {
    pub filters: Vec<FilterClause>,
    #[serde(default)]
    pub filter_clause: Combinator,
}

impl FilterGroup {
    /// Create a group with an explicit combinator
    pub fn new(filters: Vec<FilterClause>, filter_clause: Combinator) -> Self {
        Self {
            filters,
            filter_clause,
        }
    }

    /// Clauses that must all match
    pub fn all(filters: Vec<FilterClause>) -> Self {
        Self::new(filters, Combinator::And)
    }

    /// Clauses of which any may match
    pub fn any(filters: Vec<FilterClause>) -> Self {
        Self::new(filters, Combinator::Or)
    }
}

/// A file-event search query
///
/// Fields are read-only; derive a query for the next page with
/// [`Query::with_cursor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    groups: Vec<FilterGroup>,
    #[serde(rename = "groupClause", default)]
    group_clause: Combinator,
    #[serde(rename = "pgNum", default, skip_serializing_if = "Option::is_none")]
    page_number: Option<u32>,
    #[serde(rename = "pgSize")]
    page_size: u32,
    #[serde(rename = "pgToken", default, skip_serializing_if = "Option::is_none")]
    page_token: Option<String>,
    #[serde(rename = "srtDir", default)]
    sort_direction: SortDirection,
    #[serde(rename = "srtKey")]
    sort_key: String,
}

impl Query {
    /// Build a query from its parts. The cursor starts unset.
    pub fn new(
        groups: Vec<FilterGroup>,
        group_clause: Combinator,
        sort: Sort,
        page_size: u32,
    ) -> Self {
        Self {
            groups,
            group_clause,
            page_number: None,
            page_size,
            page_token: None,
            sort_direction: sort.direction,
            sort_key: sort.key,
        }
    }

    /// Create a query builder
    pub fn builder() -> super::QueryBuilder {
        super::QueryBuilder::default()
    }

    /// Parse a query from its JSON wire form
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// A copy of this query carrying `cursor`; `self` is untouched
    #[must_use]
    pub fn with_cursor(&self, cursor: impl Into<String>) -> Self {
        Self {
            page_token: Some(cursor.into()),
            ..self.clone()
        }
    }

    /// A copy of this query with a 1-based page number
    #[must_use]
    pub fn with_page_number(&self, page_number: u32) -> Self {
        Self {
            page_number: Some(page_number),
            ..self.clone()
        }
    }

    /// Serialize to the JSON request body
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Check the parts the client can verify before any network call.
    ///
    /// Empty `groups` is allowed; the service decides what an unconstrained
    /// query means.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(Error::invalid_value(
                "pgSize",
                format!("must be between 1 and {MAX_PAGE_SIZE}, got {}", self.page_size),
            ));
        }
        if self.sort_key.trim().is_empty() {
            return Err(Error::invalid_value("srtKey", "sort key must not be empty"));
        }
        if let Some(position) = self
            .groups
            .iter()
            .flat_map(|group| &group.filters)
            .position(|clause| clause.term.trim().is_empty() || clause.operator.is_blank())
        {
            return Err(Error::invalid_value(
                "filters",
                format!("filter {position} has an empty term or operator"),
            ));
        }
        Ok(())
    }

    pub fn groups(&self) -> &[FilterGroup] {
        &self.groups
    }

    pub fn group_clause(&self) -> Combinator {
        self.group_clause
    }

    pub fn page_number(&self) -> Option<u32> {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Cursor of the page this query asks for, `None` for the first page
    pub fn cursor(&self) -> Option<&str> {
        self.page_token.as_deref()
    }

    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }
}
