//! Query builder

use super::types::{Combinator, FilterGroup, Query, Sort};

/// Default page size
const DEFAULT_PAGE_SIZE: u32 = 100;

/// Builder for [`Query`]
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    groups: Vec<FilterGroup>,
    group_clause: Combinator,
    sort: Sort,
    page_size: u32,
    page_number: Option<u32>,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            group_clause: Combinator::And,
            sort: Sort::default(),
            page_size: DEFAULT_PAGE_SIZE,
            page_number: None,
        }
    }
}

impl QueryBuilder {
    /// Append a filter group
    pub fn group(mut self, group: FilterGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Replace all filter groups
    pub fn groups(mut self, groups: Vec<FilterGroup>) -> Self {
        self.groups = groups;
        self
    }

    /// Set the inter-group combinator
    pub fn group_clause(mut self, combinator: Combinator) -> Self {
        self.group_clause = combinator;
        self
    }

    /// Set sort key and direction
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Set page size
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set a 1-based page number
    pub fn page_number(mut self, page_number: u32) -> Self {
        self.page_number = Some(page_number);
        self
    }

    /// Build the query
    pub fn build(self) -> Query {
        let query = Query::new(self.groups, self.group_clause, self.sort, self.page_size);
        match self.page_number {
            Some(page_number) => query.with_page_number(page_number),
            None => query,
        }
    }
}
