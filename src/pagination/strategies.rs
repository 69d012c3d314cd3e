//! Pagination strategy implementations
//!
//! Both strategies build the Kintone `query` string for each request; the
//! client drives the loop.

use super::types::{
    NextPage, PagePlan, PaginationState, Paginator, RecordLimit, MAX_OFFSET, MAX_PAGE_SIZE,
};
use crate::types::{RecordPage, RECORD_ID_FIELD};
use tracing::{debug, warn};

/// Append `limit`/`offset` clauses to a query condition
pub fn offset_query(condition: &str, limit: u32, offset: u64) -> String {
    let condition = condition.trim();
    if condition.is_empty() {
        format!("limit {limit} offset {offset}")
    } else {
        format!("{condition} limit {limit} offset {offset}")
    }
}

/// Build an id-ordered query for records after `last_id`
pub fn cursor_query(condition: &str, last_id: Option<u64>, limit: u32) -> String {
    let condition = condition.trim();
    let mut clauses = Vec::with_capacity(2);
    if let Some(id) = last_id {
        clauses.push(format!("{RECORD_ID_FIELD} > {id}"));
    }
    if !condition.is_empty() {
        clauses.push(format!("({condition})"));
    }

    let order = format!("order by {RECORD_ID_FIELD} asc limit {limit}");
    if clauses.is_empty() {
        order
    } else {
        format!("{} {order}", clauses.join(" and "))
    }
}

fn clamp_page_size(size: u32) -> u32 {
    size.clamp(1, MAX_PAGE_SIZE)
}

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset-based pagination
///
/// Appends `limit L offset O` to the caller's condition and advances the
/// offset by the page size until the target count is reached. The condition
/// may carry its own `order by` clause.
#[derive(Debug, Clone)]
pub struct OffsetPaginator {
    /// Query condition (and ordering), without limit/offset
    pub condition: String,
    /// How many records to fetch
    pub limit: RecordLimit,
    /// Records per request
    pub page_size: u32,
}

impl OffsetPaginator {
    /// Create a new offset paginator with the maximum page size
    pub fn new(condition: impl Into<String>, limit: RecordLimit) -> Self {
        Self {
            condition: condition.into(),
            limit,
            page_size: MAX_PAGE_SIZE,
        }
    }

    /// Use a smaller page size (clamped to 1..=500)
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = clamp_page_size(page_size);
        self
    }

    /// Page plan for a bounded fetch
    pub fn plan(&self) -> Option<PagePlan> {
        match self.limit {
            RecordLimit::All => None,
            RecordLimit::Count(n) => Some(PagePlan::new(n, self.page_size)),
        }
    }

    /// `limit` for the page index; 0 once a bounded plan is exhausted
    fn page_limit(&self, page: u64) -> u32 {
        self.plan()
            .map_or(self.page_size, |plan| plan.limit_for(page))
    }
}

impl Paginator for OffsetPaginator {
    fn initial_query(&self, state: &PaginationState) -> String {
        offset_query(&self.condition, self.page_limit(state.page), state.offset)
    }

    fn process_page(&self, page: &RecordPage, state: &mut PaginationState) -> NextPage {
        let requested = self.page_limit(state.page);
        let count = page.records.len();

        state.add_fetched(count as u64);
        state.observe_total(page.total_count);
        state.add_offset(requested);
        state.next_page();

        debug!(
            "Offset page {}: {} records ({} of {:?})",
            state.page, count, state.total_fetched, state.total_count
        );

        if count == 0 || count < requested as usize {
            state.mark_done();
            return NextPage::Done;
        }

        if let Some(target) = self.limit.target(state.total_count) {
            if state.total_fetched >= target {
                state.mark_done();
                return NextPage::Done;
            }
        }

        let next_limit = self.page_limit(state.page);
        if next_limit == 0 {
            state.mark_done();
            return NextPage::Done;
        }

        if state.offset > MAX_OFFSET {
            warn!(
                "Offset {} exceeds the records API maximum of {}; use cursor pagination for large sets",
                state.offset, MAX_OFFSET
            );
        }

        NextPage::with_query(offset_query(&self.condition, next_limit, state.offset))
    }
}

// ============================================================================
// Cursor Pagination
// ============================================================================

/// Cursor pagination over the internal record id
///
/// Orders by `$id` ascending and re-queries with `$id > last` until the
/// first page's total count is reached. The condition must not carry its
/// own `order by` or `limit` clauses. Records inserted mid-iteration with
/// higher ids are picked up; nothing is deduplicated.
#[derive(Debug, Clone)]
pub struct CursorPaginator {
    /// Query condition, without ordering or limit
    pub condition: String,
    /// Records per request
    pub page_size: u32,
}

impl CursorPaginator {
    /// Create a new cursor paginator with the maximum page size
    pub fn new(condition: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            page_size: MAX_PAGE_SIZE,
        }
    }

    /// Use a smaller page size (clamped to 1..=500)
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = clamp_page_size(page_size);
        self
    }
}

impl Paginator for CursorPaginator {
    fn initial_query(&self, state: &PaginationState) -> String {
        cursor_query(&self.condition, state.last_id, self.page_size)
    }

    fn process_page(&self, page: &RecordPage, state: &mut PaginationState) -> NextPage {
        let count = page.records.len();

        state.add_fetched(count as u64);
        state.observe_total(page.total_count);
        state.next_page();

        debug!(
            "Cursor page {}: {} records ({} of {:?})",
            state.page, count, state.total_fetched, state.total_count
        );

        if count == 0 {
            state.mark_done();
            return NextPage::Done;
        }

        match page.records.iter().filter_map(|r| r.record_id()).max() {
            Some(id) => state.observe_id(id),
            None => {
                warn!(
                    "Page of {} records carried no readable {} values; stopping",
                    count, RECORD_ID_FIELD
                );
                state.mark_done();
                return NextPage::Done;
            }
        }

        let finished = match state.total_count {
            Some(total) => state.total_fetched >= total,
            None => count < self.page_size as usize,
        };
        if finished {
            state.mark_done();
            return NextPage::Done;
        }

        NextPage::with_query(cursor_query(&self.condition, state.last_id, self.page_size))
    }
}
