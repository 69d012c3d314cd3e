//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by both strategies.

use crate::error::{Error, Result};
use crate::types::RecordPage;

/// Largest `limit` the records endpoint accepts
pub const MAX_PAGE_SIZE: u32 = 500;

/// Largest `offset` the records endpoint accepts
pub const MAX_OFFSET: u64 = 10_000;

/// How many records a fetch should return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordLimit {
    /// Every matching record
    #[default]
    All,
    /// At most this many records
    Count(u64),
}

impl RecordLimit {
    /// Convert the integer convention where `-1` means "fetch all"
    pub fn from_raw(raw: i64) -> Result<Self> {
        match raw {
            -1 => Ok(Self::All),
            n if n >= 0 => Ok(Self::Count(n as u64)),
            n => Err(Error::invalid_value(
                "limit",
                format!("expected -1 or a non-negative count, got {n}"),
            )),
        }
    }

    /// Whether nothing should be fetched at all
    pub fn is_zero(self) -> bool {
        matches!(self, Self::Count(0))
    }

    /// Number of records to stop at, given the server-reported total
    pub fn target(self, total_count: Option<u64>) -> Option<u64> {
        match (self, total_count) {
            (Self::All, total) => total,
            (Self::Count(n), Some(total)) => Some(n.min(total)),
            (Self::Count(n), None) => Some(n),
        }
    }
}

/// Split of a fixed record count into full pages plus a remainder page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    /// Number of pages of `page_size` records
    pub full_pages: u64,
    /// Size of the final partial page (0 when the count divides evenly)
    pub remainder: u32,
    /// Records per full page
    pub page_size: u32,
}

impl PagePlan {
    /// Plan pages for `count` records
    pub fn new(count: u64, page_size: u32) -> Self {
        let size = u64::from(page_size.max(1));
        Self {
            full_pages: count / size,
            remainder: (count % size) as u32,
            page_size: page_size.max(1),
        }
    }

    /// Total number of requests the plan needs
    pub fn total_pages(&self) -> u64 {
        self.full_pages + u64::from(self.remainder > 0)
    }

    /// `limit` for the zero-based page index; 0 once the plan is exhausted
    pub fn limit_for(&self, page: u64) -> u32 {
        if page < self.full_pages {
            self.page_size
        } else if page == self.full_pages {
            self.remainder
        } else {
            0
        }
    }
}

/// Result of processing a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch another page with this query
    Continue {
        /// Full Kintone query string for the next request
        query: String,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation
    pub fn with_query(query: impl Into<String>) -> Self {
        Self::Continue {
            query: query.into(),
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Zero-based index of the next page to request
    pub page: u64,
    /// Offset of the next page (offset strategy)
    pub offset: u64,
    /// Highest record id seen (cursor strategy)
    pub last_id: Option<u64>,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Total reported by the first page
    pub total_count: Option<u64>,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Advance to the next page index
    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// Add offset
    pub fn add_offset(&mut self, amount: u32) {
        self.offset += u64::from(amount);
    }

    /// Record the highest id seen so far
    pub fn observe_id(&mut self, id: u64) {
        self.last_id = Some(self.last_id.map_or(id, |last| last.max(id)));
    }

    /// Add to total fetched
    pub fn add_fetched(&mut self, count: u64) {
        self.total_fetched += count;
    }

    /// Keep the first reported total; later pages may report narrower totals
    pub fn observe_total(&mut self, total: Option<u64>) {
        if self.total_count.is_none() {
            self.total_count = total;
        }
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Query string for the first request
    fn initial_query(&self, state: &PaginationState) -> String;

    /// Process a fetched page and decide whether another is needed
    fn process_page(&self, page: &RecordPage, state: &mut PaginationState) -> NextPage;
}
