//! Pagination module
//!
//! Supports: Offset (limit/offset clauses) and Cursor (`$id > last`)
//!
//! # Overview
//!
//! The records endpoint returns at most 500 records per call. Each strategy
//! turns the caller's condition into the query string for every page and
//! decides from the returned page (and the reported total count) when the
//! result set is complete.

mod strategies;
mod types;

pub use strategies::{cursor_query, offset_query, CursorPaginator, OffsetPaginator};
pub use types::{
    NextPage, PagePlan, PaginationState, Paginator, RecordLimit, MAX_OFFSET, MAX_PAGE_SIZE,
};

#[cfg(test)]
mod tests;
