//! Tests for pagination module

use super::*;
use crate::types::{Record, RecordPage};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn page_with_ids(ids: impl IntoIterator<Item = u64>, total: Option<u64>) -> RecordPage {
    RecordPage {
        records: ids
            .into_iter()
            .map(|id| Record::new().with("$id", id.to_string()))
            .collect(),
        total_count: total,
    }
}

fn page_of(count: u64, total: Option<u64>) -> RecordPage {
    page_with_ids(1..=count, total)
}

fn expect_query(next: NextPage) -> String {
    match next {
        NextPage::Continue { query } => query,
        NextPage::Done => panic!("Expected Continue"),
    }
}

// ============================================================================
// Query builders
// ============================================================================

#[test]
fn test_offset_query() {
    assert_eq!(offset_query("", 500, 0), "limit 500 offset 0");
    assert_eq!(
        offset_query("status in (\"Open\") order by $id desc", 100, 200),
        "status in (\"Open\") order by $id desc limit 100 offset 200"
    );
    assert_eq!(offset_query("  a = 1  ", 5, 10), "a = 1 limit 5 offset 10");
}

#[test]
fn test_cursor_query() {
    assert_eq!(cursor_query("", None, 500), "order by $id asc limit 500");
    assert_eq!(
        cursor_query("", Some(42), 500),
        "$id > 42 order by $id asc limit 500"
    );
    assert_eq!(
        cursor_query("name = \"x\" or age > 3", None, 100),
        "(name = \"x\" or age > 3) order by $id asc limit 100"
    );
    assert_eq!(
        cursor_query("name = \"x\"", Some(7), 100),
        "$id > 7 and (name = \"x\") order by $id asc limit 100"
    );
}

// ============================================================================
// RecordLimit / PagePlan
// ============================================================================

#[test_case(-1, Some(RecordLimit::All) ; "sentinel")]
#[test_case(0, Some(RecordLimit::Count(0)) ; "zero")]
#[test_case(750, Some(RecordLimit::Count(750)) ; "count")]
#[test_case(-2, None ; "other negatives rejected")]
fn test_record_limit_from_raw(raw: i64, expected: Option<RecordLimit>) {
    assert_eq!(RecordLimit::from_raw(raw).ok(), expected);
}

#[test]
fn test_record_limit_target() {
    assert_eq!(RecordLimit::All.target(Some(10)), Some(10));
    assert_eq!(RecordLimit::All.target(None), None);
    assert_eq!(RecordLimit::Count(5).target(Some(10)), Some(5));
    assert_eq!(RecordLimit::Count(50).target(Some(10)), Some(10));
    assert_eq!(RecordLimit::Count(50).target(None), Some(50));
    assert!(RecordLimit::Count(0).is_zero());
    assert!(!RecordLimit::All.is_zero());
}

#[test]
fn test_page_plan_with_remainder() {
    let plan = PagePlan::new(1_250, 500);
    assert_eq!(plan.full_pages, 2);
    assert_eq!(plan.remainder, 250);
    assert_eq!(plan.total_pages(), 3);
    assert_eq!(plan.limit_for(0), 500);
    assert_eq!(plan.limit_for(1), 500);
    assert_eq!(plan.limit_for(2), 250);
    assert_eq!(plan.limit_for(3), 0);
}

#[test]
fn test_page_plan_even_split() {
    let plan = PagePlan::new(1_000, 500);
    assert_eq!(plan.total_pages(), 2);
    assert_eq!(plan.limit_for(1), 500);
    assert_eq!(plan.limit_for(2), 0);
}

#[test]
fn test_page_plan_below_page_size() {
    let plan = PagePlan::new(30, 500);
    assert_eq!(plan.full_pages, 0);
    assert_eq!(plan.total_pages(), 1);
    assert_eq!(plan.limit_for(0), 30);
    assert_eq!(plan.limit_for(1), 0);
}

// ============================================================================
// PaginationState
// ============================================================================

#[test]
fn test_pagination_state_default() {
    let state = PaginationState::new();
    assert_eq!(state.page, 0);
    assert_eq!(state.offset, 0);
    assert!(state.last_id.is_none());
    assert_eq!(state.total_fetched, 0);
    assert!(state.total_count.is_none());
    assert!(!state.done);
}

#[test]
fn test_pagination_state_keeps_first_total_and_max_id() {
    let mut state = PaginationState::new();
    state.observe_total(Some(100));
    state.observe_total(Some(40));
    assert_eq!(state.total_count, Some(100));

    state.observe_id(10);
    state.observe_id(3);
    assert_eq!(state.last_id, Some(10));
}

// ============================================================================
// Offset Paginator
// ============================================================================

#[test]
fn test_offset_single_page_when_total_fits() {
    let paginator = OffsetPaginator::new("", RecordLimit::All);
    let mut state = PaginationState::new();
    assert_eq!(paginator.initial_query(&state), "limit 500 offset 0");

    let next = paginator.process_page(&page_of(120, Some(120)), &mut state);
    assert!(next.is_done());
    assert!(state.done);
    assert_eq!(state.total_fetched, 120);
}

#[test]
fn test_offset_all_walks_until_total() {
    let paginator = OffsetPaginator::new("order by $id asc", RecordLimit::All);
    let mut state = PaginationState::new();

    let next = paginator.process_page(&page_of(500, Some(1_100)), &mut state);
    assert_eq!(expect_query(next), "order by $id asc limit 500 offset 500");

    let next = paginator.process_page(&page_of(500, Some(1_100)), &mut state);
    assert_eq!(expect_query(next), "order by $id asc limit 500 offset 1000");

    let next = paginator.process_page(&page_of(100, Some(1_100)), &mut state);
    assert!(next.is_done());
    assert_eq!(state.total_fetched, 1_100);
    assert_eq!(state.page, 3);
}

#[test]
fn test_offset_count_above_cap_uses_remainder_page() {
    let paginator = OffsetPaginator::new("", RecordLimit::Count(1_200));
    let mut state = PaginationState::new();
    assert_eq!(paginator.initial_query(&state), "limit 500 offset 0");

    let next = paginator.process_page(&page_of(500, Some(5_000)), &mut state);
    assert_eq!(expect_query(next), "limit 500 offset 500");

    let next = paginator.process_page(&page_of(500, Some(5_000)), &mut state);
    assert_eq!(expect_query(next), "limit 200 offset 1000");

    let next = paginator.process_page(&page_of(200, Some(5_000)), &mut state);
    assert!(next.is_done());
    assert_eq!(state.total_fetched, 1_200);
}

#[test]
fn test_offset_count_below_cap_is_single_page() {
    let paginator = OffsetPaginator::new("", RecordLimit::Count(20));
    let mut state = PaginationState::new();
    assert_eq!(paginator.initial_query(&state), "limit 20 offset 0");

    let next = paginator.process_page(&page_of(20, Some(5_000)), &mut state);
    assert!(next.is_done());
}

#[test]
fn test_offset_count_stops_at_total() {
    let paginator = OffsetPaginator::new("", RecordLimit::Count(1_200));
    let mut state = PaginationState::new();

    let next = paginator.process_page(&page_of(500, Some(700)), &mut state);
    assert!(next.is_continue());

    let next = paginator.process_page(&page_of(200, Some(700)), &mut state);
    assert!(next.is_done());
    assert_eq!(state.total_fetched, 700);
}

#[test]
fn test_offset_empty_page_stops() {
    let paginator = OffsetPaginator::new("", RecordLimit::All);
    let mut state = PaginationState::new();

    let next = paginator.process_page(&page_of(0, Some(0)), &mut state);
    assert!(next.is_done());
    assert_eq!(state.total_fetched, 0);
}

#[test]
fn test_offset_without_total_stops_on_short_page() {
    let paginator = OffsetPaginator::new("", RecordLimit::All).with_page_size(10);
    let mut state = PaginationState::new();

    let next = paginator.process_page(&page_of(10, None), &mut state);
    assert_eq!(expect_query(next), "limit 10 offset 10");

    let next = paginator.process_page(&page_of(4, None), &mut state);
    assert!(next.is_done());
}

#[test]
fn test_offset_page_size_is_clamped() {
    assert_eq!(
        OffsetPaginator::new("", RecordLimit::All)
            .with_page_size(10_000)
            .page_size,
        MAX_PAGE_SIZE
    );
    assert_eq!(
        OffsetPaginator::new("", RecordLimit::All)
            .with_page_size(0)
            .page_size,
        1
    );
}

// ============================================================================
// Cursor Paginator
// ============================================================================

#[test]
fn test_cursor_initial_query() {
    let paginator = CursorPaginator::new("status = \"Open\"");
    let state = PaginationState::new();
    assert_eq!(
        paginator.initial_query(&state),
        "(status = \"Open\") order by $id asc limit 500"
    );
}

#[test]
fn test_cursor_advances_past_highest_id() {
    let paginator = CursorPaginator::new("").with_page_size(3);
    let mut state = PaginationState::new();

    let next = paginator.process_page(&page_with_ids([4, 9, 6], Some(7)), &mut state);
    assert_eq!(expect_query(next), "$id > 9 order by $id asc limit 3");

    // Later totals only count records after the cursor; the first one wins
    let next = paginator.process_page(&page_with_ids([10, 11, 12], Some(4)), &mut state);
    assert_eq!(expect_query(next), "$id > 12 order by $id asc limit 3");

    let next = paginator.process_page(&page_with_ids([20], Some(1)), &mut state);
    assert!(next.is_done());
    assert_eq!(state.total_fetched, 7);
    assert_eq!(state.total_count, Some(7));
    assert_eq!(state.last_id, Some(20));
}

#[test]
fn test_cursor_single_page_when_total_fits() {
    let paginator = CursorPaginator::new("");
    let mut state = PaginationState::new();

    let next = paginator.process_page(&page_of(3, Some(3)), &mut state);
    assert!(next.is_done());
}

#[test]
fn test_cursor_stops_on_empty_page() {
    let paginator = CursorPaginator::new("").with_page_size(2);
    let mut state = PaginationState::new();

    let next = paginator.process_page(&page_with_ids([1, 2], Some(5)), &mut state);
    assert!(next.is_continue());

    // Records deleted mid-iteration: total is never reached
    let next = paginator.process_page(&page_of(0, Some(0)), &mut state);
    assert!(next.is_done());
    assert_eq!(state.total_fetched, 2);
}

#[test]
fn test_cursor_stops_without_ids() {
    let paginator = CursorPaginator::new("");
    let mut state = PaginationState::new();

    let page = RecordPage {
        records: vec![Record::new().with("name", "no id")],
        total_count: Some(10),
    };
    let next = paginator.process_page(&page, &mut state);
    assert!(next.is_done());
    assert!(state.last_id.is_none());
}
