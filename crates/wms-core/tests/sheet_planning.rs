//! Planning a realistic order end to end: plan, summarize, count.

use pretty_assertions::assert_eq;
use wms_core::sheets::{
    DEFAULT_SHEET_SIZE, LineLocation, OrderLine, plan_sheets, sheet_count, summarize,
};

fn order_with(lines: i64) -> Vec<OrderLine> {
    (1..=lines)
        .map(|id| OrderLine {
            id,
            quantity: 2.0,
            // Reverse level order so the planner has to reorder.
            location: Some(LineLocation {
                id: 1_000 - id,
                level: (lines - id) / 10,
            }),
        })
        .collect()
}

#[test]
fn sixty_lines_make_three_sheets() {
    let lines = order_with(60);
    let planned = plan_sheets(&lines, DEFAULT_SHEET_SIZE).unwrap();

    assert_eq!(planned.len(), 60);
    assert_eq!(sheet_count(&planned), 3);

    let summary = summarize(&planned, &lines);
    let per_sheet: Vec<(i64, i64)> = summary.iter().map(|s| (s.sheet_no, s.skus)).collect();
    assert_eq!(per_sheet, vec![(1, 25), (2, 25), (3, 10)]);
    assert!((summary[0].bales - 50.0).abs() < f64::EPSILON);
}

#[test]
fn first_sheet_starts_on_lowest_level() {
    let lines = order_with(30);
    let planned = plan_sheets(&lines, DEFAULT_SHEET_SIZE).unwrap();
    // Level 0 holds lines 21..=30; line 30 has the lowest location id.
    assert_eq!(planned[0].line_id, 30);
    assert_eq!(planned[0].row_number, 1);
    assert!(planned.iter().all(|p| p.location_id.is_some()));
}

#[test]
fn every_row_number_is_unique_and_dense() {
    let planned = plan_sheets(&order_with(47), 10).unwrap();
    let mut rows: Vec<usize> = planned.iter().map(|p| p.row_number).collect();
    rows.sort_unstable();
    assert_eq!(rows, (1..=47).collect::<Vec<_>>());
    assert_eq!(sheet_count(&planned), 5);
}
