//! Splitting an order's line items into fixed-size preparation sheets.
//!
//! Lines are walked in warehouse order (lowest shelf level first, then by
//! location id) so a picker working one sheet moves through the aisles in a
//! single pass. Every `sheet_size` consecutive lines form one sheet.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::CoreError;

/// Line items per sheet when nothing else is configured.
pub const DEFAULT_SHEET_SIZE: usize = 25;

/// Warehouse location resolved through package → product → location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineLocation {
    pub id: i64,
    pub level: i64,
}

/// An order line as seen by the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: i64,
    pub quantity: f64,
    pub location: Option<LineLocation>,
}

/// Placement of one line: its row in walking order and the sheet it lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedLine {
    pub line_id: i64,
    pub row_number: usize,
    pub sheet_no: i64,
    pub location_id: Option<i64>,
}

/// Totals written to one `PreparacionPedidos` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSummary {
    pub sheet_no: i64,
    pub skus: i64,
    pub bales: f64,
}

/// Assign every line a row number and sheet number.
///
/// Located lines come first, ordered by (level, location id, line id).
/// Lines without a location follow, ordered by line id.
///
/// # Errors
///
/// Returns `CoreError::Validation` if `sheet_size` is zero.
pub fn plan_sheets(lines: &[OrderLine], sheet_size: usize) -> Result<Vec<PlannedLine>, CoreError> {
    if sheet_size == 0 {
        return Err(CoreError::Validation(
            "sheet size must be greater than zero".to_string(),
        ));
    }

    let mut ordered: Vec<&OrderLine> = lines.iter().collect();
    ordered.sort_by_key(|line| match line.location {
        Some(loc) => (0_u8, loc.level, loc.id, line.id),
        None => (1_u8, 0, 0, line.id),
    });

    Ok(ordered
        .into_iter()
        .enumerate()
        .map(|(idx, line)| {
            let row_number = idx + 1;
            PlannedLine {
                line_id: line.id,
                row_number,
                sheet_no: sheet_for_row(row_number, sheet_size),
                location_id: line.location.map(|loc| loc.id),
            }
        })
        .collect())
}

#[allow(clippy::cast_possible_wrap)]
const fn sheet_for_row(row_number: usize, sheet_size: usize) -> i64 {
    row_number.div_ceil(sheet_size) as i64
}

/// Per-sheet SKU count and bale total, ordered by sheet number.
///
/// Planned lines whose id is missing from `lines` are counted with zero
/// quantity.
#[must_use]
pub fn summarize(planned: &[PlannedLine], lines: &[OrderLine]) -> Vec<SheetSummary> {
    let quantities: BTreeMap<i64, f64> = lines.iter().map(|l| (l.id, l.quantity)).collect();

    let mut by_sheet: BTreeMap<i64, SheetSummary> = BTreeMap::new();
    for line in planned {
        let entry = by_sheet.entry(line.sheet_no).or_insert_with(|| SheetSummary {
            sheet_no: line.sheet_no,
            skus: 0,
            bales: 0.0,
        });
        entry.skus += 1;
        entry.bales += quantities.get(&line.line_id).copied().unwrap_or_default();
    }

    by_sheet.into_values().collect()
}

/// Highest sheet number in a plan, zero for an empty order.
#[must_use]
pub fn sheet_count(planned: &[PlannedLine]) -> i64 {
    planned.iter().map(|p| p.sheet_no).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn located(id: i64, level: i64, loc: i64) -> OrderLine {
        OrderLine {
            id,
            quantity: 1.0,
            location: Some(LineLocation { id: loc, level }),
        }
    }

    fn unlocated(id: i64) -> OrderLine {
        OrderLine {
            id,
            quantity: 1.0,
            location: None,
        }
    }

    #[test]
    fn zero_sheet_size_is_rejected() {
        let err = plan_sheets(&[located(1, 1, 1)], 0).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn empty_order_plans_nothing() {
        let planned = plan_sheets(&[], DEFAULT_SHEET_SIZE).unwrap();
        assert!(planned.is_empty());
        assert_eq!(sheet_count(&planned), 0);
        assert!(summarize(&planned, &[]).is_empty());
    }

    #[test]
    fn lines_walk_by_level_then_location() {
        let lines = vec![
            located(10, 2, 1),
            located(11, 1, 9),
            located(12, 1, 3),
            unlocated(5),
            located(13, 1, 3),
        ];
        let planned = plan_sheets(&lines, 2).unwrap();
        let order: Vec<(i64, usize, i64)> = planned
            .iter()
            .map(|p| (p.line_id, p.row_number, p.sheet_no))
            .collect();
        assert_eq!(
            order,
            vec![(12, 1, 1), (13, 2, 1), (11, 3, 2), (10, 4, 2), (5, 5, 3)]
        );
        assert_eq!(planned[4].location_id, None);
        assert_eq!(planned[0].location_id, Some(3));
    }

    #[rstest]
    #[case(1, 1)]
    #[case(25, 1)]
    #[case(26, 2)]
    #[case(50, 2)]
    #[case(51, 3)]
    fn sheet_count_follows_ceiling(#[case] lines: i64, #[case] sheets: i64) {
        let order: Vec<OrderLine> = (1..=lines).map(|id| located(id, 1, id)).collect();
        let planned = plan_sheets(&order, DEFAULT_SHEET_SIZE).unwrap();
        assert_eq!(sheet_count(&planned), sheets);
    }

    #[test]
    fn summary_counts_skus_and_bales_per_sheet() {
        let lines = vec![
            OrderLine {
                id: 1,
                quantity: 4.0,
                location: Some(LineLocation { id: 1, level: 1 }),
            },
            OrderLine {
                id: 2,
                quantity: 6.0,
                location: Some(LineLocation { id: 2, level: 1 }),
            },
            OrderLine {
                id: 3,
                quantity: 2.5,
                location: Some(LineLocation { id: 3, level: 1 }),
            },
        ];
        let planned = plan_sheets(&lines, 2).unwrap();
        assert_eq!(
            summarize(&planned, &lines),
            vec![
                SheetSummary {
                    sheet_no: 1,
                    skus: 2,
                    bales: 10.0,
                },
                SheetSummary {
                    sheet_no: 2,
                    skus: 1,
                    bales: 2.5,
                },
            ]
        );
    }
}
