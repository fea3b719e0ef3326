use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Counters for the reports landing view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayReport {
    pub date: NaiveDate,
    pub pending_today: i64,
    pub in_preparation: i64,
    pub prepared_today: i64,
}

/// Output of one picker over a date range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PickerProductivity {
    pub picker_id: String,
    pub picker_name: String,
    pub sheets: i64,
    pub skus: i64,
    pub bales: f64,
    pub orders: i64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductivityTotals {
    pub pickers: usize,
    pub sheets: i64,
    pub skus: i64,
    pub bales: f64,
    pub orders: i64,
}

impl ProductivityTotals {
    #[must_use]
    pub fn from_rows(rows: &[PickerProductivity]) -> Self {
        rows.iter().fold(
            Self {
                pickers: rows.len(),
                ..Self::default()
            },
            |mut acc, row| {
                acc.sheets += row.sheets;
                acc.skus += row.skus;
                acc.bales += row.bales;
                acc.orders += row.orders;
                acc
            },
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductivityReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub rows: Vec<PickerProductivity>,
    pub totals: ProductivityTotals,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, sheets: i64, skus: i64, bales: f64) -> PickerProductivity {
        PickerProductivity {
            picker_id: name.to_lowercase(),
            picker_name: name.to_string(),
            sheets,
            skus,
            bales,
            orders: sheets,
        }
    }

    #[test]
    fn totals_sum_every_column() {
        let rows = vec![row("Ana", 3, 40, 120.0), row("Luis", 1, 10, 12.5)];
        let totals = ProductivityTotals::from_rows(&rows);
        assert_eq!(totals.pickers, 2);
        assert_eq!(totals.sheets, 4);
        assert_eq!(totals.skus, 50);
        assert!((totals.bales - 132.5).abs() < f64::EPSILON);
        assert_eq!(totals.orders, 4);
    }

    #[test]
    fn totals_of_nothing_are_zero() {
        assert_eq!(ProductivityTotals::from_rows(&[]), ProductivityTotals::default());
    }
}
