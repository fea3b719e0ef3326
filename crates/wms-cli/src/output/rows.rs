//! Table columns for each listing type.

use chrono::NaiveDateTime;
use wms_core::entities::{
    Operator, Pallet, PalletLine, PalletOrder, PendingOrder, PickerProductivity, PickerWorkload,
    PreparationSheet, PreparingOrder, SheetProgress,
};
use wms_db::TableStatus;

/// A type that knows its table columns.
pub trait Tabular {
    const HEADERS: &'static [&'static str];

    fn row(&self) -> Vec<String>;
}

fn datetime(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

fn opt_datetime(value: Option<NaiveDateTime>) -> String {
    value.map_or_else(|| String::from("-"), datetime)
}

/// Quantities print without decimals when whole.
pub(crate) fn quantity(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

pub(crate) fn pct(value: u8) -> String {
    format!("{value}%")
}

fn name(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

impl Tabular for PendingOrder {
    const HEADERS: &'static [&'static str] = &["order", "date", "company", "quantity"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            datetime(self.date),
            self.company.clone(),
            quantity(self.total_quantity),
        ]
    }
}

impl Tabular for PreparingOrder {
    const HEADERS: &'static [&'static str] = &[
        "order",
        "date",
        "company",
        "department",
        "sheets",
        "lines",
        "prepared",
        "picking",
        "done",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            datetime(self.date),
            self.company.clone(),
            self.department.clone(),
            self.sheet_count.to_string(),
            self.total_lines.to_string(),
            self.prepared_lines.to_string(),
            self.sheets_in_progress.to_string(),
            pct(self.percent),
        ]
    }
}

impl Tabular for PreparationSheet {
    const HEADERS: &'static [&'static str] = &[
        "id", "sheet", "picker", "skus", "bales", "started", "finished", "state",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.sheet_no.to_string(),
            name(self.picker_name.as_deref()),
            self.total_skus.to_string(),
            quantity(self.total_bales),
            opt_datetime(self.started_at),
            opt_datetime(self.finished_at),
            self.state.to_string(),
        ]
    }
}

impl Tabular for SheetProgress {
    const HEADERS: &'static [&'static str] =
        &["sheet", "picker", "prepared", "skus", "bales", "done", "state"];

    fn row(&self) -> Vec<String> {
        vec![
            self.sheet_no.to_string(),
            name(self.picker_name.as_deref()),
            self.prepared_lines.to_string(),
            self.total_skus.to_string(),
            quantity(self.total_bales),
            pct(self.percent),
            self.state.to_string(),
        ]
    }
}

impl Tabular for Operator {
    const HEADERS: &'static [&'static str] = &["id", "name"];

    fn row(&self) -> Vec<String> {
        vec![self.id.to_string(), self.full_name.clone()]
    }
}

impl Tabular for PalletOrder {
    const HEADERS: &'static [&'static str] = &[
        "order", "date", "status", "company", "quantity", "pallets", "lines", "checked", "done",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            datetime(self.date),
            self.status_name.clone(),
            self.company.clone(),
            quantity(self.total_quantity),
            self.pallet_count.to_string(),
            self.total_lines.to_string(),
            self.checked_lines.to_string(),
            pct(self.percent),
        ]
    }
}

impl Tabular for Pallet {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "pallet",
        "checker",
        "bales",
        "skus",
        "lines",
        "checked",
        "done",
        "finalized",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.pallet_no.to_string(),
            self.checker_name
                .clone()
                .unwrap_or_else(|| String::from("unassigned")),
            quantity(self.bales),
            self.skus.to_string(),
            self.total_lines.to_string(),
            self.checked_lines.to_string(),
            pct(self.percent),
            opt_datetime(self.finalized_at),
        ]
    }
}

impl Tabular for PalletLine {
    const HEADERS: &'static [&'static str] = &[
        "upc",
        "description",
        "ordered",
        "confirmed",
        "diff",
        "picker",
        "prepared",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.upc.clone(),
            self.description.clone(),
            quantity(self.quantity),
            quantity(self.confirmed),
            quantity(self.difference),
            name(self.picker_name.as_deref()),
            opt_datetime(self.prepared_at),
        ]
    }
}

impl Tabular for PickerWorkload {
    const HEADERS: &'static [&'static str] = &["id", "picker", "user", "orders", "working"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.full_name.clone(),
            self.username.clone(),
            self.active_orders.to_string(),
            String::from(if self.working { "yes" } else { "no" }),
        ]
    }
}

impl Tabular for PickerProductivity {
    const HEADERS: &'static [&'static str] = &["picker", "sheets", "skus", "bales", "orders"];

    fn row(&self) -> Vec<String> {
        vec![
            self.picker_name.clone(),
            self.sheets.to_string(),
            self.skus.to_string(),
            quantity(self.bales),
            self.orders.to_string(),
        ]
    }
}

impl Tabular for TableStatus {
    const HEADERS: &'static [&'static str] = &["table", "status", "rows"];

    fn row(&self) -> Vec<String> {
        vec![
            self.table.clone(),
            String::from(if self.exists { "ok" } else { "missing" }),
            self.rows.map_or_else(|| String::from("-"), |n| n.to_string()),
        ]
    }
}
