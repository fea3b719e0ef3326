use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::sheets::SheetSummary;

/// An order waiting for preparation (status 4).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingOrder {
    pub id: i64,
    pub date: NaiveDateTime,
    pub company: String,
    pub total_quantity: f64,
    pub department_id: Option<i64>,
}

/// An order in preparation (status 5) with its picking progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreparingOrder {
    pub id: i64,
    pub date: NaiveDateTime,
    pub company: String,
    pub total_quantity: f64,
    pub department: String,
    pub sheet_count: i64,
    pub total_lines: i64,
    pub prepared_lines: i64,
    pub sheets_in_progress: i64,
    pub percent: u8,
}

/// What `start_order` did.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StartOrderOutcome {
    pub order_id: i64,
    /// Sheets created by this call. Empty when the order was already paginated.
    pub sheets: Vec<SheetSummary>,
    pub already_paginated: bool,
}
