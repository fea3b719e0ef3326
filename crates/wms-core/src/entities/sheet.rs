use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::enums::SheetState;

/// One row of `PreparacionPedidos`: a batch of an order's lines for one picker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreparationSheet {
    pub id: i64,
    pub order_id: i64,
    pub sheet_no: i64,
    pub branch: String,
    pub total_skus: i64,
    pub total_bales: f64,
    pub picker_id: Option<i64>,
    pub picker_name: Option<String>,
    pub started_at: Option<NaiveDateTime>,
    pub finished_at: Option<NaiveDateTime>,
    pub state: SheetState,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SheetProgress {
    pub sheet_no: i64,
    pub picker_name: Option<String>,
    pub prepared_lines: i64,
    pub total_skus: i64,
    pub total_bales: f64,
    pub percent: u8,
    pub state: SheetState,
}
