use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::enums::OrderStatus;

/// An order whose pallets can be handed to checkers (status 5 or 6, paginated).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PalletOrder {
    pub id: i64,
    pub date: NaiveDateTime,
    pub status: OrderStatus,
    pub status_name: String,
    pub company: String,
    pub total_quantity: f64,
    pub pallet_count: i64,
    pub total_lines: i64,
    pub checked_lines: i64,
    pub percent: u8,
}

/// Filtered order listing plus the aggregate cards shown above it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PalletOrderList {
    pub orders: Vec<PalletOrder>,
    pub total_orders: usize,
    pub total_pallets: i64,
    pub total_quantity: f64,
}

/// A pallet whose check is not complete yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pallet {
    pub id: i64,
    pub order_id: i64,
    pub pallet_no: i64,
    pub created_at: Option<NaiveDateTime>,
    pub finalized_at: Option<NaiveDateTime>,
    pub bales: f64,
    pub skus: i64,
    pub checker_id: Option<i64>,
    pub checker_name: Option<String>,
    pub check_started_at: Option<NaiveDateTime>,
    pub check_finished_at: Option<NaiveDateTime>,
    pub total_lines: i64,
    pub checked_lines: i64,
    pub percent: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PalletAssignmentView {
    pub order_id: i64,
    pub pallets: Vec<Pallet>,
    pub order_total_lines: i64,
    pub order_checked_lines: i64,
    pub order_percent: u8,
    pub assigned: usize,
    pub unassigned: usize,
    pub total_bales: f64,
    pub total_skus: i64,
}

/// A line item loaded on a pallet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PalletLine {
    pub upc: String,
    pub description: String,
    pub quantity: f64,
    pub confirmed: f64,
    pub picker_name: Option<String>,
    pub prepared_at: Option<NaiveDateTime>,
    /// `confirmed - quantity`; negative when short.
    pub difference: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PalletDetail {
    pub order_id: i64,
    pub pallet_no: i64,
    pub lines: Vec<PalletLine>,
    pub total_quantity: f64,
    pub total_confirmed: f64,
}
