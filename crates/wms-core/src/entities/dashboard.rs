use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::enums::OrderStatus;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub active_orders: i64,
    pub completed_today: i64,
    pub completed_yesterday: i64,
    pub pending: i64,
    pub active_pickers: i64,
    /// Completed today relative to yesterday, in percent.
    pub completed_change_pct: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityEntry {
    pub order_id: i64,
    pub date: NaiveDateTime,
    pub status: OrderStatus,
    pub status_name: String,
}

/// An active picker and the number of orders attributed to them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PickerWorkload {
    pub id: i64,
    pub full_name: String,
    pub username: String,
    pub active_orders: i64,
    pub working: bool,
}
