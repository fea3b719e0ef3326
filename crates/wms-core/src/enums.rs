//! Status codes, user levels and permission codes.
//!
//! The external schema stores all of these as bare integers. Each enum maps
//! the integer with `code()` / `from_code()` and serializes as `snake_case`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// OrderStatus
// ---------------------------------------------------------------------------

/// Workflow stage of a store order (`pedidostienda_bodega.Estado`).
///
/// ```text
/// pending(4) → in_preparation(5) → prepared(6) → completed(7)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InPreparation,
    Prepared,
    Completed,
}

impl OrderStatus {
    /// Statuses counted as "active" on the dashboard.
    pub const ACTIVE: [Self; 3] = [Self::Pending, Self::InPreparation, Self::Prepared];

    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Pending => 4,
            Self::InPreparation => 5,
            Self::Prepared => 6,
            Self::Completed => 7,
        }
    }

    /// Map a raw `Estado` value.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for codes outside the order workflow.
    pub fn from_code(code: i64) -> Result<Self, CoreError> {
        match code {
            4 => Ok(Self::Pending),
            5 => Ok(Self::InPreparation),
            6 => Ok(Self::Prepared),
            7 => Ok(Self::Completed),
            other => Err(CoreError::Validation(format!(
                "unknown order status code {other}"
            ))),
        }
    }

    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::InPreparation],
            Self::InPreparation => &[Self::Prepared],
            Self::Prepared => &[Self::Completed],
            Self::Completed => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::InPreparation | Self::Prepared)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InPreparation => "in_preparation",
            Self::Prepared => "prepared",
            Self::Completed => "completed",
        }
    }

    /// Fallback display label when `estadopedidotiendabodega` has no row.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::InPreparation => "En preparación",
            Self::Prepared => "Preparado",
            Self::Completed => "Completado",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UserLevel
// ---------------------------------------------------------------------------

/// Role of a user (`usuarios.IdNivel`). Only pickers and checkers drive
/// behavior; every other level is carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserLevel {
    Picker,
    Checker,
    Other(i64),
}

impl UserLevel {
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Picker => 3,
            Self::Checker => 4,
            Self::Other(code) => code,
        }
    }

    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            3 => Self::Picker,
            4 => Self::Checker,
            other => Self::Other(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Permission
// ---------------------------------------------------------------------------

/// Module permission codes (`transacciones_sistema.Codigo`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    AssignSheets,
    OrderReports,
    AssignPallets,
    CheckerReport,
}

impl Permission {
    pub const ALL: [Self; 4] = [
        Self::AssignSheets,
        Self::OrderReports,
        Self::AssignPallets,
        Self::CheckerReport,
    ];

    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::AssignSheets => 200,
            Self::OrderReports => 201,
            Self::AssignPallets => 202,
            Self::CheckerReport => 203,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AssignSheets => "assign_sheets",
            Self::OrderReports => "order_reports",
            Self::AssignPallets => "assign_pallets",
            Self::CheckerReport => "checker_report",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.code())
    }
}

// ---------------------------------------------------------------------------
// Line status
// ---------------------------------------------------------------------------

/// `EstadoPreparacionproducto` value of a line that has been checked.
/// Any value above zero means the line was picked.
pub const LINE_CHECKED: i64 = 5;

// ---------------------------------------------------------------------------
// SheetState
// ---------------------------------------------------------------------------

/// Derived state of a preparation sheet. Not stored; computed from the
/// picker, start and finish columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetState {
    Unassigned,
    Assigned,
    InProgress,
    Finished,
}

impl SheetState {
    /// Finished wins over started, started wins over assigned.
    #[must_use]
    pub const fn derive(has_picker: bool, started: bool, finished: bool) -> Self {
        if finished {
            Self::Finished
        } else if started {
            Self::InProgress
        } else if has_picker {
            Self::Assigned
        } else {
            Self::Unassigned
        }
    }

    /// Only finished sheets are locked against reassignment.
    #[must_use]
    pub const fn can_reassign(self) -> bool {
        !matches!(self, Self::Finished)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unassigned => "unassigned",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for SheetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_codes_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::InPreparation,
            OrderStatus::Prepared,
            OrderStatus::Completed,
        ] {
            assert_eq!(OrderStatus::from_code(status.code()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_order_status_is_rejected() {
        let err = OrderStatus::from_code(9).unwrap_err();
        assert!(err.to_string().contains("unknown order status code 9"));
    }

    #[test]
    fn order_status_transitions_follow_workflow() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::InPreparation));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Completed));
        assert!(OrderStatus::Completed.allowed_next_states().is_empty());
    }

    #[test]
    fn active_statuses_exclude_completed() {
        assert!(OrderStatus::ACTIVE.iter().all(|s| s.is_active()));
        assert!(!OrderStatus::Completed.is_active());
    }

    #[test]
    fn user_level_keeps_unknown_codes() {
        assert_eq!(UserLevel::from_code(3), UserLevel::Picker);
        assert_eq!(UserLevel::from_code(4), UserLevel::Checker);
        assert_eq!(UserLevel::from_code(1).code(), 1);
    }

    #[test]
    fn sheet_state_precedence() {
        assert_eq!(SheetState::derive(false, false, false), SheetState::Unassigned);
        assert_eq!(SheetState::derive(true, false, false), SheetState::Assigned);
        assert_eq!(SheetState::derive(true, true, false), SheetState::InProgress);
        assert_eq!(SheetState::derive(true, true, true), SheetState::Finished);
        assert!(!SheetState::Finished.can_reassign());
        assert!(SheetState::InProgress.can_reassign());
    }

    #[test]
    fn permission_display_includes_code() {
        assert_eq!(Permission::AssignPallets.to_string(), "assign_pallets (202)");
    }
}
