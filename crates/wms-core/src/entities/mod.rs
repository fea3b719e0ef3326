//! Entity structs for every warehouse view.
//!
//! Each entity is the typed result of one repository query over the external
//! schema (`pedidostienda_bodega`, `PreparacionPedidos`, `TarimasInventario`,
//! ...). All structs derive `Serialize` and `Deserialize` so the CLI can emit
//! them as JSON or tables.

mod dashboard;
mod order;
mod pallet;
mod report;
mod sheet;
mod user;

pub use dashboard::{ActivityEntry, DashboardStats, PickerWorkload};
pub use order::{PendingOrder, PreparingOrder, StartOrderOutcome};
pub use pallet::{
    Pallet, PalletAssignmentView, PalletDetail, PalletLine, PalletOrder, PalletOrderList,
};
pub use report::{DayReport, PickerProductivity, ProductivityReport, ProductivityTotals};
pub use sheet::{PreparationSheet, SheetProgress};
pub use user::{LoginOutcome, Operator, UserSession};
