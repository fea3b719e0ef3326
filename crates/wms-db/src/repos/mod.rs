//! Repository modules. Each one adds methods to `WmsService`.

pub mod auth;
pub mod dashboard;
pub mod orders;
pub mod pallets;
pub mod reports;
pub mod sheets;
pub mod users;
