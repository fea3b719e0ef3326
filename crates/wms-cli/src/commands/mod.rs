pub mod dashboard;
pub mod db;
pub mod dispatch;
pub mod login;
pub mod orders;
pub mod pallets;
pub mod report;
pub mod sheets;
pub mod shared;
