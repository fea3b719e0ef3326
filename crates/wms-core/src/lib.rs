//! # wms-core
//!
//! Core types and pure helpers for the warehouse client.
//!
//! This crate provides the foundational types shared across all WMS crates:
//! - Entity structs for every view (orders, sheets, pallets, reports)
//! - Status, user-level and permission codes read from the external schema
//! - Sheet planning (splitting an order's line items into fixed-size sheets)
//! - Progress, fuzzy search, page-window and elapsed-time helpers
//! - Cross-cutting error types

pub mod elapsed;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod paging;
pub mod progress;
pub mod search;
pub mod sheets;
