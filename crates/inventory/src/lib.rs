//! Inventory domain for the logistics dashboard.
//!
//! This crate contains the read-side rules the dashboard applies to backend
//! collections, implemented purely as deterministic logic (no IO, no HTTP).

pub mod item;
pub mod preview;
pub mod stats;
pub mod warehouse;

pub use item::{InventoryItem, low_stock};
pub use preview::{Preview, low_stock_preview, warehouse_preview};
pub use stats::{DashboardStats, PENDING_TRANSFERS_PLACEHOLDER};
pub use warehouse::Warehouse;
