//! `logidash-core`: shared building blocks for the logistics dashboard.
//!
//! This crate contains **pure** primitives (no I/O): typed identifiers for
//! backend entities and the domain error they fail with.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{InventoryItemId, WarehouseId};
