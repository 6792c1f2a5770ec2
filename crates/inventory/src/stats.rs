//! Summary metrics for the dashboard's stat cards.

use serde::Serialize;

use crate::item::{InventoryItem, low_stock};
use crate::warehouse::Warehouse;

/// Value shown for pending transfers.
///
/// NOTE: there is no transfers endpoint yet, so this is a fixed placeholder
/// and not derived from any fetched data.
pub const PENDING_TRANSFERS_PLACEHOLDER: u64 = 3;

/// Scalar metrics derived from one warehouse/inventory snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_warehouses: usize,
    pub total_inventory: usize,
    pub low_stock_items: usize,
    pub pending_transfers: u64,
}

impl DashboardStats {
    /// Derive stats from the fetched collections.
    ///
    /// Pure and deterministic; empty collections yield zero counts.
    pub fn compute(warehouses: &[Warehouse], inventory: &[InventoryItem]) -> Self {
        Self {
            total_warehouses: warehouses.len(),
            total_inventory: inventory.len(),
            low_stock_items: low_stock(inventory).count(),
            pending_transfers: PENDING_TRANSFERS_PLACEHOLDER,
        }
    }
}
