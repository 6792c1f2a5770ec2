//! Bounded previews of the fetched collections.
//!
//! Selectors only cut a prefix and report how much was there; the bound is
//! chosen by the caller, so a server-paginated source can replace the
//! client-side cut without touching these functions.

use crate::item::{InventoryItem, low_stock};
use crate::warehouse::Warehouse;

/// The first `bound` entries of a sequence plus its full length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview<'a, T> {
    items: Vec<&'a T>,
    total: usize,
    bound: usize,
}

impl<'a, T> Preview<'a, T> {
    /// Take up to `bound` entries from `source` in order, counting all of them.
    pub fn collect(source: impl IntoIterator<Item = &'a T>, bound: usize) -> Self {
        let mut items = Vec::new();
        let mut total = 0;
        for entry in source {
            if total < bound {
                items.push(entry);
            }
            total += 1;
        }
        Self { items, total, bound }
    }

    pub fn items(&self) -> &[&'a T] {
        &self.items
    }

    /// Length of the source before truncation.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn bound(&self) -> usize {
        self.bound
    }

    /// `true` when the source had more entries than the bound allows.
    pub fn is_truncated(&self) -> bool {
        self.total > self.bound
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// First `bound` warehouses in received order.
pub fn warehouse_preview(warehouses: &[Warehouse], bound: usize) -> Preview<'_, Warehouse> {
    Preview::collect(warehouses, bound)
}

/// First `bound` low-stock items, keeping their relative source order.
pub fn low_stock_preview(inventory: &[InventoryItem], bound: usize) -> Preview<'_, InventoryItem> {
    Preview::collect(low_stock(inventory), bound)
}
