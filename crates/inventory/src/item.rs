use serde::{Deserialize, Serialize};

use logidash_core::InventoryItemId;

/// Inventory item as returned by `GET /api/inventory`.
///
/// The backend sends more fields (e.g. the owning warehouse); the dashboard
/// only reads the ones below and ignores the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub inventory_id: InventoryItemId,
    pub name: String,
    pub quantity: u32,
    pub reorder_level: u32,
}

impl InventoryItem {
    pub fn new(
        inventory_id: InventoryItemId,
        name: impl Into<String>,
        quantity: u32,
        reorder_level: u32,
    ) -> Self {
        Self {
            inventory_id,
            name: name.into(),
            quantity,
            reorder_level,
        }
    }

    /// An item is low on stock once its quantity drops below the reorder level.
    ///
    /// Every low-stock count and list on the dashboard goes through this
    /// predicate so the two can never disagree.
    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.reorder_level
    }
}

/// Low-stock items of `inventory`, in source order.
pub fn low_stock(inventory: &[InventoryItem]) -> impl Iterator<Item = &InventoryItem> {
    inventory.iter().filter(|item| item.is_low_stock())
}
