use serde::{Deserialize, Serialize};
use serde_json::Number;

use logidash_core::WarehouseId;

/// Warehouse as returned by `GET /api/warehouses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub warehouse_id: WarehouseId,
    pub name: String,
    pub location: String,
    /// Storage capacity; the backend omits it or sends `null` when unknown.
    /// Any JSON number is accepted, fractional ones included.
    #[serde(default)]
    pub capacity: Option<Number>,
}

impl Warehouse {
    pub fn new(warehouse_id: WarehouseId, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            warehouse_id,
            name: name.into(),
            location: location.into(),
            capacity: None,
        }
    }

    pub fn with_capacity(mut self, capacity: impl Into<Number>) -> Self {
        self.capacity = Some(capacity.into());
        self
    }

    /// Capacity worth showing: a zero capacity counts as unknown.
    pub fn known_capacity(&self) -> Option<&Number> {
        self.capacity
            .as_ref()
            .filter(|c| c.as_f64().is_some_and(|v| v != 0.0))
    }
}
