//! Presentation state of the dashboard.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use logidash_inventory::{
    DashboardStats, InventoryItem, Preview, Warehouse, low_stock_preview, warehouse_preview,
};

/// Both collections from one successful fetch cycle, with the stats derived
/// from exactly those collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    warehouses: Vec<Warehouse>,
    inventory: Vec<InventoryItem>,
    stats: DashboardStats,
    fetched_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    pub fn new(
        warehouses: Vec<Warehouse>,
        inventory: Vec<InventoryItem>,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        let stats = DashboardStats::compute(&warehouses, &inventory);
        Self {
            warehouses,
            inventory,
            stats,
            fetched_at,
        }
    }

    pub fn warehouses(&self) -> &[Warehouse] {
        &self.warehouses
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn warehouse_preview(&self, bound: usize) -> Preview<'_, Warehouse> {
        warehouse_preview(&self.warehouses, bound)
    }

    pub fn low_stock_preview(&self, bound: usize) -> Preview<'_, InventoryItem> {
        low_stock_preview(&self.inventory, bound)
    }
}

/// Where the dashboard is in its fetch lifecycle.
///
/// `retained` holds the last successful snapshot, if any, so a reload or a
/// failed cycle keeps showing consistent (if stale) data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardState {
    Loading {
        retained: Option<Arc<DashboardSnapshot>>,
    },
    Error {
        message: String,
        retained: Option<Arc<DashboardSnapshot>>,
    },
    Ready(Arc<DashboardSnapshot>),
}

impl DashboardState {
    /// State before the first cycle has been triggered.
    pub fn initial() -> Self {
        DashboardState::Loading { retained: None }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DashboardState::Loading { .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, DashboardState::Ready(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            DashboardState::Error { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    /// The data currently on display: fresh when ready, retained otherwise.
    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        match self {
            DashboardState::Ready(snapshot) => Some(snapshot.as_ref()),
            DashboardState::Loading { retained } | DashboardState::Error { retained, .. } => {
                retained.as_deref()
            }
        }
    }

    pub(crate) fn retained(&self) -> Option<Arc<DashboardSnapshot>> {
        match self {
            DashboardState::Ready(snapshot) => Some(Arc::clone(snapshot)),
            DashboardState::Loading { retained } | DashboardState::Error { retained, .. } => {
                retained.clone()
            }
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::initial()
    }
}
