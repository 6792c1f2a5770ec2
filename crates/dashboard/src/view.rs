//! View model of the logistics manager dashboard.
//!
//! Everything a host needs to draw the page, derived from one
//! [`DashboardState`]: stat cards, the warehouse table, the low-stock list
//! and their navigation actions. `Display` renders it as plain text.

use core::fmt;

use logidash_core::WarehouseId;
use logidash_inventory::{
    DashboardStats, InventoryItem, Warehouse, low_stock_preview, warehouse_preview,
};

use crate::routes::Route;
use crate::state::DashboardState;

/// Rows shown in the warehouse table.
pub const WAREHOUSE_PREVIEW_LIMIT: usize = 5;

/// Entries shown in the low-stock list.
pub const LOW_STOCK_PREVIEW_LIMIT: usize = 4;

pub const DASHBOARD_TITLE: &str = "Logistics Manager Dashboard";

const LOADING_VALUE: &str = "...";
const NOT_AVAILABLE: &str = "N/A";

/// A labelled button; `route: None` means there is nowhere to go yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub label: &'static str,
    pub route: Option<Route>,
}

impl Action {
    const fn to(label: &'static str, route: Route) -> Self {
        Self {
            label,
            route: Some(route),
        }
    }

    const fn inert(label: &'static str) -> Self {
        Self { label, route: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelBody<T> {
    Loading(&'static str),
    Empty(&'static str),
    Rows(Vec<T>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel<T> {
    pub title: &'static str,
    pub header_action: Option<Action>,
    pub body: PanelBody<T>,
    /// Present when the preview was cut short.
    pub view_all: Option<Action>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseRow {
    pub id: WarehouseId,
    pub name: String,
    pub location: String,
    pub capacity: String,
    pub view: Route,
    pub edit: Route,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowStockRow {
    pub name: String,
    /// `quantity / reorder level`.
    pub badge: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub error: Option<String>,
    pub cards: Vec<StatCard>,
    pub warehouses: Panel<WarehouseRow>,
    pub inventory_actions: Vec<Action>,
    pub low_stock: Panel<LowStockRow>,
}

impl DashboardView {
    pub fn from_state(state: &DashboardState) -> Self {
        let loading = state.is_loading();
        let snapshot = state.snapshot();

        let (warehouses, inventory): (&[Warehouse], &[InventoryItem]) = match snapshot {
            Some(s) => (s.warehouses(), s.inventory()),
            None => (&[], &[]),
        };
        let stats = match snapshot {
            Some(s) => *s.stats(),
            None => DashboardStats::compute(&[], &[]),
        };

        let warehouse_preview = warehouse_preview(warehouses, WAREHOUSE_PREVIEW_LIMIT);
        let low_stock_preview = low_stock_preview(inventory, LOW_STOCK_PREVIEW_LIMIT);

        let warehouse_body = if loading {
            PanelBody::Loading("Loading warehouses...")
        } else if warehouse_preview.is_empty() {
            PanelBody::Empty("No warehouses found.")
        } else {
            PanelBody::Rows(warehouse_preview.items().iter().map(|w| warehouse_row(w)).collect())
        };

        let low_stock_body = if loading {
            PanelBody::Loading("Loading inventory...")
        } else if low_stock_preview.is_empty() {
            PanelBody::Empty("No low stock items found.")
        } else {
            PanelBody::Rows(
                low_stock_preview
                    .items()
                    .iter()
                    .map(|item| LowStockRow {
                        name: item.name.clone(),
                        badge: format!("{} / {}", item.quantity, item.reorder_level),
                    })
                    .collect(),
            )
        };

        // The low-stock "view all" only shows alongside the list itself.
        let low_stock_view_all = (!loading && low_stock_preview.is_truncated())
            .then_some(Action::to("View All Low Stock", Route::Reorder));

        Self {
            error: state.error_message().map(str::to_string),
            cards: stat_cards(&stats, loading),
            warehouses: Panel {
                title: "Warehouse Management",
                header_action: Some(Action::to("Add Warehouse", Route::AddWarehouse)),
                body: warehouse_body,
                view_all: warehouse_preview
                    .is_truncated()
                    .then_some(Action::to("View All Warehouses", Route::Warehouses)),
            },
            inventory_actions: vec![
                Action::to("Add New Inventory", Route::AddInventory),
                Action::to("View All Inventory", Route::Inventory),
                Action::to("Manage Reorder Levels", Route::Reorder),
                Action::inert("Transfer Inventory"),
            ],
            low_stock: Panel {
                title: "Low Stock Items",
                header_action: None,
                body: low_stock_body,
                view_all: low_stock_view_all,
            },
        }
    }
}

fn stat_cards(stats: &DashboardStats, loading: bool) -> Vec<StatCard> {
    let value = |n: u64| {
        if loading {
            LOADING_VALUE.to_string()
        } else {
            n.to_string()
        }
    };

    vec![
        StatCard {
            title: "Total Warehouses",
            value: value(stats.total_warehouses as u64),
            action: Action::to("View Warehouses", Route::Warehouses),
        },
        StatCard {
            title: "Inventory Items",
            value: value(stats.total_inventory as u64),
            action: Action::to("View Inventory", Route::Inventory),
        },
        StatCard {
            title: "Low Stock Items",
            value: value(stats.low_stock_items as u64),
            action: Action::to("Reorder Items", Route::Reorder),
        },
        StatCard {
            title: "Pending Transfers",
            value: value(stats.pending_transfers),
            action: Action::inert("View Transfers"),
        },
    ]
}

fn warehouse_row(warehouse: &Warehouse) -> WarehouseRow {
    WarehouseRow {
        id: warehouse.warehouse_id,
        name: warehouse.name.clone(),
        location: warehouse.location.clone(),
        capacity: warehouse
            .known_capacity()
            .map(|c| c.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        view: Route::WarehouseDetail(warehouse.warehouse_id),
        edit: Route::EditWarehouse(warehouse.warehouse_id),
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.route {
            Some(route) => write!(f, "[{}] -> {}", self.label, route),
            None => write!(f, "[{}]", self.label),
        }
    }
}

impl DashboardView {
    fn fmt_body<T>(
        f: &mut fmt::Formatter<'_>,
        body: &PanelBody<T>,
        mut row: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
    ) -> fmt::Result {
        match body {
            PanelBody::Loading(msg) | PanelBody::Empty(msg) => writeln!(f, "  {msg}"),
            PanelBody::Rows(rows) => rows.iter().try_for_each(|r| row(f, r)),
        }
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{DASHBOARD_TITLE}")?;
        if let Some(error) = &self.error {
            writeln!(f, "! {error}")?;
        }
        writeln!(f)?;

        for card in &self.cards {
            writeln!(f, "{:<18} {:>6}  {}", card.title, card.value, card.action)?;
        }
        writeln!(f)?;

        let panel = &self.warehouses;
        match &panel.header_action {
            Some(action) => writeln!(f, "{}  {}", panel.title, action)?,
            None => writeln!(f, "{}", panel.title)?,
        }
        Self::fmt_body(f, &panel.body, |f, row| {
            writeln!(
                f,
                "  {:>5}  {:<20} {:<20} {:>8}  {} {}",
                row.id, row.name, row.location, row.capacity, row.view, row.edit
            )
        })?;
        if let Some(view_all) = &panel.view_all {
            writeln!(f, "  {view_all}")?;
        }
        writeln!(f)?;

        writeln!(f, "Inventory Management")?;
        for action in &self.inventory_actions {
            writeln!(f, "  {action}")?;
        }
        writeln!(f)?;

        let panel = &self.low_stock;
        writeln!(f, "{}", panel.title)?;
        Self::fmt_body(f, &panel.body, |f, row| writeln!(f, "  {:<30} {}", row.name, row.badge))?;
        if let Some(view_all) = &panel.view_all {
            writeln!(f, "  {view_all}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DashboardSnapshot;
    use chrono::Utc;
    use logidash_core::InventoryItemId;
    use std::sync::Arc;

    fn warehouses(n: usize) -> Vec<Warehouse> {
        (1..=n as i64)
            .map(|i| Warehouse::new(WarehouseId::new(i), format!("WH {i}"), "Harbor"))
            .collect()
    }

    fn item(id: i64, quantity: u32, reorder_level: u32) -> InventoryItem {
        InventoryItem::new(InventoryItemId::new(id), format!("Item {id}"), quantity, reorder_level)
    }

    fn ready(warehouses: Vec<Warehouse>, inventory: Vec<InventoryItem>) -> DashboardState {
        DashboardState::Ready(Arc::new(DashboardSnapshot::new(warehouses, inventory, Utc::now())))
    }

    #[test]
    fn loading_view_shows_placeholders() {
        let view = DashboardView::from_state(&DashboardState::initial());
        assert!(view.cards.iter().all(|c| c.value == "..."));
        assert_eq!(view.warehouses.body, PanelBody::Loading("Loading warehouses..."));
        assert_eq!(view.low_stock.body, PanelBody::Loading("Loading inventory..."));
        assert!(view.error.is_none());
    }

    #[test]
    fn empty_ready_view_shows_empty_messages() {
        let view = DashboardView::from_state(&ready(vec![], vec![]));
        let values: Vec<&str> = view.cards.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["0", "0", "0", "3"]);
        assert_eq!(view.warehouses.body, PanelBody::Empty("No warehouses found."));
        assert_eq!(view.low_stock.body, PanelBody::Empty("No low stock items found."));
        assert!(view.warehouses.view_all.is_none());
        assert!(view.low_stock.view_all.is_none());
    }

    #[test]
    fn seven_warehouses_show_five_rows_and_view_all() {
        let view = DashboardView::from_state(&ready(warehouses(7), vec![]));
        match &view.warehouses.body {
            PanelBody::Rows(rows) => {
                let ids: Vec<i64> = rows.iter().map(|r| r.id.get()).collect();
                assert_eq!(ids, vec![1, 2, 3, 4, 5]);
            }
            other => panic!("expected rows, got {other:?}"),
        }
        assert_eq!(
            view.warehouses.view_all,
            Some(Action::to("View All Warehouses", Route::Warehouses))
        );
    }

    #[test]
    fn capacity_is_not_available_when_absent_or_zero() {
        let ws = vec![
            Warehouse::new(WarehouseId::new(1), "A", "X"),
            Warehouse::new(WarehouseId::new(2), "B", "Y").with_capacity(0),
            Warehouse::new(WarehouseId::new(3), "C", "Z").with_capacity(1200),
        ];
        let view = DashboardView::from_state(&ready(ws, vec![]));
        let PanelBody::Rows(rows) = &view.warehouses.body else {
            panic!("expected rows");
        };
        let capacities: Vec<&str> = rows.iter().map(|r| r.capacity.as_str()).collect();
        assert_eq!(capacities, vec!["N/A", "N/A", "1200"]);
        assert_eq!(rows[2].view, Route::WarehouseDetail(WarehouseId::new(3)));
        assert_eq!(rows[2].edit, Route::EditWarehouse(WarehouseId::new(3)));
    }

    #[test]
    fn low_stock_list_shows_badges_in_order_and_truncates() {
        let inventory = vec![
            item(1, 2, 10),
            item(2, 20, 5),
            item(3, 1, 3),
            item(4, 0, 1),
            item(5, 4, 8),
            item(6, 7, 9),
        ];
        let view = DashboardView::from_state(&ready(vec![], inventory));
        let PanelBody::Rows(rows) = &view.low_stock.body else {
            panic!("expected rows");
        };
        let badges: Vec<&str> = rows.iter().map(|r| r.badge.as_str()).collect();
        assert_eq!(badges, vec!["2 / 10", "1 / 3", "0 / 1", "4 / 8"]);
        assert_eq!(view.cards[2].value, "5");
        assert_eq!(
            view.low_stock.view_all,
            Some(Action::to("View All Low Stock", Route::Reorder))
        );
    }

    #[test]
    fn pending_transfers_card_has_no_destination() {
        let view = DashboardView::from_state(&ready(vec![], vec![]));
        assert_eq!(view.cards[3].title, "Pending Transfers");
        assert_eq!(view.cards[3].action.route, None);
    }

    #[test]
    fn error_view_shows_banner_and_retained_data() {
        let snapshot = Arc::new(DashboardSnapshot::new(warehouses(2), vec![], Utc::now()));
        let state = DashboardState::Error {
            message: "Failed to load dashboard data. Please try again later.".to_string(),
            retained: Some(snapshot),
        };
        let view = DashboardView::from_state(&state);
        assert_eq!(
            view.error.as_deref(),
            Some("Failed to load dashboard data. Please try again later.")
        );
        assert_eq!(view.cards[0].value, "2");
        assert!(matches!(view.warehouses.body, PanelBody::Rows(ref rows) if rows.len() == 2));
    }

    #[test]
    fn reloading_keeps_warehouse_view_all_from_retained_data() {
        let snapshot = Arc::new(DashboardSnapshot::new(warehouses(6), vec![], Utc::now()));
        let view = DashboardView::from_state(&DashboardState::Loading {
            retained: Some(snapshot),
        });
        assert!(view.warehouses.view_all.is_some());
        assert_eq!(view.warehouses.body, PanelBody::Loading("Loading warehouses..."));
    }

    #[test]
    fn text_rendering_includes_key_lines() {
        let text = DashboardView::from_state(&ready(warehouses(1), vec![item(1, 2, 10)])).to_string();
        assert!(text.starts_with(DASHBOARD_TITLE));
        assert!(text.contains("Total Warehouses"));
        assert!(text.contains("/warehouses/edit/1"));
        assert!(text.contains("2 / 10"));
        assert!(text.contains("[Transfer Inventory]"));
    }
}
