//! Navigation targets the dashboard links to.
//!
//! The paths are opaque to the dashboard; the host's router owns what they
//! display.

use core::fmt;
use core::str::FromStr;

use logidash_core::{DomainError, DomainResult, WarehouseId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Warehouses,
    AddWarehouse,
    WarehouseDetail(WarehouseId),
    EditWarehouse(WarehouseId),
    Inventory,
    AddInventory,
    Reorder,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Warehouses => f.write_str("/warehouses"),
            Route::AddWarehouse => f.write_str("/warehouses/add"),
            Route::WarehouseDetail(id) => write!(f, "/warehouses/{id}"),
            Route::EditWarehouse(id) => write!(f, "/warehouses/edit/{id}"),
            Route::Inventory => f.write_str("/inventory"),
            Route::AddInventory => f.write_str("/inventory/add"),
            Route::Reorder => f.write_str("/inventory/reorder"),
        }
    }
}

impl FromStr for Route {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        let path = s
            .strip_prefix('/')
            .ok_or_else(|| DomainError::unknown_route(s))?
            .trim_end_matches('/');
        let segments: Vec<&str> = path.split('/').collect();

        let route = match segments.as_slice() {
            ["warehouses"] => Route::Warehouses,
            ["warehouses", "add"] => Route::AddWarehouse,
            ["warehouses", "edit", id] => Route::EditWarehouse(id.parse()?),
            ["warehouses", id] => Route::WarehouseDetail(id.parse()?),
            ["inventory"] => Route::Inventory,
            ["inventory", "add"] => Route::AddInventory,
            ["inventory", "reorder"] => Route::Reorder,
            _ => return Err(DomainError::unknown_route(s)),
        };

        Ok(route)
    }
}
