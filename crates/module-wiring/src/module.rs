//! The closed set of modules that make up the company backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A module of the company backend, identified by its stable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModuleName {
    RoleManagement,
    Treasury,
    WarehouseInventory,
    SupplierOrders,
    StoreInventory,
    CustomerOrders,
}

impl ModuleName {
    /// Every module, in deployment order.
    pub const ALL: [ModuleName; 6] = [
        ModuleName::RoleManagement,
        ModuleName::Treasury,
        ModuleName::WarehouseInventory,
        ModuleName::SupplierOrders,
        ModuleName::StoreInventory,
        ModuleName::CustomerOrders,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RoleManagement => "RoleManagement",
            Self::Treasury => "Treasury",
            Self::WarehouseInventory => "WarehouseInventory",
            Self::SupplierOrders => "SupplierOrders",
            Self::StoreInventory => "StoreInventory",
            Self::CustomerOrders => "CustomerOrders",
        }
    }

    /// Modules whose address this module receives in its constructor.
    /// They must be deployed, and resolved, before it.
    #[must_use]
    pub const fn constructor_dependencies(&self) -> &'static [ModuleName] {
        match self {
            // Level 0
            Self::RoleManagement => &[],

            // Level 1: role checks only
            Self::Treasury => &[Self::RoleManagement],
            Self::WarehouseInventory => &[Self::RoleManagement],
            Self::StoreInventory => &[Self::RoleManagement],

            // Level 2: escrow through the treasury
            Self::SupplierOrders => &[Self::RoleManagement, Self::Treasury],
            Self::CustomerOrders => &[Self::RoleManagement, Self::Treasury],
        }
    }

    /// Name of the setter other modules expose to learn this module's address.
    #[must_use]
    pub const fn setter_name(&self) -> &'static str {
        match self {
            Self::RoleManagement => "set_role_management_address",
            Self::Treasury => "set_treasury_address",
            Self::WarehouseInventory => "set_warehouse_inventory_address",
            Self::SupplierOrders => "set_supplier_orders_address",
            Self::StoreInventory => "set_store_inventory_address",
            Self::CustomerOrders => "set_customer_orders_address",
        }
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown module '{0}'")]
pub struct UnknownModuleName(pub String);

impl FromStr for ModuleName {
    type Err = UnknownModuleName;

    /// Accepts the display name in any case, with or without `_`/`-` separators
    /// (`Treasury`, `store_inventory`, `customer-orders`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .into_iter()
            .find(|name| name.as_str().to_lowercase() == wanted)
            .ok_or_else(|| UnknownModuleName(s.to_string()))
    }
}
