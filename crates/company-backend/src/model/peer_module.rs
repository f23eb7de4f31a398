use super::PeerBook;
use module_wiring::{Address, ModuleName};

/// WarehouseInventory, SupplierOrders, StoreInventory or CustomerOrders.
///
/// These four differ only in which constructor addresses they take and which peers they hold,
/// so one type with a `kind` covers all of them.
#[derive(Debug, Clone)]
pub struct PeerModule {
    pub address: Address,
    pub kind: ModuleName,
    pub peers: PeerBook,
    pub role_management: Address,
    pub treasury: Option<Address>,
}

#[derive(Debug, Clone)]
pub struct PeerModuleDeploy {
    pub kind: ModuleName,
    pub role_management: Address,
    pub treasury: Option<Address>,
}

impl PeerModule {
    /// Kinds this type can be deployed as.
    pub const KINDS: [ModuleName; 4] = [
        ModuleName::WarehouseInventory,
        ModuleName::SupplierOrders,
        ModuleName::StoreInventory,
        ModuleName::CustomerOrders,
    ];
}
