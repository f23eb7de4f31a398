//! # Peer Module Actor
//!
//! Hosts the four modules that only hold peer addresses: WarehouseInventory, SupplierOrders,
//! StoreInventory and CustomerOrders. Each kind gets its own host, so "the latest deployment of
//! StoreInventory" is answered by the StoreInventory host alone.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::PeerModuleClient;
use crate::model::PeerModule;
use module_host::ModuleHost;
use module_wiring::Address;

/// Creates a host for one peer module kind and its client.
pub fn new(
    next_address: impl FnMut() -> Address + Send + 'static,
) -> (ModuleHost<PeerModule>, PeerModuleClient) {
    let (actor, generic_client) = ModuleHost::new(32, next_address);
    (actor, PeerModuleClient::new(generic_client))
}
