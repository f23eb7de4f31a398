use module_wiring::{Address, ModuleName, CANONICAL_EDGES};
use std::collections::HashMap;

/// The peer addresses a module has been told about.
///
/// Only the owner (the deployer) may write, a peer can never be the zero address, and only the
/// slots the module actually has are accepted. Writing a slot again overwrites it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerBook {
    owner: Address,
    slots: Vec<ModuleName>,
    peers: HashMap<ModuleName, Address>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeerBookError {
    #[error("unauthorized caller")]
    Unauthorized { caller: Address },
    #[error("invalid address: zero")]
    ZeroAddress,
    #[error("no {0} slot")]
    UnknownSlot(ModuleName),
}

impl PeerBook {
    pub fn new(owner: Address, slots: Vec<ModuleName>) -> Self {
        Self {
            owner,
            slots,
            peers: HashMap::new(),
        }
    }

    /// A book with one slot per wiring edge leaving `module`.
    pub fn for_module(owner: Address, module: ModuleName) -> Self {
        let slots = CANONICAL_EDGES
            .iter()
            .filter(|edge| edge.source == module)
            .map(|edge| edge.target)
            .collect();
        Self::new(owner, slots)
    }

    pub fn slots(&self) -> &[ModuleName] {
        &self.slots
    }

    pub fn ensure_owner(&self, caller: &Address) -> Result<(), PeerBookError> {
        if *caller != self.owner {
            return Err(PeerBookError::Unauthorized { caller: *caller });
        }
        Ok(())
    }

    /// Returns the previous value.
    pub fn set(
        &mut self,
        caller: &Address,
        peer: ModuleName,
        address: Address,
    ) -> Result<Option<Address>, PeerBookError> {
        self.ensure_owner(caller)?;
        if address.is_zero() {
            return Err(PeerBookError::ZeroAddress);
        }
        if !self.slots.contains(&peer) {
            return Err(PeerBookError::UnknownSlot(peer));
        }
        Ok(self.peers.insert(peer, address))
    }

    pub fn get(&self, peer: ModuleName) -> Option<Address> {
        self.peers.get(&peer).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_follow_edges() {
        let book = PeerBook::for_module(Address::from_index(1), ModuleName::WarehouseInventory);
        assert_eq!(
            book.slots(),
            &[
                ModuleName::StoreInventory,
                ModuleName::SupplierOrders,
                ModuleName::CustomerOrders
            ]
        );
    }

    #[test]
    fn test_owner_only() {
        let owner = Address::from_index(1);
        let mut book = PeerBook::for_module(owner, ModuleName::RoleManagement);

        let err = book
            .set(&Address::from_index(2), ModuleName::Treasury, Address::from_index(10))
            .unwrap_err();
        assert_eq!(err.to_string(), "unauthorized caller");
        assert_eq!(book.get(ModuleName::Treasury), None);
    }

    #[test]
    fn test_rejects_zero_and_unknown_slot() {
        let owner = Address::from_index(1);
        let mut book = PeerBook::for_module(owner, ModuleName::RoleManagement);

        assert_eq!(
            book.set(&owner, ModuleName::Treasury, Address::ZERO),
            Err(PeerBookError::ZeroAddress)
        );
        assert_eq!(
            book.set(&owner, ModuleName::StoreInventory, Address::from_index(10)),
            Err(PeerBookError::UnknownSlot(ModuleName::StoreInventory))
        );
    }

    #[test]
    fn test_overwrite_is_idempotent() {
        let owner = Address::from_index(1);
        let mut book = PeerBook::for_module(owner, ModuleName::RoleManagement);
        let treasury = Address::from_index(10);

        assert_eq!(book.set(&owner, ModuleName::Treasury, treasury), Ok(None));
        assert_eq!(
            book.set(&owner, ModuleName::Treasury, treasury),
            Ok(Some(treasury))
        );
        assert_eq!(book.get(ModuleName::Treasury), Some(treasury));
    }
}
