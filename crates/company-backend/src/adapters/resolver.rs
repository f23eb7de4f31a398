use super::{HostedModule, ModuleHandle};
use crate::clients::{PeerModuleClient, RoleClient, TreasuryClient};
use async_trait::async_trait;
use module_host::ModuleClient;
use module_wiring::{Address, ModuleName, ModuleResolver, Resolution};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;

/// Resolves a module to the latest deployment recorded by its host.
#[derive(Clone)]
pub struct HostResolver {
    role_management: RoleClient,
    treasury: TreasuryClient,
    peers: HashMap<ModuleName, PeerModuleClient>,
}

impl HostResolver {
    pub fn new(
        role_management: RoleClient,
        treasury: TreasuryClient,
        peers: HashMap<ModuleName, PeerModuleClient>,
    ) -> Self {
        Self {
            role_management,
            treasury,
            peers,
        }
    }
}

fn resolution<E: Display>(
    name: ModuleName,
    deployed: Result<Option<Address>, E>,
    handle: ModuleHandle,
) -> Resolution {
    match deployed {
        Ok(Some(address)) => {
            debug!(%name, %address, "Found deployment");
            Resolution::Found(Arc::new(HostedModule::new(name, address, handle)))
        }
        Ok(None) => Resolution::missing(format!("{} has not been deployed", name)),
        Err(e) => Resolution::missing(format!("deployment lookup failed: {}", e)),
    }
}

#[async_trait]
impl ModuleResolver for HostResolver {
    async fn resolve(&self, name: ModuleName) -> Resolution {
        match name {
            ModuleName::RoleManagement => {
                let client = self.role_management.clone();
                resolution(
                    name,
                    client.deployed().await,
                    ModuleHandle::RoleManagement(client),
                )
            }
            ModuleName::Treasury => {
                let client = self.treasury.clone();
                resolution(name, client.deployed().await, ModuleHandle::Treasury(client))
            }
            _ => match self.peers.get(&name) {
                Some(client) => {
                    let client = client.clone();
                    resolution(name, client.deployed().await, ModuleHandle::Peer(client))
                }
                None => Resolution::missing(format!("no host for {}", name)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PeerModule, RoleManagement, Treasury};
    use module_host::mock::MockHost;
    use module_host::HostError;

    fn resolver(
        role: &MockHost<RoleManagement>,
        treasury: &MockHost<Treasury>,
        store: &MockHost<PeerModule>,
    ) -> HostResolver {
        let peers = HashMap::from([(
            ModuleName::StoreInventory,
            PeerModuleClient::new(store.client()),
        )]);
        HostResolver::new(
            RoleClient::new(role.client()),
            TreasuryClient::new(treasury.client()),
            peers,
        )
    }

    #[tokio::test]
    async fn test_found_and_missing() {
        let mut role = MockHost::<RoleManagement>::new();
        let mut treasury = MockHost::<Treasury>::new();
        let mut store = MockHost::<PeerModule>::new();
        role.expect_deployed()
            .return_ok(Some(Address::from_index(0x100)));
        treasury.expect_deployed().return_ok(None);
        store.expect_deployed().return_err(HostError::HostClosed);

        let resolver = resolver(&role, &treasury, &store);

        match resolver.resolve(ModuleName::RoleManagement).await {
            Resolution::Found(module) => {
                assert_eq!(module.name(), ModuleName::RoleManagement);
                assert_eq!(module.address(), Address::from_index(0x100));
                assert!(module.role_directory().is_some());
                assert!(module.privileged_slot().is_none());
            }
            other => panic!("Expected Found, got {:?}", other),
        }
        match resolver.resolve(ModuleName::Treasury).await {
            Resolution::Missing { reason } => {
                assert_eq!(reason, "Treasury has not been deployed")
            }
            other => panic!("Expected Missing, got {:?}", other),
        }
        match resolver.resolve(ModuleName::StoreInventory).await {
            Resolution::Missing { reason } => {
                assert!(reason.contains("Module host closed"), "{}", reason)
            }
            other => panic!("Expected Missing, got {:?}", other),
        }
        // No host was registered for CustomerOrders
        assert!(matches!(
            resolver.resolve(ModuleName::CustomerOrders).await,
            Resolution::Missing { .. }
        ));

        role.verify();
        treasury.verify();
        store.verify();
    }
}
