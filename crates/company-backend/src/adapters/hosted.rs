use crate::clients::{PeerModuleClient, RoleClient, TreasuryClient};
use async_trait::async_trait;
use module_wiring::{
    Address, DeployedModule, ModuleName, PrivilegedSlot, Rejection, RoleDirectory, RoleId,
};

/// The host client a deployed module is reached through.
#[derive(Clone)]
pub enum ModuleHandle {
    RoleManagement(RoleClient),
    Treasury(TreasuryClient),
    Peer(PeerModuleClient),
}

/// One deployed module: its name, its address and the client of the host that owns it.
#[derive(Clone)]
pub struct HostedModule {
    name: ModuleName,
    address: Address,
    handle: ModuleHandle,
}

impl HostedModule {
    pub fn new(name: ModuleName, address: Address, handle: ModuleHandle) -> Self {
        Self {
            name,
            address,
            handle,
        }
    }
}

fn reject(e: impl std::fmt::Display) -> Rejection {
    Rejection::new(e.to_string())
}

#[async_trait]
impl DeployedModule for HostedModule {
    fn name(&self) -> ModuleName {
        self.name
    }

    fn address(&self) -> Address {
        self.address
    }

    async fn set_peer_address(
        &self,
        operator: Address,
        peer: ModuleName,
        address: Address,
    ) -> Result<(), Rejection> {
        match &self.handle {
            ModuleHandle::RoleManagement(client) => client
                .set_peer(self.address, operator, peer, address)
                .await
                .map_err(reject),
            ModuleHandle::Treasury(client) => client
                .set_peer(self.address, operator, peer, address)
                .await
                .map_err(reject),
            ModuleHandle::Peer(client) => client
                .set_peer(self.address, operator, peer, address)
                .await
                .map_err(reject),
        }
    }

    fn role_directory(&self) -> Option<&dyn RoleDirectory> {
        match self.handle {
            ModuleHandle::RoleManagement(_) => Some(self as &dyn RoleDirectory),
            _ => None,
        }
    }

    fn privileged_slot(&self) -> Option<&dyn PrivilegedSlot> {
        match self.handle {
            ModuleHandle::Treasury(_) => Some(self as &dyn PrivilegedSlot),
            _ => None,
        }
    }
}

#[async_trait]
impl RoleDirectory for HostedModule {
    async fn has_role(&self, role: &RoleId, account: Address) -> Result<bool, Rejection> {
        match &self.handle {
            ModuleHandle::RoleManagement(client) => client
                .has_role(self.address, role.clone(), account)
                .await
                .map_err(reject),
            _ => Err(Rejection::new(format!("{} has no roles", self.name))),
        }
    }
}

#[async_trait]
impl PrivilegedSlot for HostedModule {
    async fn privileged_reference(&self) -> Result<Option<Address>, Rejection> {
        match &self.handle {
            ModuleHandle::Treasury(client) => {
                client.finance_director(self.address).await.map_err(reject)
            }
            _ => Err(Rejection::new(format!(
                "{} has no finance director",
                self.name
            ))),
        }
    }

    async fn set_initial_privileged_reference(
        &self,
        operator: Address,
        account: Address,
    ) -> Result<(), Rejection> {
        match &self.handle {
            ModuleHandle::Treasury(client) => client
                .set_initial_finance_director(self.address, operator, account)
                .await
                .map_err(reject),
            _ => Err(Rejection::new(format!(
                "{} has no finance director",
                self.name
            ))),
        }
    }
}
