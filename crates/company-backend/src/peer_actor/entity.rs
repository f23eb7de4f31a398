//! [`ModuleEntity`] implementation for [`PeerModule`].

use super::{PeerCall, PeerModuleError, PeerQuery, PeerQueryResult};
use crate::model::{PeerBook, PeerModule, PeerModuleDeploy};
use async_trait::async_trait;
use module_host::ModuleEntity;
use module_wiring::{Address, ModuleName};

#[async_trait]
impl ModuleEntity for PeerModule {
    type Address = Address;
    type Deploy = PeerModuleDeploy;
    type Call = PeerCall;
    type CallResult = ();
    type Query = PeerQuery;
    type QueryResult = PeerQueryResult;
    type Context = ();
    type Error = PeerModuleError;

    /// Checks the constructor addresses against the kind's constructor dependencies.
    fn from_deploy(
        address: Address,
        deployer: Address,
        params: PeerModuleDeploy,
    ) -> Result<Self, PeerModuleError> {
        if !PeerModule::KINDS.contains(&params.kind) {
            return Err(PeerModuleError::UnsupportedKind(params.kind));
        }
        for dependency in params.kind.constructor_dependencies() {
            let provided = match dependency {
                ModuleName::RoleManagement => Some(params.role_management),
                ModuleName::Treasury => params.treasury,
                _ => None,
            };
            if provided.map_or(true, |a| a.is_zero()) {
                return Err(PeerModuleError::MissingConstructorArgument(*dependency));
            }
        }

        Ok(Self {
            address,
            kind: params.kind,
            peers: PeerBook::for_module(deployer, params.kind),
            role_management: params.role_management,
            treasury: params.treasury,
        })
    }

    async fn handle_call(
        &mut self,
        caller: &Address,
        call: PeerCall,
        _ctx: &(),
    ) -> Result<(), PeerModuleError> {
        match call {
            PeerCall::SetPeer { peer, address } => {
                self.peers.set(caller, peer, address)?;
            }
        }
        Ok(())
    }

    async fn handle_query(
        &self,
        query: PeerQuery,
        _ctx: &(),
    ) -> Result<PeerQueryResult, PeerModuleError> {
        Ok(match query {
            PeerQuery::Kind => PeerQueryResult::Kind(self.kind),
            PeerQuery::Peer(peer) => PeerQueryResult::Peer(self.peers.get(peer)),
        })
    }
}
