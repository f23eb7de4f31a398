//! [`ModuleEntity`] implementation for [`Treasury`].

use super::{TreasuryCall, TreasuryError, TreasuryQuery, TreasuryQueryResult};
use crate::clients::RoleClient;
use crate::model::{PeerBookError, Treasury, TreasuryDeploy};
use async_trait::async_trait;
use module_host::ModuleEntity;
use module_wiring::{Address, RoleId};

#[async_trait]
impl ModuleEntity for Treasury {
    type Address = Address;
    type Deploy = TreasuryDeploy;
    type Call = TreasuryCall;
    type CallResult = ();
    type Query = TreasuryQuery;
    type QueryResult = TreasuryQueryResult;
    type Context = RoleClient;
    type Error = TreasuryError;

    fn from_deploy(
        address: Address,
        deployer: Address,
        params: TreasuryDeploy,
    ) -> Result<Self, TreasuryError> {
        if params.role_management.is_zero() {
            return Err(PeerBookError::ZeroAddress.into());
        }
        Ok(Self::new(address, deployer, params.role_management))
    }

    async fn handle_call(
        &mut self,
        caller: &Address,
        call: TreasuryCall,
        roles: &RoleClient,
    ) -> Result<(), TreasuryError> {
        match call {
            TreasuryCall::SetPeer { peer, address } => {
                self.peers.set(caller, peer, address)?;
            }
            TreasuryCall::SetInitialFinanceDirector(account) => {
                self.peers.ensure_owner(caller)?;
                if let Some(current) = self.finance_director {
                    return Err(TreasuryError::FinanceDirectorAlreadySet(current));
                }
                if account.is_zero() {
                    return Err(PeerBookError::ZeroAddress.into());
                }
                let held = roles
                    .has_role(self.role_management, RoleId::finance_director(), account)
                    .await
                    .map_err(|e| TreasuryError::HostCommunicationError(e.to_string()))?;
                if !held {
                    return Err(TreasuryError::MissingRole(account));
                }
                self.finance_director = Some(account);
            }
        }
        Ok(())
    }

    async fn handle_query(
        &self,
        query: TreasuryQuery,
        _roles: &RoleClient,
    ) -> Result<TreasuryQueryResult, TreasuryError> {
        Ok(match query {
            TreasuryQuery::FinanceDirector => {
                TreasuryQueryResult::FinanceDirector(self.finance_director)
            }
            TreasuryQuery::Peer(peer) => TreasuryQueryResult::Peer(self.peers.get(peer)),
        })
    }
}
