//! [`ModuleEntity`] implementation for [`RoleManagement`].

use super::{RoleCall, RoleError, RoleQuery, RoleQueryResult};
use crate::model::{PeerBookError, RoleManagement, RoleManagementDeploy};
use async_trait::async_trait;
use module_host::ModuleEntity;
use module_wiring::Address;
use tracing::info;

#[async_trait]
impl ModuleEntity for RoleManagement {
    type Address = Address;
    type Deploy = RoleManagementDeploy;
    type Call = RoleCall;
    type CallResult = ();
    type Query = RoleQuery;
    type QueryResult = RoleQueryResult;
    type Context = ();
    type Error = RoleError;

    fn from_deploy(
        address: Address,
        deployer: Address,
        _params: RoleManagementDeploy,
    ) -> Result<Self, RoleError> {
        Ok(Self::new(address, deployer))
    }

    async fn handle_call(
        &mut self,
        caller: &Address,
        call: RoleCall,
        _ctx: &(),
    ) -> Result<(), RoleError> {
        match call {
            RoleCall::SetPeer { peer, address } => {
                self.peers.set(caller, peer, address)?;
            }
            RoleCall::AddBoardMember(member) => {
                self.peers.ensure_owner(caller)?;
                if member.is_zero() {
                    return Err(PeerBookError::ZeroAddress.into());
                }
                self.board.insert(member);
            }
            RoleCall::GrantRoleByBoard {
                role,
                account,
                approvers,
            } => {
                if !self.is_board_member(caller) {
                    return Err(RoleError::NotBoardMember(*caller));
                }
                if account.is_zero() {
                    return Err(PeerBookError::ZeroAddress.into());
                }
                if approvers.is_empty() {
                    return Err(RoleError::NoApprovers);
                }
                if approvers.contains(caller) {
                    return Err(RoleError::SelfApproval);
                }
                if let Some(outsider) = approvers.iter().find(|a| !self.is_board_member(a)) {
                    return Err(RoleError::ApproverNotOnBoard(*outsider));
                }
                info!(
                    %role,
                    %account,
                    proposer = %caller,
                    approvers = approvers.len(),
                    "Role granted by board"
                );
                self.grants.insert((role, account));
            }
        }
        Ok(())
    }

    async fn handle_query(
        &self,
        query: RoleQuery,
        _ctx: &(),
    ) -> Result<RoleQueryResult, RoleError> {
        Ok(match query {
            RoleQuery::HasRole { role, account } => {
                RoleQueryResult::HasRole(self.has_role(&role, &account))
            }
            RoleQuery::IsBoardMember(account) => {
                RoleQueryResult::IsBoardMember(self.is_board_member(&account))
            }
            RoleQuery::Peer(peer) => RoleQueryResult::Peer(self.peers.get(peer)),
        })
    }
}
