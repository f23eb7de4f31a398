//! # RoleManagement Client
//!
//! Wraps a `HostClient<RoleManagement>` and exposes role and board operations.
use crate::model::{RoleManagement, RoleManagementDeploy};
use crate::role_actor::{RoleCall, RoleError, RoleQuery, RoleQueryResult};
use async_trait::async_trait;
use module_host::{HostClient, HostError, ModuleClient};
use module_wiring::{Address, ModuleName, RoleId};
use tracing::{debug, instrument};

/// Client for interacting with RoleManagement deployments.
#[derive(Clone)]
pub struct RoleClient {
    inner: HostClient<RoleManagement>,
}

impl RoleClient {
    pub fn new(inner: HostClient<RoleManagement>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ModuleClient<RoleManagement> for RoleClient {
    type Error = RoleError;

    fn inner(&self) -> &HostClient<RoleManagement> {
        &self.inner
    }

    fn map_error(e: HostError) -> Self::Error {
        e.into_module_error(RoleError::HostCommunicationError)
    }
}

impl RoleClient {
    #[instrument(skip(self))]
    pub async fn deploy(&self, deployer: Address) -> Result<Address, RoleError> {
        debug!("Sending request");
        self.inner
            .deploy(deployer, RoleManagementDeploy)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn set_peer(
        &self,
        module: Address,
        caller: Address,
        peer: ModuleName,
        address: Address,
    ) -> Result<(), RoleError> {
        debug!("Sending request");
        self.inner
            .call(module, caller, RoleCall::SetPeer { peer, address })
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn add_board_member(
        &self,
        module: Address,
        caller: Address,
        member: Address,
    ) -> Result<(), RoleError> {
        debug!("Sending request");
        self.inner
            .call(module, caller, RoleCall::AddBoardMember(member))
            .await
            .map_err(Self::map_error)
    }

    /// Proposed by `caller`, approved by `approvers`. The proposer may not be among them.
    #[instrument(skip(self))]
    pub async fn grant_role_by_board(
        &self,
        module: Address,
        caller: Address,
        role: RoleId,
        account: Address,
        approvers: Vec<Address>,
    ) -> Result<(), RoleError> {
        debug!("Sending request");
        self.inner
            .call(
                module,
                caller,
                RoleCall::GrantRoleByBoard {
                    role,
                    account,
                    approvers,
                },
            )
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn has_role(
        &self,
        module: Address,
        role: RoleId,
        account: Address,
    ) -> Result<bool, RoleError> {
        debug!("Sending request");
        match self
            .inner
            .query(module, RoleQuery::HasRole { role, account })
            .await
            .map_err(Self::map_error)?
        {
            RoleQueryResult::HasRole(held) => Ok(held),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn is_board_member(
        &self,
        module: Address,
        account: Address,
    ) -> Result<bool, RoleError> {
        debug!("Sending request");
        match self
            .inner
            .query(module, RoleQuery::IsBoardMember(account))
            .await
            .map_err(Self::map_error)?
        {
            RoleQueryResult::IsBoardMember(member) => Ok(member),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn peer(
        &self,
        module: Address,
        peer: ModuleName,
    ) -> Result<Option<Address>, RoleError> {
        debug!("Sending request");
        match self
            .inner
            .query(module, RoleQuery::Peer(peer))
            .await
            .map_err(Self::map_error)?
        {
            RoleQueryResult::Peer(address) => Ok(address),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: RoleQueryResult) -> RoleError {
    RoleError::HostCommunicationError(format!("unexpected response {:?}", result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use module_host::mock::{create_mock_client, expect_call, expect_query};

    #[tokio::test]
    async fn test_has_role_sends_query() {
        let (client, mut receiver) = create_mock_client::<RoleManagement>(10);
        let role_client = RoleClient::new(client);
        let rm = Address::from_index(0x100);
        let account = Address::from_index(2);

        let task = tokio::spawn(async move {
            role_client
                .has_role(rm, RoleId::finance_director(), account)
                .await
        });

        let (address, query, responder) = expect_query(&mut receiver)
            .await
            .expect("Expected Query request");
        assert_eq!(address, rm);
        match query {
            RoleQuery::HasRole { role, account: a } => {
                assert_eq!(role, RoleId::finance_director());
                assert_eq!(a, account);
            }
            other => panic!("Expected HasRole, got {:?}", other),
        }
        responder.send(Ok(RoleQueryResult::HasRole(true))).unwrap();

        assert!(task.await.unwrap().unwrap());
    }

    #[tokio::test]
    async fn test_grant_keeps_typed_revert() {
        let (client, mut receiver) = create_mock_client::<RoleManagement>(10);
        let role_client = RoleClient::new(client);
        let proposer = Address::from_index(1);

        let task = tokio::spawn(async move {
            role_client
                .grant_role_by_board(
                    Address::from_index(0x100),
                    proposer,
                    RoleId::finance_director(),
                    Address::from_index(2),
                    vec![proposer],
                )
                .await
        });

        let (_, caller, call, responder) = expect_call(&mut receiver)
            .await
            .expect("Expected Call request");
        assert_eq!(caller, proposer);
        assert!(matches!(call, RoleCall::GrantRoleByBoard { .. }));
        responder
            .send(Err(HostError::Reverted(Box::new(RoleError::SelfApproval))))
            .unwrap();

        assert_eq!(task.await.unwrap(), Err(RoleError::SelfApproval));
    }

    #[tokio::test]
    async fn test_mismatched_response_is_an_error() {
        let (client, mut receiver) = create_mock_client::<RoleManagement>(10);
        let role_client = RoleClient::new(client);

        let task = tokio::spawn(async move {
            role_client
                .peer(Address::from_index(0x100), ModuleName::Treasury)
                .await
        });

        let (_, _, responder) = expect_query(&mut receiver).await.unwrap();
        responder
            .send(Ok(RoleQueryResult::IsBoardMember(true)))
            .unwrap();

        assert!(matches!(
            task.await.unwrap(),
            Err(RoleError::HostCommunicationError(_))
        ));
    }
}
