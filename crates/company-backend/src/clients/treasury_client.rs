//! # Treasury Client
//!
//! Wraps a `HostClient<Treasury>`.
use crate::model::{Treasury, TreasuryDeploy};
use crate::treasury_actor::{TreasuryCall, TreasuryError, TreasuryQuery, TreasuryQueryResult};
use async_trait::async_trait;
use module_host::{HostClient, HostError, ModuleClient};
use module_wiring::{Address, ModuleName};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct TreasuryClient {
    inner: HostClient<Treasury>,
}

impl TreasuryClient {
    pub fn new(inner: HostClient<Treasury>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ModuleClient<Treasury> for TreasuryClient {
    type Error = TreasuryError;

    fn inner(&self) -> &HostClient<Treasury> {
        &self.inner
    }

    fn map_error(e: HostError) -> Self::Error {
        e.into_module_error(TreasuryError::HostCommunicationError)
    }
}

impl TreasuryClient {
    #[instrument(skip(self))]
    pub async fn deploy(
        &self,
        deployer: Address,
        role_management: Address,
    ) -> Result<Address, TreasuryError> {
        debug!("Sending request");
        self.inner
            .deploy(deployer, TreasuryDeploy { role_management })
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
    ) -> Result<(), TreasuryError> {
        debug!("Sending request");
        self.inner
            .call(module, caller, TreasuryCall::SetPeer { peer, address })
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn set_initial_finance_director(
        &self,
        module: Address,
        caller: Address,
        account: Address,
    ) -> Result<(), TreasuryError> {
        debug!("Sending request");
        self.inner
            .call(module, caller, TreasuryCall::SetInitialFinanceDirector(account))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn finance_director(
        &self,
        module: Address,
    ) -> Result<Option<Address>, TreasuryError> {
        debug!("Sending request");
        match self
            .inner
            .query(module, TreasuryQuery::FinanceDirector)
            .await
            .map_err(Self::map_error)?
        {
            TreasuryQueryResult::FinanceDirector(current) => Ok(current),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn peer(
        &self,
        module: Address,
        peer: ModuleName,
    ) -> Result<Option<Address>, TreasuryError> {
        debug!("Sending request");
        match self
            .inner
            .query(module, TreasuryQuery::Peer(peer))
            .await
            .map_err(Self::map_error)?
        {
            TreasuryQueryResult::Peer(address) => Ok(address),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: TreasuryQueryResult) -> TreasuryError {
    TreasuryError::HostCommunicationError(format!("unexpected response {:?}", result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use module_host::mock::{create_mock_client, expect_call, expect_query};

    #[tokio::test]
    async fn test_finance_director_query() {
        let (client, mut receiver) = create_mock_client::<Treasury>(10);
        let treasury_client = TreasuryClient::new(client);
        let treasury = Address::from_index(0x101);

        let task = tokio::spawn(async move { treasury_client.finance_director(treasury).await });

        let (address, query, responder) = expect_query(&mut receiver)
            .await
            .expect("Expected Query request");
        assert_eq!(address, treasury);
        assert!(matches!(query, TreasuryQuery::FinanceDirector));
        responder
            .send(Ok(TreasuryQueryResult::FinanceDirector(None)))
            .unwrap();

        assert_eq!(task.await.unwrap(), Ok(None));
    }

    #[tokio::test]
    async fn test_host_failure_maps_to_communication_error() {
        let (client, mut receiver) = create_mock_client::<Treasury>(10);
        let treasury_client = TreasuryClient::new(client);

        let task = tokio::spawn(async move {
            treasury_client
                .set_initial_finance_director(
                    Address::from_index(0x101),
                    Address::from_index(1),
                    Address::from_index(2),
                )
                .await
        });

        let (_, _, call, responder) = expect_call(&mut receiver).await.unwrap();
        assert!(matches!(
            call,
            TreasuryCall::SetInitialFinanceDirector(a) if a == Address::from_index(2)
        ));
        drop(responder);

        assert_eq!(
            task.await.unwrap(),
            Err(TreasuryError::HostCommunicationError(
                "Module host dropped response channel".to_string()
            ))
        );
    }
}
