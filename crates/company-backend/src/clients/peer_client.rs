//! # Peer Module Client
//!
//! One client per peer module kind; each wraps the `HostClient<PeerModule>` of that kind's host.
use crate::model::{PeerModule, PeerModuleDeploy};
use crate::peer_actor::{PeerCall, PeerModuleError, PeerQuery, PeerQueryResult};
use async_trait::async_trait;
use module_host::{HostClient, HostError, ModuleClient};
use module_wiring::{Address, ModuleName};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct PeerModuleClient {
    inner: HostClient<PeerModule>,
}

impl PeerModuleClient {
    pub fn new(inner: HostClient<PeerModule>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ModuleClient<PeerModule> for PeerModuleClient {
    type Error = PeerModuleError;

    fn inner(&self) -> &HostClient<PeerModule> {
        &self.inner
    }

    fn map_error(e: HostError) -> Self::Error {
        e.into_module_error(PeerModuleError::HostCommunicationError)
    }
}

impl PeerModuleClient {
    #[instrument(skip(self))]
    pub async fn deploy(
        &self,
        deployer: Address,
        params: PeerModuleDeploy,
    ) -> Result<Address, PeerModuleError> {
        debug!("Sending request");
        self.inner
            .deploy(deployer, params)
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
    ) -> Result<(), PeerModuleError> {
        debug!("Sending request");
        self.inner
            .call(module, caller, PeerCall::SetPeer { peer, address })
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn peer(
        &self,
        module: Address,
        peer: ModuleName,
    ) -> Result<Option<Address>, PeerModuleError> {
        debug!("Sending request");
        match self
            .inner
            .query(module, PeerQuery::Peer(peer))
            .await
            .map_err(Self::map_error)?
        {
            PeerQueryResult::Peer(address) => Ok(address),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn kind(&self, module: Address) -> Result<ModuleName, PeerModuleError> {
        debug!("Sending request");
        match self
            .inner
            .query(module, PeerQuery::Kind)
            .await
            .map_err(Self::map_error)?
        {
            PeerQueryResult::Kind(kind) => Ok(kind),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: PeerQueryResult) -> PeerModuleError {
    PeerModuleError::HostCommunicationError(format!("unexpected response {:?}", result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PeerBookError;
    use module_host::mock::{create_mock_client, expect_call, expect_deployed, expect_query};

    #[tokio::test]
    async fn test_set_peer_surfaces_unauthorized() {
        let (client, mut receiver) = create_mock_client::<PeerModule>(10);
        let peer_client = PeerModuleClient::new(client);
        let stranger = Address::from_index(9);

        let task = tokio::spawn(async move {
            peer_client
                .set_peer(
                    Address::from_index(0x103),
                    stranger,
                    ModuleName::WarehouseInventory,
                    Address::from_index(0x102),
                )
                .await
        });

        let (address, caller, call, responder) = expect_call(&mut receiver)
            .await
            .expect("Expected Call request");
        assert_eq!(address, Address::from_index(0x103));
        assert_eq!(caller, stranger);
        let PeerCall::SetPeer { peer, .. } = call;
        assert_eq!(peer, ModuleName::WarehouseInventory);
        responder
            .send(Err(HostError::Reverted(Box::new(PeerModuleError::PeerBook(
                PeerBookError::Unauthorized { caller: stranger },
            )))))
            .unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "unauthorized caller");
    }

    #[tokio::test]
    async fn test_kind_of_latest_deployment() {
        let (client, mut receiver) = create_mock_client::<PeerModule>(10);
        let peer_client = PeerModuleClient::new(client);
        let store = Address::from_index(0x104);

        let task = tokio::spawn(async move {
            match peer_client.deployed().await {
                Ok(Some(address)) => peer_client.kind(address).await.map(Some),
                other => other.map(|_| None),
            }
        });

        let responder = expect_deployed(&mut receiver)
            .await
            .expect("Expected Deployed request");
        responder.send(Ok(Some(store))).unwrap();

        let (address, query, responder) = expect_query(&mut receiver)
            .await
            .expect("Expected Query request");
        assert_eq!(address, store);
        assert!(matches!(query, PeerQuery::Kind));
        responder
            .send(Ok(PeerQueryResult::Kind(ModuleName::StoreInventory)))
            .unwrap();

        assert_eq!(task.await.unwrap(), Ok(Some(ModuleName::StoreInventory)));
    }

    #[tokio::test]
    async fn test_mismatched_query_result_is_rejected() {
        let (client, mut receiver) = create_mock_client::<PeerModule>(10);
        let peer_client = PeerModuleClient::new(client);

        let task =
            tokio::spawn(async move { peer_client.kind(Address::from_index(0x104)).await });

        let (_, _, responder) = expect_query(&mut receiver).await.unwrap();
        responder.send(Ok(PeerQueryResult::Peer(None))).unwrap();

        assert!(matches!(
            task.await.unwrap(),
            Err(PeerModuleError::HostCommunicationError(reason)) if reason.starts_with("unexpected response")
        ));
    }
}
