use async_trait::async_trait;
use module_host::mock::MockHost;
use module_host::{HostError, ModuleEntity, ModuleHost};

// --- Test Module ---

#[derive(Clone, Debug)]
struct Directory {
    owner: u32,
    peer: Option<u32>,
}

#[derive(Debug)]
struct DirectoryDeploy {
    initial_peer: Option<u32>,
}

#[derive(Debug)]
enum DirectoryCall {
    SetPeer(u32),
}

#[derive(Debug)]
enum DirectoryQuery {
    Owner,
    Peer,
}

#[derive(Debug, thiserror::Error)]
enum DirectoryError {
    #[error("unauthorized caller")]
    Unauthorized,
    #[error("zero address")]
    ZeroAddress,
}

#[async_trait]
impl ModuleEntity for Directory {
    type Address = u32;
    type Deploy = DirectoryDeploy;
    type Call = DirectoryCall;
    type CallResult = bool;
    type Query = DirectoryQuery;
    type QueryResult = Option<u32>;
    type Context = ();
    type Error = DirectoryError;

    fn from_deploy(
        _address: u32,
        deployer: u32,
        params: DirectoryDeploy,
    ) -> Result<Self, DirectoryError> {
        if params.initial_peer == Some(0) {
            return Err(DirectoryError::ZeroAddress);
        }
        Ok(Self {
            owner: deployer,
            peer: params.initial_peer,
        })
    }

    async fn handle_call(
        &mut self,
        caller: &u32,
        call: DirectoryCall,
        _: &(),
    ) -> Result<bool, DirectoryError> {
        if *caller != self.owner {
            return Err(DirectoryError::Unauthorized);
        }
        match call {
            DirectoryCall::SetPeer(0) => Err(DirectoryError::ZeroAddress),
            DirectoryCall::SetPeer(peer) => {
                let changed = self.peer != Some(peer);
                self.peer = Some(peer);
                Ok(changed)
            }
        }
    }

    async fn handle_query(
        &self,
        query: DirectoryQuery,
        _: &(),
    ) -> Result<Option<u32>, DirectoryError> {
        Ok(match query {
            DirectoryQuery::Owner => Some(self.owner),
            DirectoryQuery::Peer => self.peer,
        })
    }
}

fn start_host() -> module_host::HostClient<Directory> {
    let mut next = 1000;
    let (host, client) = ModuleHost::<Directory>::new(10, move || {
        next += 1;
        next
    });
    tokio::spawn(host.run(()));
    client
}

#[tokio::test]
async fn test_deploy_assigns_distinct_addresses() {
    let client = start_host();

    let first = client
        .deploy(1, DirectoryDeploy { initial_peer: None })
        .await
        .unwrap();
    let second = client
        .deploy(2, DirectoryDeploy { initial_peer: None })
        .await
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(
        client.query(first, DirectoryQuery::Owner).await.unwrap(),
        Some(1)
    );
    assert_eq!(
        client.query(second, DirectoryQuery::Owner).await.unwrap(),
        Some(2)
    );
}

#[tokio::test]
async fn test_deployed_reports_latest() {
    let client = start_host();
    assert_eq!(client.deployed().await.unwrap(), None);

    let _first = client
        .deploy(1, DirectoryDeploy { initial_peer: None })
        .await
        .unwrap();
    let second = client
        .deploy(1, DirectoryDeploy { initial_peer: None })
        .await
        .unwrap();

    assert_eq!(client.deployed().await.unwrap(), Some(second));
}

#[tokio::test]
async fn test_failed_deploy_is_not_recorded() {
    let client = start_host();

    let result = client
        .deploy(1, DirectoryDeploy { initial_peer: Some(0) })
        .await;

    assert!(matches!(result, Err(HostError::Reverted(_))));
    assert_eq!(client.deployed().await.unwrap(), None);
}

#[tokio::test]
async fn test_owner_call_and_overwrite() {
    let client = start_host();
    let address = client
        .deploy(7, DirectoryDeploy { initial_peer: None })
        .await
        .unwrap();

    assert!(client
        .call(address, 7, DirectoryCall::SetPeer(42))
        .await
        .unwrap());
    // Same value again is accepted and reports no change
    assert!(!client
        .call(address, 7, DirectoryCall::SetPeer(42))
        .await
        .unwrap());

    assert_eq!(
        client.query(address, DirectoryQuery::Peer).await.unwrap(),
        Some(42)
    );
}

#[tokio::test]
async fn test_revert_carries_module_reason() {
    let client = start_host();
    let address = client
        .deploy(7, DirectoryDeploy { initial_peer: None })
        .await
        .unwrap();

    let err = client
        .call(address, 8, DirectoryCall::SetPeer(42))
        .await
        .unwrap_err();
    assert!(matches!(err, HostError::Reverted(_)));
    assert_eq!(err.reason(), "unauthorized caller");
    assert_eq!(err.to_string(), "Call reverted: unauthorized caller");

    // Rejected call leaves state untouched
    assert_eq!(
        client.query(address, DirectoryQuery::Peer).await.unwrap(),
        None
    );
}

#[tokio::test]
async fn test_unknown_address() {
    let client = start_host();

    let err = client
        .call(5, 1, DirectoryCall::SetPeer(42))
        .await
        .unwrap_err();
    assert!(matches!(err, HostError::NotDeployed(ref a) if a == "5"));

    let err = client.query(5, DirectoryQuery::Peer).await.unwrap_err();
    assert_eq!(err.reason(), "No module deployed at 5");
}

#[tokio::test]
async fn test_closed_host() {
    let mut next = 0;
    let (host, client) = ModuleHost::<Directory>::new(1, move || {
        next += 1;
        next
    });
    drop(host);

    let err = client.deployed().await.unwrap_err();
    assert!(matches!(err, HostError::HostClosed));
}

#[derive(Debug, thiserror::Error)]
enum WrapperError {
    #[error("host: {0}")]
    Host(String),
}

#[tokio::test]
async fn test_into_module_error_recovers_type() {
    let client = start_host();
    let address = client
        .deploy(7, DirectoryDeploy { initial_peer: None })
        .await
        .unwrap();

    let err = client
        .call(address, 7, DirectoryCall::SetPeer(0))
        .await
        .unwrap_err()
        .into_module_error(|_| DirectoryError::Unauthorized);
    assert!(matches!(err, DirectoryError::ZeroAddress));

    let err = client
        .call(address, 8, DirectoryCall::SetPeer(1))
        .await
        .unwrap_err()
        .into_module_error(WrapperError::Host);
    // A DirectoryError is not a WrapperError, so the text is kept instead
    assert!(matches!(err, WrapperError::Host(ref msg) if msg == "unauthorized caller"));

    let err = client
        .query(99, DirectoryQuery::Peer)
        .await
        .unwrap_err()
        .into_module_error(WrapperError::Host);
    assert!(matches!(err, WrapperError::Host(ref msg) if msg == "No module deployed at 99"));
}

#[tokio::test]
async fn test_mock_host_answers_in_registration_order() {
    let mut mock = MockHost::<Directory>::new();
    mock.expect_deploy().return_ok(11);
    mock.expect_deployed().return_ok(Some(11));
    mock.expect_call(11).return_ok(true);
    mock.expect_query(11).return_ok(Some(42));
    let client = mock.client();

    let address = client
        .deploy(7, DirectoryDeploy { initial_peer: None })
        .await
        .unwrap();
    assert_eq!(address, 11);
    assert_eq!(client.deployed().await.unwrap(), Some(11));
    assert!(client
        .call(address, 7, DirectoryCall::SetPeer(42))
        .await
        .unwrap());
    assert_eq!(
        client.query(address, DirectoryQuery::Peer).await.unwrap(),
        Some(42)
    );

    mock.verify();
}

#[tokio::test]
async fn test_mock_host_scripted_error() {
    let mut mock = MockHost::<Directory>::new();
    mock.expect_call(11).return_err(HostError::NotDeployed("11".to_string()));

    let err = mock
        .client()
        .call(11, 7, DirectoryCall::SetPeer(42))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "No module deployed at 11");
    mock.verify();
}

#[tokio::test]
async fn test_mock_host_rejects_wrong_address() {
    let mut mock = MockHost::<Directory>::new();
    mock.expect_query(11).return_ok(None);

    let err = mock
        .client()
        .query(12, DirectoryQuery::Owner)
        .await
        .unwrap_err();

    assert!(matches!(err, HostError::HostDropped));
}
