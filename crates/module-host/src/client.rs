//! # Host Client
//!
//! The cloneable interface to a [`ModuleHost`](crate::ModuleHost).

use crate::entity::ModuleEntity;
use crate::error::HostError;
use crate::message::HostRequest;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for a `ModuleHost`. Holds only a sender, so cloning is cheap.
#[derive(Clone)]
pub struct HostClient<T: ModuleEntity> {
    sender: mpsc::Sender<HostRequest<T>>,
}

impl<T: ModuleEntity> HostClient<T> {
    pub fn new(sender: mpsc::Sender<HostRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn deploy(
        &self,
        deployer: T::Address,
        params: T::Deploy,
    ) -> Result<T::Address, HostError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(HostRequest::Deploy {
                deployer,
                params,
                respond_to,
            })
            .await
            .map_err(|_| HostError::HostClosed)?;
        response.await.map_err(|_| HostError::HostDropped)?
    }

    /// Address of the most recent deployment, `None` if nothing has been deployed yet.
    pub async fn deployed(&self) -> Result<Option<T::Address>, HostError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(HostRequest::Deployed { respond_to })
            .await
            .map_err(|_| HostError::HostClosed)?;
        response.await.map_err(|_| HostError::HostDropped)?
    }

    pub async fn call(
        &self,
        address: T::Address,
        caller: T::Address,
        call: T::Call,
    ) -> Result<T::CallResult, HostError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(HostRequest::Call {
                address,
                caller,
                call,
                respond_to,
            })
            .await
            .map_err(|_| HostError::HostClosed)?;
        response.await.map_err(|_| HostError::HostDropped)?
    }

    pub async fn query(
        &self,
        address: T::Address,
        query: T::Query,
    ) -> Result<T::QueryResult, HostError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(HostRequest::Query {
                address,
                query,
                respond_to,
            })
            .await
            .map_err(|_| HostError::HostClosed)?;
        response.await.map_err(|_| HostError::HostDropped)?
    }
}
