//! # Host Messages
//!
//! Messages exchanged between a [`HostClient`](crate::HostClient) and its
//! [`ModuleHost`](crate::ModuleHost).

use crate::entity::ModuleEntity;
use crate::error::HostError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by hosts.
pub type Response<T> = oneshot::Sender<Result<T, HostError>>;

/// Request sent to a module host.
///
/// - **Deploy**: instantiate a new module; responds with its address.
/// - **Deployed**: the address of the most recent deployment, if any.
/// - **Call**: a state-changing operation attributed to `caller`.
/// - **Query**: a read-only operation.
#[derive(Debug)]
pub enum HostRequest<T: ModuleEntity> {
    Deploy {
        deployer: T::Address,
        params: T::Deploy,
        respond_to: Response<T::Address>,
    },
    Deployed {
        respond_to: Response<Option<T::Address>>,
    },
    Call {
        address: T::Address,
        caller: T::Address,
        call: T::Call,
        respond_to: Response<T::CallResult>,
    },
    Query {
        address: T::Address,
        query: T::Query,
        respond_to: Response<T::QueryResult>,
    },
}
