//! # Module Host
//!
//! An in-process stand-in for the network the company backend's modules are deployed to. Each
//! module *kind* (Treasury, RoleManagement, ...) gets one [`ModuleHost`] actor running in its own
//! Tokio task. The host owns every deployed instance of that kind and processes requests strictly
//! one at a time, which gives every module a linearized view of its own configuration.
//!
//! ## Layers
//!
//! 1. **Module layer** ([`ModuleEntity`]) - the module's rules: who may call which setter, what a
//!    query returns.
//! 2. **Runtime layer** ([`ModuleHost`]) - mailbox, address allocation, dispatch, logging.
//! 3. **Interface layer** ([`HostClient`], [`ModuleClient`]) - typed, cloneable handles.
//!
//! ## Calls and queries
//!
//! Every state-changing call carries the caller's address, the way a transaction carries its
//! sender. Queries are read-only and take `&self`. A module rejects a call by returning its own
//! error, which reaches the client as [`HostError::Reverted`].
//!
//! ```rust
//! use async_trait::async_trait;
//! use module_host::{ModuleEntity, ModuleHost};
//!
//! #[derive(Clone, Debug)]
//! struct Registrar {
//!     owner: u32,
//!     peer: Option<u32>,
//! }
//!
//! #[derive(Debug)]
//! struct RegistrarDeploy;
//! #[derive(Debug)]
//! enum RegistrarCall {
//!     SetPeer(u32),
//! }
//! #[derive(Debug)]
//! enum RegistrarQuery {
//!     Peer,
//! }
//! #[derive(Debug, thiserror::Error)]
//! #[error("unauthorized caller")]
//! struct Unauthorized;
//!
//! #[async_trait]
//! impl ModuleEntity for Registrar {
//!     type Address = u32;
//!     type Deploy = RegistrarDeploy;
//!     type Call = RegistrarCall;
//!     type CallResult = ();
//!     type Query = RegistrarQuery;
//!     type QueryResult = Option<u32>;
//!     type Context = ();
//!     type Error = Unauthorized;
//!
//!     fn from_deploy(_: u32, deployer: u32, _: RegistrarDeploy) -> Result<Self, Unauthorized> {
//!         Ok(Self { owner: deployer, peer: None })
//!     }
//!
//!     async fn handle_call(
//!         &mut self,
//!         caller: &u32,
//!         call: RegistrarCall,
//!         _: &(),
//!     ) -> Result<(), Unauthorized> {
//!         if *caller != self.owner {
//!             return Err(Unauthorized);
//!         }
//!         match call {
//!             RegistrarCall::SetPeer(peer) => self.peer = Some(peer),
//!         }
//!         Ok(())
//!     }
//!
//!     async fn handle_query(&self, _: RegistrarQuery, _: &()) -> Result<Option<u32>, Unauthorized> {
//!         Ok(self.peer)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut next = 100;
//!     let (host, client) = ModuleHost::<Registrar>::new(8, move || {
//!         next += 1;
//!         next
//!     });
//!     tokio::spawn(host.run(()));
//!
//!     let address = client.deploy(1, RegistrarDeploy).await.unwrap();
//!     client.call(address, 1, RegistrarCall::SetPeer(7)).await.unwrap();
//!     assert!(client.call(address, 2, RegistrarCall::SetPeer(8)).await.is_err());
//!     assert_eq!(client.query(address, RegistrarQuery::Peer).await.unwrap(), Some(7));
//! }
//! ```
//!
//! ## Context injection
//!
//! Hosts receive their dependencies in `run(context)`, after every host has been created. A
//! Treasury host can hold the RoleManagement client and consult it while handling a call, even
//! though both hosts are started independently.
//!
//! ## Testing
//!
//! [`mock::MockHost`] answers client requests from scripted expectations. See the [`mock`]
//! module for the helpers.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ModuleHost;
pub use client::HostClient;
pub use client_trait::ModuleClient;
pub use entity::ModuleEntity;
pub use error::HostError;
pub use message::{HostRequest, Response};
