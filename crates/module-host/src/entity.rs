//! # ModuleEntity Trait
//!
//! The contract every deployable module type implements so that a [`ModuleHost`](crate::ModuleHost)
//! can deploy it, route calls to it and answer queries about it.
//!
//! A module exposes two surfaces:
//!
//! - **Calls** mutate configuration and are always attributed to a `caller` address, so the module
//!   can enforce who is allowed to change it.
//! - **Queries** are read-only and take `&self`.
//!
//! Dependencies on other hosts are injected through [`ModuleEntity::Context`] when the host is
//! started, not when the module is deployed. Two modules may therefore reference each other's
//! host even though one of them has to be deployed first.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any deployable module must implement to be hosted by a `ModuleHost`.
#[async_trait]
pub trait ModuleEntity: Clone + Send + Sync + 'static {
    /// Address type shared by deployed modules and the accounts that call them.
    type Address: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Constructor arguments supplied at deployment.
    type Deploy: Send + Sync + Debug;

    /// State-changing operations (setters).
    type Call: Send + Sync + Debug;

    /// Result returned by a successful call.
    type CallResult: Send + Sync + Debug;

    /// Read-only operations (getters).
    type Query: Send + Sync + Debug;

    /// Result returned by a query.
    type QueryResult: Send + Sync + Debug;

    /// Handles to other hosts this module needs at runtime. Use `()` if none.
    type Context: Send + Sync;

    /// The module's rejection type. Its `Display` text is the revert reason callers see.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the module at `address`, deployed by `deployer`.
    fn from_deploy(
        address: Self::Address,
        deployer: Self::Address,
        params: Self::Deploy,
    ) -> Result<Self, Self::Error>;

    /// Runs after construction and before the module becomes reachable.
    async fn on_deploy(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a state-changing call made by `caller`.
    async fn handle_call(
        &mut self,
        caller: &Self::Address,
        call: Self::Call,
        ctx: &Self::Context,
    ) -> Result<Self::CallResult, Self::Error>;

    /// Answer a read-only query.
    async fn handle_query(
        &self,
        query: Self::Query,
        ctx: &Self::Context,
    ) -> Result<Self::QueryResult, Self::Error>;
}
