//! # Capability Contracts
//!
//! The orchestrator never sees module internals. It resolves modules through a
//! [`ModuleResolver`] and talks to each one through the narrow capabilities below. A module
//! that has no role or privileged-slot surface simply keeps the default `None`.

use crate::address::{Address, RoleId};
use crate::module::ModuleName;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A call refused by a module, or a query that could not be answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{reason}")]
pub struct Rejection {
    pub reason: String,
}

impl Rejection {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Outcome of looking a module up.
pub enum Resolution {
    Found(Arc<dyn DeployedModule>),
    Missing { reason: String },
}

impl Resolution {
    pub fn missing(reason: impl Into<String>) -> Self {
        Self::Missing {
            reason: reason.into(),
        }
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(module) => f
                .debug_tuple("Found")
                .field(&module.name())
                .field(&module.address())
                .finish(),
            Self::Missing { reason } => f.debug_struct("Missing").field("reason", reason).finish(),
        }
    }
}

/// Finds the live deployment of a module.
///
/// Failures of the lookup itself are reported as [`Resolution::Missing`] with the failure as
/// the reason.
#[async_trait]
pub trait ModuleResolver: Send + Sync {
    async fn resolve(&self, name: ModuleName) -> Resolution;
}

/// A deployed module as the orchestrator sees it.
#[async_trait]
pub trait DeployedModule: Send + Sync {
    fn name(&self) -> ModuleName;

    fn address(&self) -> Address;

    /// Tells this module the address of `peer`, attributed to `operator`.
    async fn set_peer_address(
        &self,
        operator: Address,
        peer: ModuleName,
        address: Address,
    ) -> Result<(), Rejection>;

    fn role_directory(&self) -> Option<&dyn RoleDirectory> {
        None
    }

    fn privileged_slot(&self) -> Option<&dyn PrivilegedSlot> {
        None
    }
}

/// Answers role-grant facts.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    async fn has_role(&self, role: &RoleId, account: Address) -> Result<bool, Rejection>;
}

/// A one-time privileged reference held by a module.
#[async_trait]
pub trait PrivilegedSlot: Send + Sync {
    /// Current holder, `None` while unset.
    async fn privileged_reference(&self) -> Result<Option<Address>, Rejection>;

    async fn set_initial_privileged_reference(
        &self,
        operator: Address,
        account: Address,
    ) -> Result<(), Rejection>;
}
