//! # Bootstrap Guard
//!
//! Sets the Treasury's privileged reference (the finance director) exactly once, and only for
//! a holder who already holds the role.
//!
//! Granting that role goes through the board, and the board refuses approvals from the proposer
//! itself. The guard therefore never grants roles and never approves anything: when the holder
//! lacks the role it reports [`BootstrapOutcome::BlockedByAuthorization`] and leaves the grant to
//! an independent approver. The next run picks up from there.
//!
//! Decision order:
//!
//! 1. `has_role(role, holder)` on the role module. Not held: blocked.
//! 2. Current reference on the target module. Already set: no-op.
//! 3. One call to the initializing setter.

use crate::address::{Address, RoleId};
use crate::module::ModuleName;
use crate::registry::ModuleRegistry;
use crate::report::BootstrapOutcome;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Where the privileged reference lives and who should hold it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapTarget {
    /// Module holding the reference.
    pub module: ModuleName,
    /// Module answering `has_role`.
    pub role_module: ModuleName,
    pub role: RoleId,
    pub holder: Address,
}

impl BootstrapTarget {
    /// Finance director on Treasury, checked against RoleManagement.
    pub fn finance_director(holder: Address) -> Self {
        Self {
            module: ModuleName::Treasury,
            role_module: ModuleName::RoleManagement,
            role: RoleId::finance_director(),
            holder,
        }
    }
}

pub struct BootstrapGuard<'a> {
    target: &'a BootstrapTarget,
    registry: &'a ModuleRegistry,
}

impl<'a> BootstrapGuard<'a> {
    pub fn new(target: &'a BootstrapTarget, registry: &'a ModuleRegistry) -> Self {
        Self { target, registry }
    }

    /// Never fails: every problem is folded into the returned outcome.
    pub async fn run(&self, operator: Address) -> BootstrapOutcome {
        let outcome = self.decide(operator).await;
        match &outcome {
            BootstrapOutcome::Initialized { holder } => {
                info!(%holder, role = %self.target.role, "Privileged reference initialized")
            }
            BootstrapOutcome::AlreadyInitialized { current } => {
                info!(%current, "Privileged reference already set, skipping")
            }
            BootstrapOutcome::BlockedByAuthorization { holder, role } => warn!(
                %holder,
                %role,
                "Holder lacks the role; an independent board member must grant it"
            ),
            BootstrapOutcome::Failed { reason } => error!(%reason, "Bootstrap failed"),
        }
        outcome
    }

    async fn decide(&self, operator: Address) -> BootstrapOutcome {
        let target = self.target;
        let holder = target.holder;

        let Some(roles) = self
            .registry
            .get(target.role_module)
            .and_then(|module| module.role_directory())
        else {
            return failed(format!("{} does not answer role queries", target.role_module));
        };

        match roles.has_role(&target.role, holder).await {
            Ok(true) => {}
            Ok(false) => {
                return BootstrapOutcome::BlockedByAuthorization {
                    holder,
                    role: target.role.clone(),
                }
            }
            Err(rejection) => return failed(format!("role query failed: {}", rejection)),
        }

        let Some(slot) = self
            .registry
            .get(target.module)
            .and_then(|module| module.privileged_slot())
        else {
            return failed(format!("{} has no privileged reference", target.module));
        };

        match slot.privileged_reference().await {
            Ok(Some(current)) if !current.is_zero() => {
                return BootstrapOutcome::AlreadyInitialized { current }
            }
            Ok(_) => {}
            Err(rejection) => return failed(format!("reference query failed: {}", rejection)),
        }

        match slot.set_initial_privileged_reference(operator, holder).await {
            Ok(()) => BootstrapOutcome::Initialized { holder },
            Err(rejection) => failed(format!("initialization rejected: {}", rejection)),
        }
    }
}

fn failed(reason: String) -> BootstrapOutcome {
    BootstrapOutcome::Failed { reason }
}
