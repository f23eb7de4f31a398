//! # Treasury Actor
//!
//! Hosts [`Treasury`](crate::model::Treasury). Depends on RoleManagement at runtime: before the
//! finance director is set, the Treasury asks RoleManagement whether the account actually holds
//! the finance director role.
//!
//! ```rust,ignore
//! let (role_actor, role_client) = role_actor::new(next_address());
//! let (treasury_actor, treasury_client) = treasury_actor::new(next_address());
//! tokio::spawn(role_actor.run(()));
//! tokio::spawn(treasury_actor.run(role_client.clone()));
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::TreasuryClient;
use crate::model::Treasury;
use module_host::ModuleHost;
use module_wiring::Address;

/// Creates a Treasury host and its client. Run it with a [`RoleClient`](crate::clients::RoleClient)
/// as context.
pub fn new(
    next_address: impl FnMut() -> Address + Send + 'static,
) -> (ModuleHost<Treasury>, TreasuryClient) {
    let (actor, generic_client) = ModuleHost::new(32, next_address);
    (actor, TreasuryClient::new(generic_client))
}
