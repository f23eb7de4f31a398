//! # RoleManagement Actor
//!
//! Hosts [`RoleManagement`](crate::model::RoleManagement): role grants, the approving board and
//! the Treasury address it needs to authorize treasury-originated role activation.
//!
//! ## Board grants
//!
//! A role is granted by a *proposer* on the board together with one or more *approvers*, also on
//! the board. The proposer can never count as one of its own approvers, so no single account can
//! elevate anyone on its own.
//!
//! ```rust
//! use company_backend::role_actor;
//! use module_wiring::{Address, RoleId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut next = 0x100;
//!     let (actor, client) = role_actor::new(move || {
//!         next += 1;
//!         Address::from_index(next)
//!     });
//!     tokio::spawn(actor.run(()));
//!
//!     let deployer = Address::from_index(1);
//!     let rm = client.deploy(deployer).await?;
//!     let role = RoleId::finance_director();
//!
//!     // Self-approval is refused
//!     let refused = client
//!         .grant_role_by_board(rm, deployer, role.clone(), Address::from_index(2), vec![deployer])
//!         .await;
//!     assert!(refused.is_err());
//!     assert!(!client.has_role(rm, role, Address::from_index(2)).await?);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::RoleClient;
use crate::model::RoleManagement;
use module_host::ModuleHost;
use module_wiring::Address;

/// Creates a RoleManagement host and its client.
pub fn new(
    next_address: impl FnMut() -> Address + Send + 'static,
) -> (ModuleHost<RoleManagement>, RoleClient) {
    let (actor, generic_client) = ModuleHost::new(32, next_address);
    (actor, RoleClient::new(generic_client))
}
