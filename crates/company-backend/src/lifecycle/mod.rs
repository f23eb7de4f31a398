//! # System Lifecycle
//!
//! Starts one host per module kind, deploys the modules the way the deployment scripts did, and
//! shuts the hosts down again.
//!
//! ## Late binding
//!
//! Hosts are created first and receive their dependencies in `run(context)`. Treasury is the
//! only host with a runtime dependency (it asks RoleManagement about roles); the four peer
//! hosts learn about each other purely through wiring.
//!
//! ## Shutdown
//!
//! Dropping every client closes the host mailboxes. Treasury's context holds a RoleManagement
//! client, so RoleManagement stops only after Treasury has. There is no cycle, so awaiting the
//! handles in any order terminates.

pub mod company_system;

pub use company_system::*;
