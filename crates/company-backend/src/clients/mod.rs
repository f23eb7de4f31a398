//! Typed clients for the module hosts.

pub mod peer_client;
pub mod role_client;
pub mod treasury_client;

pub use peer_client::PeerModuleClient;
pub use role_client::RoleClient;
pub use treasury_client::TreasuryClient;
