//! # Company Backend
//!
//! The six backend modules running on local [`module_host`] actors, plus the glue that lets
//! [`module_wiring`] wire them.
//!
//! The modules here are deliberately thin. Each one implements the address setters and getters
//! wiring needs and the authorization rules wiring must respect (owner-only setters, non-zero
//! addresses, board approval without self-approval, a one-time finance director), and nothing
//! of the inventory, order or treasury business logic.

pub mod adapters;
pub mod clients;
pub mod lifecycle;
pub mod model;
pub mod peer_actor;
pub mod role_actor;
pub mod treasury_actor;
