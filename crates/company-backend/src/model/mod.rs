//! Module state. The `ModuleEntity` implementations live next to each actor.

pub mod peer_book;
pub mod peer_module;
pub mod role_management;
pub mod treasury;

pub use peer_book::*;
pub use peer_module::*;
pub use role_management::*;
pub use treasury::*;
