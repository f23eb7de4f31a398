//! # Wiring Adapters
//!
//! Present the local module hosts through the capability traits of [`module_wiring::ports`],
//! so the orchestrator can drive them without knowing they are actors.

pub mod hosted;
pub mod resolver;

pub use hosted::{HostedModule, ModuleHandle};
pub use resolver::HostResolver;
