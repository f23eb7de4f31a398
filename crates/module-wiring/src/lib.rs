//! # Module Wiring
//!
//! Connects a set of independently deployed modules after deployment. Each module learns the
//! addresses of the peers it calls through owner-only setters, and the Treasury's finance
//! director slot is initialized once, only when the holder has already been granted the role.
//!
//! A run is strictly sequential:
//!
//! 1. **Plan** ([`WiringPlan`]) - the fixed edge table is checked against the deployment
//!    dependency graph before anything is touched.
//! 2. **Registry** ([`ModuleRegistry`]) - every required module is resolved; the first missing
//!    one aborts the run.
//! 3. **Sequencer** ([`WiringSequencer`]) - edges are applied one at a time, in table order; the
//!    first rejected setter aborts the run.
//! 4. **Bootstrap** ([`BootstrapGuard`]) - the privileged reference is initialized if, and only
//!    if, the holder already holds the role and the reference is still empty.
//!
//! The [`Orchestrator`] drives all four and returns a [`RunReport`].
//!
//! Modules are reached only through the traits in [`ports`], so the same orchestrator runs
//! against the local module host, a real deployment, or the test doubles in [`mock`].

pub mod address;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod graph;
pub mod mock;
pub mod module;
pub mod orchestrator;
pub mod ports;
pub mod registry;
pub mod report;
pub mod sequencer;

pub use address::{Address, AddressParseError, RoleId};
pub use bootstrap::{BootstrapGuard, BootstrapTarget};
pub use config::{BootstrapConfig, WiringConfig};
pub use error::WiringError;
pub use graph::{DeploymentGraph, Edge, GraphViolation, WiringPlan, CANONICAL_EDGES};
pub use module::{ModuleName, UnknownModuleName};
pub use orchestrator::Orchestrator;
pub use ports::{
    DeployedModule, ModuleResolver, PrivilegedSlot, Rejection, Resolution, RoleDirectory,
};
pub use registry::ModuleRegistry;
pub use report::{AppliedEdge, BootstrapOutcome, RunReport, SkipReason, SkippedEdge};
pub use sequencer::WiringSequencer;
