//! Fatal wiring errors. Any of these ends the run and is recorded in the report.

use crate::graph::{Edge, GraphViolation};
use crate::module::ModuleName;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum WiringError {
    /// A required module could not be resolved. Nothing was wired.
    #[error("module {module} is missing: {reason}")]
    MissingModule { module: ModuleName, reason: String },

    /// The plan failed its self-check. Nothing was queried or wired.
    #[error("invalid wiring plan: {0}")]
    GraphCycle(GraphViolation),

    /// A setter was rejected. Edges before `index` stay applied.
    #[error("edge #{index} {edge} failed: {reason}")]
    WiringCallFailed {
        index: usize,
        edge: Edge,
        reason: String,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<GraphViolation> for WiringError {
    fn from(violation: GraphViolation) -> Self {
        WiringError::GraphCycle(violation)
    }
}
