//! # Run Report
//!
//! Everything a run did, in a form that can be printed for an operator or serialized to JSON.

use crate::address::{Address, RoleId};
use crate::error::WiringError;
use crate::graph::Edge;
use serde::Serialize;
use std::fmt::Write;

/// An edge whose setter was accepted. `index` is 1-based, as in the edge table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedEdge {
    pub index: usize,
    pub edge: Edge,
    pub address: Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The plan failed its self-check.
    InvalidPlan,
    /// A required module could not be resolved.
    RegistryIncomplete,
    /// The sequencer stopped at edge `index`.
    EarlierEdgeFailed { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEdge {
    pub index: usize,
    pub edge: Edge,
    pub reason: SkipReason,
}

/// Result of the privileged-reference bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BootstrapOutcome {
    Initialized { holder: Address },
    AlreadyInitialized { current: Address },
    /// The holder lacks the role. Only an independent approver can fix this.
    BlockedByAuthorization { holder: Address, role: RoleId },
    Failed { reason: String },
}

impl BootstrapOutcome {
    /// What the operator should read.
    pub fn describe(&self) -> String {
        match self {
            Self::Initialized { holder } => format!("initialized with {}", holder),
            Self::AlreadyInitialized { current } => {
                format!("already initialized with {}, left unchanged", current)
            }
            Self::BlockedByAuthorization { holder, role } => format!(
                "blocked: {} does not hold {}. A board member other than the proposer must \
                 grant the role before the reference can be set",
                holder, role
            ),
            Self::Failed { reason } => format!("failed: {}", reason),
        }
    }
}

/// Record of one wiring run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub operator: Address,
    pub applied: Vec<AppliedEdge>,
    pub skipped: Vec<SkippedEdge>,
    pub bootstrap: Option<BootstrapOutcome>,
    pub fatal: Option<WiringError>,
}

impl RunReport {
    pub fn new(operator: Address) -> Self {
        Self {
            operator,
            applied: Vec::new(),
            skipped: Vec::new(),
            bootstrap: None,
            fatal: None,
        }
    }

    /// True when the plan was valid, every module resolved and every edge applied.
    /// The bootstrap outcome does not count.
    pub fn succeeded(&self) -> bool {
        self.fatal.is_none() && self.skipped.is_empty()
    }

    /// Marks `edges` (1-based from `first_index`) as skipped.
    pub fn skip_from(&mut self, edges: &[Edge], first_index: usize, reason: SkipReason) {
        self.skipped.extend(edges.iter().enumerate().map(|(i, edge)| SkippedEdge {
            index: first_index + i,
            edge: *edge,
            reason,
        }));
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn summary(&self) -> String {
        let mut out = String::new();
        let status = if self.succeeded() { "OK" } else { "FAILED" };
        let _ = writeln!(out, "Wiring run by {}: {}", self.operator, status);
        let _ = writeln!(
            out,
            "  applied: {}, skipped: {}",
            self.applied.len(),
            self.skipped.len()
        );
        for applied in &self.applied {
            let _ = writeln!(
                out,
                "  [{:>2}] applied  {} = {}",
                applied.index, applied.edge, applied.address
            );
        }
        for skipped in &self.skipped {
            let reason = match skipped.reason {
                SkipReason::InvalidPlan => "invalid plan".to_string(),
                SkipReason::RegistryIncomplete => "registry incomplete".to_string(),
                SkipReason::EarlierEdgeFailed { index } => format!("edge #{} failed", index),
            };
            let _ = writeln!(
                out,
                "  [{:>2}] skipped  {} ({})",
                skipped.index, skipped.edge, reason
            );
        }
        if let Some(bootstrap) = &self.bootstrap {
            let _ = writeln!(out, "  bootstrap: {}", bootstrap.describe());
        }
        if let Some(fatal) = &self.fatal {
            let _ = writeln!(out, "  error: {}", fatal);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CANONICAL_EDGES;
    use crate::module::ModuleName;

    #[test]
    fn test_succeeded_requires_no_fatal_and_no_skips() {
        let mut report = RunReport::new(Address::from_index(1));
        assert!(report.succeeded());

        report.bootstrap = Some(BootstrapOutcome::Failed {
            reason: "unreachable".to_string(),
        });
        assert!(report.succeeded());

        report.skip_from(&CANONICAL_EDGES[4..], 5, SkipReason::EarlierEdgeFailed { index: 4 });
        assert!(!report.succeeded());
        assert_eq!(report.skipped.len(), 7);
        assert_eq!(report.skipped[0].index, 5);
        assert_eq!(report.skipped[6].index, 11);
    }

    #[test]
    fn test_json_shape() {
        let mut report = RunReport::new(Address::from_index(1));
        report.skip_from(&CANONICAL_EDGES[..1], 1, SkipReason::RegistryIncomplete);
        report.fatal = Some(WiringError::MissingModule {
            module: ModuleName::Treasury,
            reason: "not deployed".to_string(),
        });

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["skipped"][0]["reason"]["kind"], "registry_incomplete");
        assert_eq!(value["skipped"][0]["edge"]["setter"], "set_treasury_address");
        assert_eq!(value["fatal"]["MissingModule"]["module"], "Treasury");
        assert!(value["bootstrap"].is_null());
    }

    #[test]
    fn test_summary_mentions_independent_approver() {
        let mut report = RunReport::new(Address::from_index(1));
        report.bootstrap = Some(BootstrapOutcome::BlockedByAuthorization {
            holder: Address::from_index(2),
            role: RoleId::default(),
        });
        let summary = report.summary();
        assert!(summary.contains("FINANCE_DIRECTOR_ROLE"));
        assert!(summary.contains("other than the proposer"));
    }
}
