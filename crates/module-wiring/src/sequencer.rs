//! # Wiring Sequencer
//!
//! Applies a checked plan's edges one at a time. Each setter is awaited before the next one is
//! issued, and the first rejection ends the sequence: the edges before it stay applied, the
//! edges after it are never attempted. A later run re-applies everything, which is safe because
//! peer setters overwrite.

use crate::address::Address;
use crate::error::WiringError;
use crate::graph::WiringPlan;
use crate::module::ModuleName;
use crate::registry::ModuleRegistry;
use crate::report::{AppliedEdge, RunReport, SkipReason};
use tracing::{error, info, info_span, Instrument};

pub struct WiringSequencer<'a> {
    plan: &'a WiringPlan,
    registry: &'a ModuleRegistry,
}

impl<'a> WiringSequencer<'a> {
    pub fn new(plan: &'a WiringPlan, registry: &'a ModuleRegistry) -> Self {
        Self { plan, registry }
    }

    /// Applies every edge in order, recording applied and skipped edges into `report`.
    ///
    /// # Errors
    ///
    /// [`WiringError::WiringCallFailed`] for the first rejected setter.
    pub async fn apply(&self, operator: Address, report: &mut RunReport) -> Result<(), WiringError> {
        let edges = self.plan.edges();

        for (position, edge) in edges.iter().enumerate() {
            let index = position + 1;

            let (source, address) = match (
                self.registry.get(edge.source),
                self.registry.address(edge.target),
            ) {
                (Some(source), Some(address)) => (source, address),
                (None, _) => {
                    return Err(self.abort(report, index, edge.source, "source not resolved"));
                }
                (_, None) => {
                    return Err(self.abort(report, index, edge.target, "target not resolved"));
                }
            };

            let call = source
                .set_peer_address(operator, edge.target, address)
                .instrument(info_span!("apply_edge", index, edge = %edge));
            match call.await {
                Ok(()) => {
                    info!(index, edge = %edge, %address, "Edge applied");
                    report.applied.push(AppliedEdge {
                        index,
                        edge: *edge,
                        address,
                    });
                }
                Err(rejection) => {
                    error!(index, edge = %edge, reason = %rejection, "Edge rejected, stopping");
                    report.skip_from(
                        &edges[index..],
                        index + 1,
                        SkipReason::EarlierEdgeFailed { index },
                    );
                    return Err(WiringError::WiringCallFailed {
                        index,
                        edge: *edge,
                        reason: rejection.reason,
                    });
                }
            }
        }

        info!(applied = edges.len(), "All edges applied");
        Ok(())
    }

    fn abort(
        &self,
        report: &mut RunReport,
        index: usize,
        module: ModuleName,
        reason: &str,
    ) -> WiringError {
        error!(index, %module, reason, "Edge endpoint missing from registry");
        report.skip_from(
            &self.plan.edges()[index - 1..],
            index,
            SkipReason::RegistryIncomplete,
        );
        WiringError::MissingModule {
            module,
            reason: reason.to_string(),
        }
    }
}
