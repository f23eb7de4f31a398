//! # Orchestrator
//!
//! Runs plan check, registry, sequencer and bootstrap guard in that order, each to completion
//! before the next begins. A fatal error at any stage stops the run and lands in the report;
//! no stage is retried and nothing runs in the background.

use crate::address::Address;
use crate::bootstrap::{BootstrapGuard, BootstrapTarget};
use crate::config::WiringConfig;
use crate::error::WiringError;
use crate::graph::{DeploymentGraph, Edge, WiringPlan, CANONICAL_EDGES};
use crate::module::ModuleName;
use crate::ports::ModuleResolver;
use crate::registry::ModuleRegistry;
use crate::report::{RunReport, SkipReason};
use crate::sequencer::WiringSequencer;
use std::sync::Arc;
use tracing::{error, info, instrument};

pub struct Orchestrator {
    resolver: Arc<dyn ModuleResolver>,
    modules: Vec<ModuleName>,
    edges: Vec<Edge>,
    graph: DeploymentGraph,
    bootstrap: Option<BootstrapTarget>,
}

impl Orchestrator {
    /// All six modules, the canonical edges, no bootstrap.
    pub fn new(resolver: Arc<dyn ModuleResolver>) -> Self {
        Self {
            resolver,
            modules: ModuleName::ALL.to_vec(),
            edges: CANONICAL_EDGES.to_vec(),
            graph: DeploymentGraph::canonical(),
            bootstrap: None,
        }
    }

    /// Modules and bootstrap target taken from a validated configuration. Only the canonical
    /// edges joining two configured modules are kept.
    pub fn from_config(
        resolver: Arc<dyn ModuleResolver>,
        config: &WiringConfig,
    ) -> Result<Self, WiringError> {
        config.validate()?;
        let edges = CANONICAL_EDGES
            .iter()
            .filter(|edge| {
                config.modules.contains(&edge.source) && config.modules.contains(&edge.target)
            })
            .copied()
            .collect();
        let mut orchestrator = Self::new(resolver)
            .with_modules(config.modules.clone())
            .with_edges(edges);
        orchestrator.bootstrap = config.bootstrap_target();
        Ok(orchestrator)
    }

    pub fn with_modules(mut self, modules: Vec<ModuleName>) -> Self {
        self.modules = modules;
        self
    }

    pub fn with_edges(mut self, edges: Vec<Edge>) -> Self {
        self.edges = edges;
        self
    }

    pub fn with_graph(mut self, graph: DeploymentGraph) -> Self {
        self.graph = graph;
        self
    }

    pub fn with_bootstrap(mut self, target: BootstrapTarget) -> Self {
        self.bootstrap = Some(target);
        self
    }

    /// One wiring run attributed to `operator`.
    #[instrument(name = "run_wiring", skip(self))]
    pub async fn run(&self, operator: Address) -> RunReport {
        let mut report = RunReport::new(operator);
        info!(
            %operator,
            modules = self.modules.len(),
            edges = self.edges.len(),
            "Wiring run started"
        );

        let plan = match WiringPlan::with_graph(
            self.modules.clone(),
            self.edges.clone(),
            &self.graph,
        ) {
            Ok(plan) => plan,
            Err(violation) => {
                error!(error = %violation, "Plan self-check failed");
                report.skip_from(&self.edges, 1, SkipReason::InvalidPlan);
                report.fatal = Some(WiringError::GraphCycle(violation));
                return report;
            }
        };

        let registry =
            match ModuleRegistry::resolve_all(self.resolver.as_ref(), plan.modules()).await {
                Ok(registry) => registry,
                Err(e) => {
                    report.skip_from(plan.edges(), 1, SkipReason::RegistryIncomplete);
                    report.fatal = Some(e);
                    return report;
                }
            };

        if let Err(e) = WiringSequencer::new(&plan, &registry)
            .apply(operator, &mut report)
            .await
        {
            report.fatal = Some(e);
            return report;
        }

        if let Some(target) = &self.bootstrap {
            let outcome = BootstrapGuard::new(target, &registry).run(operator).await;
            report.bootstrap = Some(outcome);
        }

        info!(
            applied = report.applied.len(),
            succeeded = report.succeeded(),
            "Wiring run finished"
        );
        report
    }
}
