//! # Wiring Plan
//!
//! The edge table and the deployment dependency graph it is ordered by.
//!
//! Setter edges are allowed to point both ways (WarehouseInventory and StoreInventory each hold
//! the other's address): a setter only records an address, so the pair can be wired in any
//! order once both exist. What must be acyclic is the *deployment* graph, built from each
//! module's constructor dependencies. [`WiringPlan::new`] checks the edge table against it
//! before a single module is queried.

use crate::module::ModuleName;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

/// A directed wiring requirement: `source` must be told `target`'s address through `setter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub source: ModuleName,
    pub target: ModuleName,
    pub setter: &'static str,
    pub purpose: &'static str,
}

impl Edge {
    pub const fn new(source: ModuleName, target: ModuleName, purpose: &'static str) -> Self {
        Self {
            source,
            target,
            setter: target.setter_name(),
            purpose,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}({})", self.source, self.setter, self.target)
    }
}

use ModuleName::*;

/// Every edge the backend needs, grouped by source module in deployment-dependency order.
pub const CANONICAL_EDGES: [Edge; 11] = [
    Edge::new(
        RoleManagement,
        Treasury,
        "authorize treasury-only calls into role activation",
    ),
    Edge::new(Treasury, SupplierOrders, "authorize escrow/refund calls"),
    Edge::new(Treasury, CustomerOrders, "authorize escrow/refund calls"),
    Edge::new(
        SupplierOrders,
        WarehouseInventory,
        "authorize stock-increase calls",
    ),
    Edge::new(
        WarehouseInventory,
        StoreInventory,
        "authorize store restock calls",
    ),
    Edge::new(
        WarehouseInventory,
        SupplierOrders,
        "authorize supplier-order stock queries",
    ),
    Edge::new(
        WarehouseInventory,
        CustomerOrders,
        "authorize return-to-warehouse calls",
    ),
    Edge::new(
        StoreInventory,
        WarehouseInventory,
        "authorize store restock requests",
    ),
    Edge::new(
        StoreInventory,
        CustomerOrders,
        "authorize store-fulfilled order calls",
    ),
    Edge::new(
        CustomerOrders,
        StoreInventory,
        "authorize order fulfillment deduction",
    ),
    Edge::new(
        CustomerOrders,
        WarehouseInventory,
        "authorize return processing",
    ),
];

/// Why a plan was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum GraphViolation {
    #[error("deployment dependencies form a cycle through {modules:?}")]
    Cycle { modules: Vec<ModuleName> },
    #[error("{module} is listed more than once")]
    DuplicateModule { module: ModuleName },
    #[error("{module} is ordered before its dependency {dependency}")]
    OutOfOrder {
        module: ModuleName,
        dependency: ModuleName,
    },
    #[error("edge endpoint {module} is not a required module")]
    UnknownModule { module: ModuleName },
    #[error("{module} is wired to itself")]
    SelfEdge { module: ModuleName },
    #[error("edge {from} -> {to} appears more than once")]
    DuplicateEdge { from: ModuleName, to: ModuleName },
    #[error("edges from {module} are not contiguous")]
    ScatteredSource { module: ModuleName },
}

/// Constructor dependencies per module. Edges point from a module to the modules it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentGraph {
    dependencies: HashMap<ModuleName, Vec<ModuleName>>,
}

impl DeploymentGraph {
    pub fn new(dependencies: HashMap<ModuleName, Vec<ModuleName>>) -> Self {
        Self { dependencies }
    }

    /// The graph given by [`ModuleName::constructor_dependencies`].
    pub fn canonical() -> Self {
        let dependencies = ModuleName::ALL
            .into_iter()
            .map(|m| (m, m.constructor_dependencies().to_vec()))
            .collect();
        Self { dependencies }
    }

    pub fn dependencies_of(&self, module: ModuleName) -> &[ModuleName] {
        self.dependencies
            .get(&module)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Kahn's algorithm over `modules`, ignoring dependencies outside the set.
    ///
    /// Returns a topological order, or the modules left over when no zero in-degree node
    /// remains. Ties go to the module requested first, so a request that is already in
    /// dependency order comes back unchanged.
    pub fn topological_order(
        &self,
        modules: &[ModuleName],
    ) -> Result<Vec<ModuleName>, GraphViolation> {
        let members: HashSet<ModuleName> = modules.iter().copied().collect();
        let mut in_degree: HashMap<ModuleName, usize> = HashMap::new();
        let mut dependents: HashMap<ModuleName, Vec<ModuleName>> = HashMap::new();

        for &module in modules {
            let deps: Vec<ModuleName> = self
                .dependencies_of(module)
                .iter()
                .copied()
                .filter(|d| members.contains(d))
                .collect();
            in_degree.insert(module, deps.len());
            for dep in deps {
                dependents.entry(dep).or_default().push(module);
            }
        }

        // Ready modules keyed by request position; the earliest one always goes next
        let position: HashMap<ModuleName, usize> =
            modules.iter().enumerate().map(|(i, &m)| (m, i)).collect();
        let mut ready: BTreeSet<usize> = modules
            .iter()
            .enumerate()
            .filter(|(_, m)| in_degree.get(*m) == Some(&0))
            .map(|(i, _)| i)
            .collect();

        let mut order = Vec::with_capacity(modules.len());
        while let Some(next) = ready.pop_first() {
            let module = modules[next];
            order.push(module);
            for &dependent in dependents.get(&module).map(Vec::as_slice).unwrap_or(&[]) {
                if let Some(degree) = in_degree.get_mut(&dependent) {
                    *degree -= 1;
                    if *degree == 0 {
                        if let Some(&i) = position.get(&dependent) {
                            ready.insert(i);
                        }
                    }
                }
            }
        }

        if order.len() < modules.len() {
            let modules = modules
                .iter()
                .copied()
                .filter(|m| !order.contains(m))
                .collect();
            return Err(GraphViolation::Cycle { modules });
        }
        Ok(order)
    }

    /// First module in `sequence` that appears before one of its in-sequence dependencies.
    fn first_out_of_order(&self, sequence: &[ModuleName]) -> Option<GraphViolation> {
        for (i, &module) in sequence.iter().enumerate() {
            for &dependency in self.dependencies_of(module) {
                if sequence[i + 1..].contains(&dependency) {
                    return Some(GraphViolation::OutOfOrder { module, dependency });
                }
            }
        }
        None
    }
}

impl Default for DeploymentGraph {
    fn default() -> Self {
        Self::canonical()
    }
}

/// A checked wiring plan: the modules to resolve and the edges to apply, both in execution order.
#[derive(Debug, Clone)]
pub struct WiringPlan {
    modules: Vec<ModuleName>,
    edges: Vec<Edge>,
}

impl WiringPlan {
    /// All six modules and the canonical edge table.
    pub fn canonical() -> Result<Self, GraphViolation> {
        Self::new(ModuleName::ALL.to_vec(), CANONICAL_EDGES.to_vec())
    }

    pub fn new(modules: Vec<ModuleName>, edges: Vec<Edge>) -> Result<Self, GraphViolation> {
        Self::with_graph(modules, edges, &DeploymentGraph::canonical())
    }

    /// Checks, in order:
    ///
    /// - no module is requested twice;
    /// - the deployment graph restricted to `modules` is acyclic;
    /// - `modules` is itself a topological order (it is the resolution order);
    /// - every edge joins two distinct required modules;
    /// - no `(source, target)` pair repeats;
    /// - each source's edges form one contiguous block;
    /// - the blocks follow a topological order.
    pub fn with_graph(
        modules: Vec<ModuleName>,
        edges: Vec<Edge>,
        graph: &DeploymentGraph,
    ) -> Result<Self, GraphViolation> {
        let mut seen = HashSet::new();
        for &module in &modules {
            if !seen.insert(module) {
                return Err(GraphViolation::DuplicateModule { module });
            }
        }

        graph.topological_order(&modules)?;
        if let Some(violation) = graph.first_out_of_order(&modules) {
            return Err(violation);
        }

        let mut pairs = HashSet::new();
        for edge in &edges {
            for module in [edge.source, edge.target] {
                if !seen.contains(&module) {
                    return Err(GraphViolation::UnknownModule { module });
                }
            }
            if edge.source == edge.target {
                return Err(GraphViolation::SelfEdge {
                    module: edge.source,
                });
            }
            if !pairs.insert((edge.source, edge.target)) {
                return Err(GraphViolation::DuplicateEdge {
                    from: edge.source,
                    to: edge.target,
                });
            }
        }

        let mut blocks: Vec<ModuleName> = Vec::new();
        for edge in &edges {
            if blocks.last() == Some(&edge.source) {
                continue;
            }
            if blocks.contains(&edge.source) {
                return Err(GraphViolation::ScatteredSource {
                    module: edge.source,
                });
            }
            blocks.push(edge.source);
        }
        if let Some(violation) = graph.first_out_of_order(&blocks) {
            return Err(violation);
        }

        Ok(Self { modules, edges })
    }

    pub fn modules(&self) -> &[ModuleName] {
        &self.modules
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}
