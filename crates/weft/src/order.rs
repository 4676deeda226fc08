//! Degree metrics and cycle-tolerant topological ordering.
//!
//! The ordering uses Kahn's method over explicit, locally-scoped state (a
//! remaining-indegree map plus a work queue); nothing leaks between
//! invocations. Header graphs routinely contain cycles, so the sort never
//! fails: nodes that cannot be linearized are appended after the acyclic
//! prefix in canonical path order, and the result is flagged cyclic. The
//! ordering exists for rendering layout, not correctness-critical
//! linearization.
//!
//! Cycle enumeration is a separate pass over the same graph using
//! petgraph's Tarjan SCC implementation; the sort itself never needs to
//! know which files form the cycles, only that some exist.

use std::collections::{BTreeMap, VecDeque};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use crate::types::{Cycle, DependencyGraph, FileIdentity, NodeMetrics, TopoOrder};

/// Metrics and ordering derived from one dependency graph.
#[derive(Debug, Clone)]
pub struct TopoAnalysis {
    /// Degree counts for every graph node.
    pub metrics: BTreeMap<FileIdentity, NodeMetrics>,
    /// Linear ordering over all nodes, dependents first.
    pub order: TopoOrder,
}

/// Compute per-node degree metrics and the cycle-tolerant ordering.
#[must_use]
pub fn analyze_topology(graph: &DependencyGraph) -> TopoAnalysis {
    // Full indegrees: how many distinct dependents target each node.
    let mut indegree: BTreeMap<&FileIdentity, usize> = graph.nodes().map(|n| (n, 0)).collect();
    for (_, deps) in graph.iter() {
        for dep in deps {
            *indegree.entry(dep).or_insert(0) += 1;
        }
    }

    let metrics: BTreeMap<FileIdentity, NodeMetrics> = graph
        .iter()
        .map(|(node, deps)| {
            (
                node.clone(),
                NodeMetrics {
                    indegree: indegree.get(node).copied().unwrap_or(0),
                    outdegree: deps.len(),
                },
            )
        })
        .collect();

    // Kahn's method. Remaining-indegree state lives only in this call.
    let mut remaining = indegree;
    let mut queue: VecDeque<&FileIdentity> = remaining
        .iter()
        .filter(|(_, deg)| **deg == 0)
        .map(|(node, _)| *node)
        .collect();

    let mut sequence: Vec<FileIdentity> = Vec::with_capacity(graph.node_count());
    while let Some(node) = queue.pop_front() {
        sequence.push(node.clone());
        if let Some(deps) = graph.dependencies_of(node) {
            for dep in deps {
                if let Some(deg) = remaining.get_mut(dep) {
                    *deg -= 1;
                    if *deg == 0 {
                        queue.push_back(dep);
                    }
                }
            }
        }
    }

    let acyclic_len = sequence.len();
    if acyclic_len < graph.node_count() {
        // Leftovers are cycle members; append them in path order without
        // attempting cycle-breaking.
        let leftovers: Vec<FileIdentity> = remaining
            .into_iter()
            .filter(|(_, deg)| *deg > 0)
            .map(|(node, _)| node.clone())
            .collect();
        debug!(cyclic_nodes = leftovers.len(), "graph contains cycles");
        sequence.extend(leftovers);
    }

    TopoAnalysis {
        metrics,
        order: TopoOrder {
            sequence,
            acyclic_len,
        },
    }
}

/// Enumerate the strongly connected components that form actual cycles:
/// components with more than one member, or a single node that includes
/// itself.
///
/// Members within a cycle and the cycles themselves are sorted by
/// canonical path, so the result is deterministic.
#[must_use]
pub fn find_cycles(graph: &DependencyGraph) -> Vec<Cycle> {
    let mut petgraph: DiGraph<(), ()> = DiGraph::new();
    let mut node_map: BTreeMap<&FileIdentity, NodeIndex> = BTreeMap::new();
    let mut reverse: Vec<&FileIdentity> = Vec::with_capacity(graph.node_count());

    for node in graph.nodes() {
        let idx = petgraph.add_node(());
        node_map.insert(node, idx);
        reverse.push(node);
    }
    for (node, deps) in graph.iter() {
        for dep in deps {
            petgraph.add_edge(node_map[node], node_map[dep], ());
        }
    }

    let mut cycles: Vec<Cycle> = tarjan_scc(&petgraph)
        .into_iter()
        .filter(|scc| {
            scc.len() > 1 || {
                let only = reverse[scc[0].index()];
                graph
                    .dependencies_of(only)
                    .is_some_and(|deps| deps.contains(only))
            }
        })
        .map(|scc| {
            let mut members: Vec<FileIdentity> = scc
                .into_iter()
                .map(|idx| reverse[idx.index()].clone())
                .collect();
            members.sort();
            Cycle { members }
        })
        .collect();
    cycles.sort_by(|a, b| a.members.cmp(&b.members));
    cycles
}
