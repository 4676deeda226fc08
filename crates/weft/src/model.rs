//! Attributed node/edge model handed to an external renderer.
//!
//! The model is declarative: labels and flags, no colors, no shapes, no
//! layout. A renderer (Graphviz, D3, anything that reads the JSON
//! serialization) decides presentation. Node order follows the
//! cycle-tolerant topological ordering so renderers get a stable layout
//! hint for free.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::types::{Analysis, FileIdentity};

/// Fan-in/fan-out threshold above which a node is flagged for emphasis.
pub const FAN_THRESHOLD: usize = 3;

/// A renderable node with derived display attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Stable node id: the canonical file path.
    pub id: String,
    /// Display label: the file name.
    pub label: String,
    /// The entry translation unit includes this file directly.
    pub entry_included: bool,
    /// Three or more files depend on this one.
    pub high_fan_in: bool,
    /// This file depends on three or more others.
    pub high_fan_out: bool,
}

/// A directed dependency edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Id of the dependent file.
    pub from: String,
    /// Id of the file it depends on.
    pub to: String,
}

/// The complete renderer hand-off: nodes, edges, and layout-neutral hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphModel {
    /// All nodes, in topological-order sequence.
    pub nodes: Vec<GraphNode>,
    /// All deduplicated dependent-to-dependency edges.
    pub edges: Vec<GraphEdge>,
    /// Ids of nodes with no edges at all, so a renderer can park them in a
    /// separate rank.
    pub isolated: Vec<String>,
    /// The dependency relation contains at least one cycle.
    pub cyclic: bool,
}

impl Analysis {
    /// Assemble the abstract attributed graph from this run's results.
    #[must_use]
    pub fn to_model(&self) -> GraphModel {
        let entry: BTreeSet<&FileIdentity> = self.entry_set.iter().collect();

        let nodes = self
            .order
            .sequence
            .iter()
            .map(|identity| {
                let metrics = self.metrics.get(identity).copied().unwrap_or_default();
                GraphNode {
                    id: identity.to_string(),
                    label: identity.label(),
                    entry_included: entry.contains(identity),
                    high_fan_in: metrics.indegree >= FAN_THRESHOLD,
                    high_fan_out: metrics.outdegree >= FAN_THRESHOLD,
                }
            })
            .collect();

        let edges = self
            .graph
            .iter()
            .flat_map(|(node, deps)| {
                deps.iter().map(move |dep| GraphEdge {
                    from: node.to_string(),
                    to: dep.to_string(),
                })
            })
            .collect();

        let isolated = self
            .metrics
            .iter()
            .filter(|(_, m)| m.indegree == 0 && m.outdegree == 0)
            .map(|(identity, _)| identity.to_string())
            .collect();

        GraphModel {
            nodes,
            edges,
            isolated,
            cyclic: self.order.cyclic(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order;
    use crate::types::DependencyGraph;
    use std::path::PathBuf;
    use std::time::Duration;

    fn id(name: &str) -> FileIdentity {
        FileIdentity::from_canonical(PathBuf::from(format!("/proj/{name}")))
    }

    fn analysis_of(graph: DependencyGraph, entry: &[&str]) -> Analysis {
        let topo = order::analyze_topology(&graph);
        let cycles = order::find_cycles(&graph);
        Analysis {
            graph,
            entry_set: entry.iter().map(|n| id(n)).collect(),
            metrics: topo.metrics,
            order: topo.order,
            cycles,
            diagnostics: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    /// Hub-and-spoke graph: hub.h is included by three files and includes
    /// three files.
    fn hub_graph() -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for caller in ["a.h", "b.h", "c.h"] {
            graph.insert_edge(id(caller), id("hub.h"));
        }
        for dep in ["x.h", "y.h", "z.h"] {
            graph.insert_edge(id("hub.h"), id(dep));
        }
        graph.insert_node(id("lonely.h"));
        graph
    }

    #[test]
    fn fan_flags_trigger_at_threshold() {
        let model = analysis_of(hub_graph(), &[]).to_model();

        let hub = model.nodes.iter().find(|n| n.label == "hub.h").unwrap();
        assert!(hub.high_fan_in);
        assert!(hub.high_fan_out);

        let a = model.nodes.iter().find(|n| n.label == "a.h").unwrap();
        assert!(!a.high_fan_in);
        assert!(!a.high_fan_out);
    }

    #[test]
    fn entry_included_flag_follows_entry_set() {
        let model = analysis_of(hub_graph(), &["a.h"]).to_model();

        let a = model.nodes.iter().find(|n| n.label == "a.h").unwrap();
        assert!(a.entry_included);
        let b = model.nodes.iter().find(|n| n.label == "b.h").unwrap();
        assert!(!b.entry_included);
    }

    #[test]
    fn isolated_lists_only_edgeless_nodes() {
        let model = analysis_of(hub_graph(), &[]).to_model();
        assert_eq!(model.isolated, vec![id("lonely.h").to_string()]);
    }

    #[test]
    fn edges_cover_the_whole_relation_once() {
        let model = analysis_of(hub_graph(), &[]).to_model();
        assert_eq!(model.edges.len(), 6);

        let mut deduped = model.edges.clone();
        deduped.sort_by(|l, r| (&l.from, &l.to).cmp(&(&r.from, &r.to)));
        deduped.dedup();
        assert_eq!(deduped.len(), model.edges.len());
    }

    #[test]
    fn node_order_matches_the_topological_sequence() {
        let analysis = analysis_of(hub_graph(), &[]);
        let model = analysis.to_model();

        let expected: Vec<String> =
            analysis.order.sequence.iter().map(ToString::to_string).collect();
        let actual: Vec<String> = model.nodes.iter().map(|n| n.id.clone()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn cyclic_flag_propagates_to_the_model() {
        let mut graph = DependencyGraph::new();
        graph.insert_edge(id("A.h"), id("B.h"));
        graph.insert_edge(id("B.h"), id("A.h"));
        assert!(analysis_of(graph, &[]).to_model().cyclic);

        assert!(!analysis_of(hub_graph(), &[]).to_model().cyclic);
    }

    #[test]
    fn model_round_trips_through_json() {
        let model = analysis_of(hub_graph(), &["a.h"]).to_model();
        let json = serde_json::to_string(&model).unwrap();
        let back: GraphModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, model);
    }
}
