//! Graph algorithms.
//!
//! All graph generators share the [`Graph`] input type and the [`GraphStep`]
//! kinds. Neighbors are always visited in adjacency-list order, which is the
//! order edges were added; for an undirected edge `A-B` the reverse entry is
//! appended to `B`'s list at the same time.
//!
//! Snapshot states name nodes by label so a renderer never needs the graph to
//! interpret them.

mod bfs;
mod dfs;
mod dijkstra;
mod prim;
mod topological;

pub use bfs::{BfsState, BreadthFirstSearch};
pub use dfs::{DepthFirstSearch, DfsState};
pub use dijkstra::{Dijkstra, DijkstraState};
pub use prim::{Prim, PrimState};
pub use topological::{TopologicalSort, TopologicalState};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::step_kind;
use crate::error::{VizError, VizResult};
use crate::input::{self, check_node_count, check_weight};

/// Transition kinds for graph traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphStep {
    /// Initial state.
    Initialize,
    /// A node is taken from the frontier (or entered, for DFS).
    Visit,
    /// An unvisited neighbor is found through an edge.
    Discover,
    /// A neighbor or edge needs no work.
    Skip,
    /// Minimum-distance node chosen (Dijkstra, Prim).
    Select,
    /// A tentative value is improved or decremented.
    Relax,
    /// A node becomes ready (topological sort).
    Enqueue,
    /// DFS returns from a node.
    Backtrack,
    /// Every node was reached.
    Complete,
    /// Some nodes cannot be reached from the start.
    Unreachable,
    /// The graph is not a DAG.
    CycleDetected,
}

step_kind!(GraphStep {
    Initialize => "initialize",
    Visit => "visit",
    Discover => "discover",
    Skip => "skip",
    Select => "select",
    Relax => "relax",
    Enqueue => "enqueue",
    Backtrack => "backtrack",
    Complete => "complete",
    Unreachable => "unreachable",
    CycleDetected => "cycle_detected",
}
initial: [Initialize]
terminal: [Complete, Unreachable, CycleDetected]);

/// Outgoing adjacency entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Target node index.
    pub to: usize,
    /// Edge weight.
    pub weight: i64,
}

/// Labeled graph with ordered adjacency lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Graph {
    nodes: IndexSet<String>,
    adjacency: Vec<Vec<Edge>>,
    directed: bool,
}

impl Graph {
    /// Empty undirected graph.
    #[must_use]
    pub fn undirected() -> Self {
        Self::default()
    }

    /// Empty directed graph.
    #[must_use]
    pub fn directed() -> Self {
        Self {
            directed: true,
            ..Self::default()
        }
    }

    /// Parse comma-separated node and edge lists (`"A, B"`, `"A-B:3"`).
    ///
    /// # Errors
    ///
    /// Returns [`VizError::Input`] on duplicate labels or unknown endpoints.
    pub fn parse(nodes: &str, edges: &str, directed: bool) -> VizResult<Self> {
        let labels = input::parse_labels(nodes)?;
        let edges = input::parse_edges(edges, &labels)?;
        let mut graph = if directed {
            Self::directed()
        } else {
            Self::undirected()
        };
        for label in labels {
            graph.add_node(label)?;
        }
        for edge in edges {
            graph.add_edge(&edge.from, &edge.to, edge.weight)?;
        }
        Ok(graph)
    }

    /// Build from literal lists.
    ///
    /// # Errors
    ///
    /// Same as [`Graph::add_node`] and [`Graph::add_edge`].
    pub fn from_edges(nodes: &[&str], edges: &[(&str, &str, i64)], directed: bool) -> VizResult<Self> {
        let mut graph = if directed {
            Self::directed()
        } else {
            Self::undirected()
        };
        for node in nodes {
            graph.add_node(*node)?;
        }
        for (from, to, weight) in edges {
            graph.add_edge(from, to, *weight)?;
        }
        Ok(graph)
    }

    /// Add a node, returning its index.
    ///
    /// # Errors
    ///
    /// Rejects empty and duplicate labels, and any node past [`input::MAX_NODES`].
    pub fn add_node(&mut self, label: impl Into<String>) -> VizResult<usize> {
        let label = label.into();
        if label.is_empty() {
            return Err(VizError::input("nodes", "labels must not be empty"));
        }
        check_node_count(self.nodes.len() + 1)?;
        let (index, inserted) = self.nodes.insert_full(label);
        if !inserted {
            return Err(VizError::input(
                "nodes",
                format!("duplicate label '{}'", self.label(index)),
            ));
        }
        self.adjacency.push(Vec::new());
        Ok(index)
    }

    /// Add an edge between existing nodes (both directions if undirected).
    ///
    /// # Errors
    ///
    /// Rejects unknown endpoints and weights beyond [`input::MAX_WEIGHT`].
    pub fn add_edge(&mut self, from: &str, to: &str, weight: i64) -> VizResult<()> {
        let weight = check_weight(weight)?;
        let endpoint = |label: &str| {
            self.nodes.get_index_of(label).ok_or_else(|| {
                VizError::input("edges", format!("edge {from}-{to} references unknown node '{label}'"))
            })
        };
        let (a, b) = (endpoint(from)?, endpoint(to)?);
        self.adjacency[a].push(Edge { to: b, weight });
        if !self.directed && a != b {
            self.adjacency[b].push(Edge { to: a, weight });
        }
        Ok(())
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether edges are one-way.
    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    /// Label of node `index`, or `"?"` for an index this graph never issued.
    #[must_use]
    pub fn label(&self, index: usize) -> &str {
        self.nodes.get_index(index).map_or("?", String::as_str)
    }

    /// Labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Outgoing edges of `index` in insertion order.
    #[must_use]
    pub fn neighbors(&self, index: usize) -> &[Edge] {
        self.adjacency.get(index).map_or(&[], Vec::as_slice)
    }

    /// Index of `label`.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::UnknownNode`] when the label is absent.
    pub fn require(&self, label: &str) -> VizResult<usize> {
        self.nodes
            .get_index_of(label)
            .ok_or_else(|| VizError::UnknownNode(label.to_string()))
    }

    pub(crate) fn labels_of(&self, indices: impl IntoIterator<Item = usize>) -> Vec<String> {
        indices.into_iter().map(|i| self.label(i).to_string()).collect()
    }

    pub(crate) fn edge_label(&self, from: usize, to: usize) -> (String, String) {
        (self.label(from).to_string(), self.label(to).to_string())
    }
}

/// A graph plus the node a traversal starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphQuery {
    /// Graph to traverse.
    pub graph: Graph,
    /// Start (or source) label.
    pub start: String,
}

impl GraphQuery {
    /// Pair a graph with a start label.
    pub fn new(graph: Graph, start: impl Into<String>) -> Self {
        Self {
            graph,
            start: start.into(),
        }
    }

    /// Resolve the start label.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::UnknownNode`] when the start is not in the graph.
    pub fn start_index(&self) -> VizResult<usize> {
        self.graph.require(&self.start)
    }
}

/// Render `"A, B, C"` for narration.
pub(crate) fn join(labels: &[String]) -> String {
    if labels.is_empty() {
        "none".to_string()
    } else {
        labels.join(", ")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Six-node unweighted example used by the traversal tests.
    pub(crate) fn traversal_graph() -> Graph {
        Graph::parse("A, B, C, D, E, F", "A-B, A-D, B-C, B-D, C-E, D-F, E-F", false)
            .expect("valid graph")
    }

    /// Five-node weighted example used by the shortest-path tests.
    pub(crate) fn weighted_graph() -> Graph {
        Graph::parse(
            "A, B, C, D, E",
            "A-B:4, A-D:2, B-C:5, B-D:1, C-E:2, D-E:8, D-C:6",
            false,
        )
        .expect("valid graph")
    }

    #[test]
    fn test_adjacency_follows_edge_order() {
        let graph = traversal_graph();
        let names = |label: &str| -> Vec<&str> {
            let idx = graph.require(label).expect("known");
            graph.neighbors(idx).iter().map(|e| graph.label(e.to)).collect()
        };
        assert_eq!(names("A"), ["B", "D"]);
        assert_eq!(names("B"), ["A", "C", "D"]);
        assert_eq!(names("D"), ["A", "B", "F"]);
        assert_eq!(names("F"), ["D", "E"]);
    }

    #[test]
    fn test_directed_edges_are_one_way() {
        let graph = Graph::parse("A, B", "A-B", true).expect("valid");
        assert!(graph.is_directed());
        assert_eq!(graph.neighbors(0).len(), 1);
        assert!(graph.neighbors(1).is_empty());
    }

    #[test]
    fn test_weights() {
        let graph = weighted_graph();
        let a = graph.require("A").expect("known");
        let weights: Vec<i64> = graph.neighbors(a).iter().map(|e| e.weight).collect();
        assert_eq!(weights, [4, 2]);
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut graph = Graph::undirected();
        graph.add_node("A").expect("first");
        let err = graph.add_node("A").unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_unknown_endpoint_rejected() {
        let mut graph = Graph::undirected();
        graph.add_node("A").expect("first");
        assert!(graph.add_edge("A", "B", 1).is_err());
        assert!(Graph::from_edges(&["A"], &[("A", "Z", 1)], false).is_err());
    }

    #[test]
    fn test_require_unknown_node() {
        let query = GraphQuery::new(traversal_graph(), "Z");
        assert!(matches!(query.start_index(), Err(VizError::UnknownNode(_))));
    }

    #[test]
    fn test_self_loop_added_once() {
        let graph = Graph::from_edges(&["A"], &[("A", "A", 1)], false).expect("valid");
        assert_eq!(graph.neighbors(0).len(), 1);
    }

    #[test]
    fn test_node_limit() {
        let mut graph = Graph::undirected();
        for i in 0..input::MAX_NODES {
            graph.add_node(format!("n{i}")).expect("under limit");
        }
        let err = graph.add_node("one too many").unwrap_err();
        assert!(matches!(err, VizError::Input { field: "nodes", .. }));
        assert_eq!(graph.node_count(), input::MAX_NODES);
    }

    #[test]
    fn test_weight_limit() {
        let mut graph = Graph::undirected();
        graph.add_node("A").expect("first");
        graph.add_node("B").expect("second");
        let err = graph.add_edge("A", "B", i64::MAX).unwrap_err();
        assert!(matches!(err, VizError::Input { field: "edges", .. }));
        assert!(graph.add_edge("A", "B", i64::MIN).is_err());
        assert!(graph.neighbors(0).is_empty());
        graph.add_edge("A", "B", input::MAX_WEIGHT).expect("at limit");
        assert_eq!(graph.neighbors(0)[0].weight, input::MAX_WEIGHT);
    }

    #[test]
    fn test_label_out_of_range() {
        let graph = traversal_graph();
        assert_eq!(graph.label(0), "A");
        assert_eq!(graph.label(graph.node_count()), "?");
        assert_eq!(graph.label(usize::MAX), "?");
    }
}
