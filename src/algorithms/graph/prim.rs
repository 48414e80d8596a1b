//! Prim's minimum spanning tree.

use indexmap::IndexMap;
use serde::Serialize;

use super::{join, GraphQuery, GraphStep};
use crate::catalog::Algorithm;
use crate::error::{VizError, VizResult};
use crate::trace::{TraceBuilder, TraceGenerator};

/// Prim snapshot state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimState {
    /// Node just added to the tree.
    pub current: Option<String>,
    /// Cheapest known connection per node; `None` is infinity.
    pub keys: IndexMap<String, Option<i64>>,
    /// Nodes in the tree, in insertion order.
    pub in_tree: Vec<String>,
    /// Tree edges `(parent, child)`.
    pub mst_edges: Vec<(String, String)>,
    /// Sum of tree edge weights.
    pub total_weight: i64,
    /// Edge under examination.
    pub edge: Option<(String, String)>,
}

/// Prim's algorithm grown from the start node.
///
/// Uses the same linear-scan selection as [`Dijkstra`](super::Dijkstra), so
/// equal keys are broken by node order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Prim;

struct Tree<'a> {
    query: &'a GraphQuery,
    key: Vec<Option<i64>>,
    parent: Vec<Option<usize>>,
    in_tree: Vec<bool>,
    order: Vec<usize>,
    edges: Vec<(usize, usize)>,
    total: i64,
}

impl Tree<'_> {
    fn state(&self, current: Option<usize>, edge: Option<(usize, usize)>) -> PrimState {
        let graph = &self.query.graph;
        PrimState {
            current: current.map(|c| graph.label(c).to_string()),
            keys: graph
                .labels()
                .zip(&self.key)
                .map(|(l, k)| (l.to_string(), *k))
                .collect(),
            in_tree: graph.labels_of(self.order.iter().copied()),
            mst_edges: self
                .edges
                .iter()
                .map(|&(a, b)| graph.edge_label(a, b))
                .collect(),
            total_weight: self.total,
            edge: edge.map(|(a, b)| graph.edge_label(a, b)),
        }
    }

    fn cheapest_outside(&self) -> Option<usize> {
        let mut best: Option<(usize, i64)> = None;
        for (node, key) in self.key.iter().enumerate() {
            if self.in_tree[node] {
                continue;
            }
            if let Some(k) = *key {
                if best.map_or(true, |(_, b)| k < b) {
                    best = Some((node, k));
                }
            }
        }
        best.map(|(node, _)| node)
    }
}

impl TraceGenerator for Prim {
    type Input = GraphQuery;
    type Kind = GraphStep;
    type State = PrimState;

    fn algorithm(&self) -> Algorithm {
        Algorithm::Prim
    }

    fn record(&self, query: &GraphQuery, out: &mut TraceBuilder<GraphStep, PrimState>) -> VizResult<()> {
        let graph = &query.graph;
        if graph.is_directed() {
            return Err(VizError::input(
                "directed",
                "Prim's algorithm needs an undirected graph",
            ));
        }
        let root = query.start_index()?;
        let n = graph.node_count();
        let mut tree = Tree {
            query,
            key: vec![None; n],
            parent: vec![None; n],
            in_tree: vec![false; n],
            order: Vec::with_capacity(n),
            edges: Vec::with_capacity(n.saturating_sub(1)),
            total: 0,
        };
        tree.key[root] = Some(0);
        out.emit(
            GraphStep::Initialize,
            format!("Grow the spanning tree from {}", query.start),
            tree.state(None, None),
        )?;

        while let Some(u) = tree.cheapest_outside() {
            let key = tree.key[u].unwrap_or(0);
            tree.in_tree[u] = true;
            tree.order.push(u);
            let narration = match tree.parent[u] {
                Some(p) => {
                    tree.edges.push((p, u));
                    tree.total = tree.total.checked_add(key).ok_or_else(|| {
                        VizError::input("edges", "spanning tree weight overflows")
                    })?;
                    format!(
                        "Add {} via edge {}-{} (weight {key}), tree weight {}",
                        graph.label(u),
                        graph.label(p),
                        graph.label(u),
                        tree.total
                    )
                }
                None => format!("Add root {}", graph.label(u)),
            };
            out.emit(GraphStep::Select, narration, tree.state(Some(u), None))?;

            for edge in graph.neighbors(u) {
                let v = edge.to;
                let (from, to) = (graph.label(u), graph.label(v));
                if tree.in_tree[v] {
                    out.emit(
                        GraphStep::Skip,
                        format!("{to} is already in the tree"),
                        tree.state(Some(u), Some((u, v))),
                    )?;
                } else if tree.key[v].map_or(true, |k| edge.weight < k) {
                    tree.key[v] = Some(edge.weight);
                    tree.parent[v] = Some(u);
                    out.emit(
                        GraphStep::Relax,
                        format!("Edge {from}-{to} (weight {}) is the cheapest link to {to}", edge.weight),
                        tree.state(Some(u), Some((u, v))),
                    )?;
                } else {
                    out.emit(
                        GraphStep::Skip,
                        format!(
                            "Edge {from}-{to} (weight {}) is no cheaper than the current link to {to}",
                            edge.weight
                        ),
                        tree.state(Some(u), Some((u, v))),
                    )?;
                }
            }
        }

        let missing: Vec<String> = (0..n)
            .filter(|&v| !tree.in_tree[v])
            .map(|v| graph.label(v).to_string())
            .collect();
        if missing.is_empty() {
            out.emit(
                GraphStep::Complete,
                format!(
                    "Minimum spanning tree complete: {} edges, total weight {}",
                    tree.edges.len(),
                    tree.total
                ),
                tree.state(None, None),
            )
        } else {
            out.emit(
                GraphStep::Unreachable,
                format!(
                    "The graph is disconnected; spanning tree of {} has weight {}. Unreachable: {}",
                    query.start,
                    tree.total,
                    join(&missing)
                ),
                tree.state(None, None),
            )
        }
    }
}
