//! Breadth-first search.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::VecDeque;

use super::{join, GraphQuery, GraphStep};
use crate::catalog::Algorithm;
use crate::error::VizResult;
use crate::trace::{TraceBuilder, TraceGenerator};

/// BFS snapshot state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BfsState {
    /// Node being expanded.
    pub current: Option<String>,
    /// Visited nodes in discovery order.
    pub visited: Vec<String>,
    /// FIFO frontier, front first.
    pub queue: Vec<String>,
    /// Nodes in dequeue order.
    pub order: Vec<String>,
    /// Tree edges `(parent, child)` in discovery order.
    pub edges: Vec<(String, String)>,
    /// Level of every discovered node.
    pub levels: IndexMap<String, usize>,
}

/// Breadth-first search from a start node.
///
/// The node is marked visited when it is enqueued, so every node enters the
/// queue at most once and gets its level from its first discoverer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirstSearch;

struct Walk<'a> {
    query: &'a GraphQuery,
    visited: Vec<bool>,
    discovered: Vec<usize>,
    queue: VecDeque<usize>,
    order: Vec<usize>,
    edges: Vec<(usize, usize)>,
    levels: Vec<Option<usize>>,
}

impl Walk<'_> {
    fn state(&self, current: Option<usize>) -> BfsState {
        let graph = &self.query.graph;
        BfsState {
            current: current.map(|c| graph.label(c).to_string()),
            visited: graph.labels_of(self.discovered.iter().copied()),
            queue: graph.labels_of(self.queue.iter().copied()),
            order: graph.labels_of(self.order.iter().copied()),
            edges: self
                .edges
                .iter()
                .map(|&(a, b)| graph.edge_label(a, b))
                .collect(),
            levels: self
                .discovered
                .iter()
                .filter_map(|&n| self.levels[n].map(|l| (graph.label(n).to_string(), l)))
                .collect(),
        }
    }

    fn mark(&mut self, node: usize, level: usize) {
        self.visited[node] = true;
        self.levels[node] = Some(level);
        self.discovered.push(node);
        self.queue.push_back(node);
    }
}

impl TraceGenerator for BreadthFirstSearch {
    type Input = GraphQuery;
    type Kind = GraphStep;
    type State = BfsState;

    fn algorithm(&self) -> Algorithm {
        Algorithm::Bfs
    }

    fn record(&self, query: &GraphQuery, out: &mut TraceBuilder<GraphStep, BfsState>) -> VizResult<()> {
        let graph = &query.graph;
        let start = query.start_index()?;
        let n = graph.node_count();
        let mut walk = Walk {
            query,
            visited: vec![false; n],
            discovered: Vec::with_capacity(n),
            queue: VecDeque::new(),
            order: Vec::with_capacity(n),
            edges: Vec::new(),
            levels: vec![None; n],
        };

        walk.mark(start, 0);
        out.emit(
            GraphStep::Initialize,
            format!("Start BFS at {}: mark it visited at level 0 and enqueue it", query.start),
            walk.state(None),
        )?;

        while let Some(u) = walk.queue.pop_front() {
            walk.order.push(u);
            let level = walk.levels[u].unwrap_or(0);
            out.emit(
                GraphStep::Visit,
                format!("Dequeue {} (level {level})", graph.label(u)),
                walk.state(Some(u)),
            )?;

            for edge in graph.neighbors(u) {
                let v = edge.to;
                if walk.visited[v] {
                    out.emit(
                        GraphStep::Skip,
                        format!("{} is already visited", graph.label(v)),
                        walk.state(Some(u)),
                    )?;
                } else {
                    walk.mark(v, level + 1);
                    walk.edges.push((u, v));
                    out.emit(
                        GraphStep::Discover,
                        format!(
                            "Discover {} from {}: level {}, enqueue",
                            graph.label(v),
                            graph.label(u),
                            level + 1
                        ),
                        walk.state(Some(u)),
                    )?;
                }
            }
        }

        let order = graph.labels_of(walk.order.iter().copied());
        let missing: Vec<String> = (0..n)
            .filter(|&i| !walk.visited[i])
            .map(|i| graph.label(i).to_string())
            .collect();
        if missing.is_empty() {
            out.emit(
                GraphStep::Complete,
                format!("BFS complete. Traversal order: {}", join(&order)),
                walk.state(None),
            )
        } else {
            out.emit(
                GraphStep::Unreachable,
                format!(
                    "BFS complete. Order: {}. Unreachable from {}: {}",
                    join(&order),
                    query.start,
                    join(&missing)
                ),
                walk.state(None),
            )
        }
    }
}
