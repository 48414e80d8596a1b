//! Depth-first search (recursive).

use serde::Serialize;

use super::{join, GraphQuery, GraphStep};
use crate::catalog::Algorithm;
use crate::error::VizResult;
use crate::trace::{TraceBuilder, TraceGenerator};

/// DFS snapshot state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DfsState {
    /// Node on top of the recursion stack.
    pub current: Option<String>,
    /// Visited nodes in discovery order.
    pub visited: Vec<String>,
    /// Recursion stack, bottom first.
    pub stack: Vec<String>,
    /// Nodes whose recursion has returned, in finishing order.
    pub finished: Vec<String>,
    /// Tree edges `(parent, child)` in discovery order.
    pub edges: Vec<(String, String)>,
}

/// Recursive depth-first search from a start node.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirstSearch;

struct Walk<'a> {
    query: &'a GraphQuery,
    visited: Vec<bool>,
    discovered: Vec<usize>,
    stack: Vec<usize>,
    finished: Vec<usize>,
    edges: Vec<(usize, usize)>,
}

type Out = TraceBuilder<GraphStep, DfsState>;

impl Walk<'_> {
    fn state(&self) -> DfsState {
        let graph = &self.query.graph;
        DfsState {
            current: self.stack.last().map(|&c| graph.label(c).to_string()),
            visited: graph.labels_of(self.discovered.iter().copied()),
            stack: graph.labels_of(self.stack.iter().copied()),
            finished: graph.labels_of(self.finished.iter().copied()),
            edges: self
                .edges
                .iter()
                .map(|&(a, b)| graph.edge_label(a, b))
                .collect(),
        }
    }

    fn visit(&mut self, u: usize, out: &mut Out) -> VizResult<()> {
        let query = self.query;
        let graph = &query.graph;
        self.visited[u] = true;
        self.discovered.push(u);
        self.stack.push(u);
        out.emit(
            GraphStep::Visit,
            format!("Visit {} (depth {})", graph.label(u), self.stack.len() - 1),
            self.state(),
        )?;

        for edge in graph.neighbors(u) {
            let v = edge.to;
            if self.visited[v] {
                out.emit(
                    GraphStep::Skip,
                    format!("{} is already visited", graph.label(v)),
                    self.state(),
                )?;
                continue;
            }
            self.edges.push((u, v));
            out.emit(
                GraphStep::Discover,
                format!("Follow edge {}-{}", graph.label(u), graph.label(v)),
                self.state(),
            )?;
            self.visit(v, out)?;
        }

        self.stack.pop();
        self.finished.push(u);
        let narration = match self.stack.last() {
            Some(&parent) => format!(
                "{} is finished, backtrack to {}",
                graph.label(u),
                graph.label(parent)
            ),
            None => format!("{} is finished, the search tree is complete", graph.label(u)),
        };
        out.emit(GraphStep::Backtrack, narration, self.state())
    }
}

impl TraceGenerator for DepthFirstSearch {
    type Input = GraphQuery;
    type Kind = GraphStep;
    type State = DfsState;

    fn algorithm(&self) -> Algorithm {
        Algorithm::Dfs
    }

    fn record(&self, query: &GraphQuery, out: &mut Out) -> VizResult<()> {
        let graph = &query.graph;
        let start = query.start_index()?;
        let n = graph.node_count();
        let mut walk = Walk {
            query,
            visited: vec![false; n],
            discovered: Vec::with_capacity(n),
            stack: Vec::new(),
            finished: Vec::with_capacity(n),
            edges: Vec::new(),
        };

        out.emit(
            GraphStep::Initialize,
            format!("Start DFS at {}", query.start),
            walk.state(),
        )?;
        walk.visit(start, out)?;

        let order = graph.labels_of(walk.discovered.iter().copied());
        let missing: Vec<String> = (0..n)
            .filter(|&i| !walk.visited[i])
            .map(|i| graph.label(i).to_string())
            .collect();
        if missing.is_empty() {
            out.emit(
                GraphStep::Complete,
                format!("DFS complete. Traversal order: {}", join(&order)),
                walk.state(),
            )
        } else {
            out.emit(
                GraphStep::Unreachable,
                format!(
                    "DFS complete. Order: {}. Unreachable from {}: {}",
                    join(&order),
                    query.start,
                    join(&missing)
                ),
                walk.state(),
            )
        }
    }
}
