//! Topological sort (Kahn's algorithm).

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::VecDeque;

use super::{join, GraphQuery, GraphStep};
use crate::catalog::Algorithm;
use crate::error::{VizError, VizResult};
use crate::trace::{TraceBuilder, TraceGenerator};

/// Topological sort snapshot state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopologicalState {
    /// Node just removed from the queue.
    pub current: Option<String>,
    /// Remaining in-degree per node.
    pub in_degree: IndexMap<String, usize>,
    /// Nodes with in-degree zero waiting to be output.
    pub queue: Vec<String>,
    /// Output order so far.
    pub order: Vec<String>,
    /// Edge removed by the last relax step.
    pub removed_edge: Option<(String, String)>,
}

/// Kahn's algorithm over a directed graph.
///
/// The start node of the query is ignored; every node with in-degree zero is
/// seeded into the queue in node order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopologicalSort;

struct Kahn<'a> {
    query: &'a GraphQuery,
    in_degree: Vec<usize>,
    queue: VecDeque<usize>,
    order: Vec<usize>,
}

impl Kahn<'_> {
    fn state(&self, current: Option<usize>, removed: Option<(usize, usize)>) -> TopologicalState {
        let graph = &self.query.graph;
        TopologicalState {
            current: current.map(|c| graph.label(c).to_string()),
            in_degree: graph
                .labels()
                .zip(&self.in_degree)
                .map(|(l, d)| (l.to_string(), *d))
                .collect(),
            queue: graph.labels_of(self.queue.iter().copied()),
            order: graph.labels_of(self.order.iter().copied()),
            removed_edge: removed.map(|(a, b)| graph.edge_label(a, b)),
        }
    }
}

impl TraceGenerator for TopologicalSort {
    type Input = GraphQuery;
    type Kind = GraphStep;
    type State = TopologicalState;

    fn algorithm(&self) -> Algorithm {
        Algorithm::TopologicalSort
    }

    fn record(
        &self,
        query: &GraphQuery,
        out: &mut TraceBuilder<GraphStep, TopologicalState>,
    ) -> VizResult<()> {
        let graph = &query.graph;
        if !graph.is_directed() {
            return Err(VizError::input(
                "directed",
                "topological sort needs a directed graph",
            ));
        }
        let n = graph.node_count();
        let mut kahn = Kahn {
            query,
            in_degree: vec![0; n],
            queue: VecDeque::new(),
            order: Vec::with_capacity(n),
        };
        for u in 0..n {
            for edge in graph.neighbors(u) {
                kahn.in_degree[edge.to] += 1;
            }
        }
        kahn.queue.extend((0..n).filter(|&u| kahn.in_degree[u] == 0));
        let sources = graph.labels_of(kahn.queue.iter().copied());
        out.emit(
            GraphStep::Initialize,
            format!(
                "Count in-degrees; nodes with in-degree 0: {}",
                join(&sources)
            ),
            kahn.state(None, None),
        )?;

        while let Some(u) = kahn.queue.pop_front() {
            kahn.order.push(u);
            out.emit(
                GraphStep::Visit,
                format!("Output {}", graph.label(u)),
                kahn.state(Some(u), None),
            )?;
            for edge in graph.neighbors(u) {
                let v = edge.to;
                kahn.in_degree[v] -= 1;
                out.emit(
                    GraphStep::Relax,
                    format!(
                        "Remove edge {}-{}: in-degree of {} is now {}",
                        graph.label(u),
                        graph.label(v),
                        graph.label(v),
                        kahn.in_degree[v]
                    ),
                    kahn.state(Some(u), Some((u, v))),
                )?;
                if kahn.in_degree[v] == 0 {
                    kahn.queue.push_back(v);
                    out.emit(
                        GraphStep::Enqueue,
                        format!("{} has no remaining prerequisites, enqueue", graph.label(v)),
                        kahn.state(Some(u), Some((u, v))),
                    )?;
                }
            }
        }

        let order = graph.labels_of(kahn.order.iter().copied());
        if kahn.order.len() == n {
            out.emit(
                GraphStep::Complete,
                format!("Topological order: {}", join(&order)),
                kahn.state(None, None),
            )
        } else {
            let stuck: Vec<String> = (0..n)
                .filter(|&v| kahn.in_degree[v] > 0)
                .map(|v| graph.label(v).to_string())
                .collect();
            out.emit(
                GraphStep::CycleDetected,
                format!("Cycle detected: {} never reach in-degree 0", join(&stuck)),
                kahn.state(None, None),
            )
        }
    }
}
