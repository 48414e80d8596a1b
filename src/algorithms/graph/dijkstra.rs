//! Dijkstra's single-source shortest paths.

use indexmap::IndexMap;
use serde::Serialize;

use super::{join, GraphQuery, GraphStep};
use crate::catalog::Algorithm;
use crate::error::{VizError, VizResult};
use crate::trace::{TraceBuilder, TraceGenerator};

/// Dijkstra snapshot state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DijkstraState {
    /// Node being finalized.
    pub current: Option<String>,
    /// Tentative distance per node in node order; `None` is infinity.
    pub distances: IndexMap<String, Option<i64>>,
    /// Predecessor on the best known path.
    pub previous: IndexMap<String, Option<String>>,
    /// Finalized nodes in selection order.
    pub visited: Vec<String>,
    /// Edge under examination.
    pub edge: Option<(String, String)>,
}

/// Dijkstra's algorithm with a linear-scan minimum.
///
/// The unvisited node with the smallest finite distance is selected each
/// round; on equal distances the node added to the graph first wins.
/// Distances only change on strict improvement.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

struct Table<'a> {
    query: &'a GraphQuery,
    dist: Vec<Option<i64>>,
    prev: Vec<Option<usize>>,
    visited: Vec<bool>,
    order: Vec<usize>,
}

impl Table<'_> {
    fn state(&self, current: Option<usize>, edge: Option<(usize, usize)>) -> DijkstraState {
        let graph = &self.query.graph;
        DijkstraState {
            current: current.map(|c| graph.label(c).to_string()),
            distances: graph
                .labels()
                .zip(&self.dist)
                .map(|(l, d)| (l.to_string(), *d))
                .collect(),
            previous: graph
                .labels()
                .zip(&self.prev)
                .map(|(l, p)| (l.to_string(), p.map(|p| graph.label(p).to_string())))
                .collect(),
            visited: graph.labels_of(self.order.iter().copied()),
            edge: edge.map(|(a, b)| graph.edge_label(a, b)),
        }
    }

    fn closest_unvisited(&self) -> Option<usize> {
        let mut best: Option<(usize, i64)> = None;
        for (node, dist) in self.dist.iter().enumerate() {
            if self.visited[node] {
                continue;
            }
            if let Some(d) = *dist {
                if best.map_or(true, |(_, b)| d < b) {
                    best = Some((node, d));
                }
            }
        }
        best.map(|(node, _)| node)
    }
}

fn show(d: Option<i64>) -> String {
    d.map_or_else(|| "inf".to_string(), |d| d.to_string())
}

impl TraceGenerator for Dijkstra {
    type Input = GraphQuery;
    type Kind = GraphStep;
    type State = DijkstraState;

    fn algorithm(&self) -> Algorithm {
        Algorithm::Dijkstra
    }

    fn record(
        &self,
        query: &GraphQuery,
        out: &mut TraceBuilder<GraphStep, DijkstraState>,
    ) -> VizResult<()> {
        let graph = &query.graph;
        let source = query.start_index()?;
        let n = graph.node_count();
        if (0..n).any(|u| graph.neighbors(u).iter().any(|e| e.weight < 0)) {
            return Err(VizError::input(
                "edges",
                "Dijkstra's algorithm requires non-negative weights",
            ));
        }

        let mut table = Table {
            query,
            dist: vec![None; n],
            prev: vec![None; n],
            visited: vec![false; n],
            order: Vec::with_capacity(n),
        };
        table.dist[source] = Some(0);
        out.emit(
            GraphStep::Initialize,
            format!(
                "Set distance of {} to 0 and every other node to infinity",
                query.start
            ),
            table.state(None, None),
        )?;

        while let Some(u) = table.closest_unvisited() {
            let du = table.dist[u].unwrap_or(0);
            table.visited[u] = true;
            table.order.push(u);
            out.emit(
                GraphStep::Select,
                format!("Select {} with the smallest distance {du}", graph.label(u)),
                table.state(Some(u), None),
            )?;

            for edge in graph.neighbors(u) {
                let v = edge.to;
                let (from, to) = (graph.label(u), graph.label(v));
                if table.visited[v] {
                    out.emit(
                        GraphStep::Skip,
                        format!("{to} is already finalized"),
                        table.state(Some(u), Some((u, v))),
                    )?;
                    continue;
                }
                let candidate = du.checked_add(edge.weight).ok_or_else(|| {
                    VizError::input("edges", format!("distance to {to} overflows"))
                })?;
                let old = table.dist[v];
                if old.map_or(true, |d| candidate < d) {
                    table.dist[v] = Some(candidate);
                    table.prev[v] = Some(u);
                    out.emit(
                        GraphStep::Relax,
                        format!(
                            "Relax {from}-{to}: {du} + {} = {candidate} < {}, update {to}",
                            edge.weight,
                            show(old)
                        ),
                        table.state(Some(u), Some((u, v))),
                    )?;
                } else {
                    out.emit(
                        GraphStep::Skip,
                        format!(
                            "Edge {from}-{to}: {du} + {} = {candidate} is not better than {}",
                            edge.weight,
                            show(old)
                        ),
                        table.state(Some(u), Some((u, v))),
                    )?;
                }
            }
        }

        let summary: Vec<String> = table
            .order
            .iter()
            .map(|&v| format!("{}={}", graph.label(v), show(table.dist[v])))
            .collect();
        let missing: Vec<String> = (0..n)
            .filter(|&v| !table.visited[v])
            .map(|v| graph.label(v).to_string())
            .collect();
        if missing.is_empty() {
            out.emit(
                GraphStep::Complete,
                format!("Shortest distances: {}", join(&summary)),
                table.state(None, None),
            )
        } else {
            out.emit(
                GraphStep::Unreachable,
                format!(
                    "Shortest distances: {}. Unreachable from {}: {}",
                    join(&summary),
                    query.start,
                    join(&missing)
                ),
                table.state(None, None),
            )
        }
    }
}
