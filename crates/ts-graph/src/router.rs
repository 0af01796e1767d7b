//! Shortest-path trait and default Dijkstra implementation.
//!
//! Route synthesis calls routing through the [`Router`] trait so an A* or
//! contraction-hierarchy router can be dropped in for very large cities.
//!
//! # Cost
//!
//! The weight of an edge is its length in metres.  Among parallel edges the
//! shortest one wins automatically, and the chosen `EdgeId` is reported so
//! callers read the geometry of the edge actually travelled.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use ts_core::{EdgeId, NodeId};

use crate::network::StreetGraph;
use crate::{GraphError, GraphResult};

// ── ShortestPath ──────────────────────────────────────────────────────────────

/// Result of a shortest-path query.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// Visited nodes in order, `from` first and `to` last.
    pub nodes: Vec<NodeId>,
    /// Edges traversed; `edges[i]` joins `nodes[i]` to `nodes[i + 1]`.
    pub edges: Vec<EdgeId>,
    /// Sum of edge lengths in metres.
    pub length_m: f64,
}

impl ShortestPath {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// Implementations must be `Send + Sync`: the route cache builder shares one
/// router across all rayon workers.
pub trait Router: Send + Sync {
    /// Shortest path by length from `from` to `to`.
    ///
    /// `from == to` yields a trivial path.  Unreachable `to` yields
    /// [`GraphError::NoPath`].
    fn shortest_path(
        &self,
        graph: &StreetGraph,
        from: NodeId,
        to: NodeId,
    ) -> GraphResult<ShortestPath>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra over the CSR street graph, weighted by `edge_length_m`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn shortest_path(
        &self,
        graph: &StreetGraph,
        from: NodeId,
        to: NodeId,
    ) -> GraphResult<ShortestPath> {
        dijkstra(graph, from, to)
    }
}

fn dijkstra(graph: &StreetGraph, from: NodeId, to: NodeId) -> GraphResult<ShortestPath> {
    for node in [from, to] {
        if !graph.contains(node) {
            return Err(GraphError::NodeNotFound(node));
        }
    }
    if from == to {
        return Ok(ShortestPath { nodes: vec![from], edges: vec![], length_m: 0.0 });
    }

    let n = graph.node_count();
    let mut dist      = vec![f64::INFINITY; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    // Secondary key NodeId gives deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(0.0), from)));

    while let Some(Reverse((OrderedFloat(cost), node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(graph, &prev_edge, from, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in graph.out_edges(node) {
            let neighbor = graph.edge_to[edge.index()];
            let new_cost = cost + graph.edge_length_m[edge.index()];

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((OrderedFloat(new_cost), neighbor)));
            }
        }
    }

    Err(GraphError::NoPath { from, to })
}

fn reconstruct(
    graph: &StreetGraph,
    prev_edge: &[EdgeId],
    from: NodeId,
    to: NodeId,
    length_m: f64,
) -> ShortestPath {
    let mut edges = Vec::new();
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        edges.push(e);
        cur = graph.edge_from[e.index()];
    }
    edges.reverse();

    let mut nodes = Vec::with_capacity(edges.len() + 1);
    nodes.push(from);
    nodes.extend(edges.iter().map(|e| graph.edge_to[e.index()]));

    ShortestPath { nodes, edges, length_m }
}
