//! Greedy rejection sampling of well-separated origin nodes.

use tracing::debug;

use ts_core::{NodeId, SimRng};
use ts_graph::StreetGraph;

/// Samples origins so that every accepted pair is at least
/// `min_separation_m` apart.
///
/// Candidates are drawn uniformly at random (with replacement).  Each
/// rejection bumps a failure counter that resets on acceptance; sampling stops
/// after `count` acceptances or `max_attempts` consecutive rejections, so the
/// result may hold fewer than `count` nodes.  No backtracking.
#[derive(Clone, Debug)]
pub struct OriginSelector {
    pub count:            usize,
    pub min_separation_m: f64,
    pub max_attempts:     usize,
}

impl Default for OriginSelector {
    fn default() -> Self {
        Self { count: 200, min_separation_m: 300.0, max_attempts: 100 }
    }
}

impl OriginSelector {
    /// Sample from every node in the graph.
    pub fn select(&self, graph: &StreetGraph, rng: &mut SimRng) -> Vec<NodeId> {
        let all: Vec<NodeId> = graph.nodes().collect();
        self.select_from(graph, &all, rng)
    }

    /// Sample from a caller-supplied candidate pool.  Pool entries that are
    /// not graph nodes are ignored.
    pub fn select_from(&self, graph: &StreetGraph, pool: &[NodeId], rng: &mut SimRng) -> Vec<NodeId> {
        let pool: Vec<NodeId> = pool.iter().copied().filter(|&n| graph.contains(n)).collect();
        let mut accepted: Vec<NodeId> = Vec::with_capacity(self.count.min(pool.len()));
        let mut failures = 0;

        while accepted.len() < self.count && failures < self.max_attempts {
            let Some(&candidate) = rng.choose(&pool) else { break };
            let pos = graph.node_pos[candidate.index()];

            let separated = !accepted.contains(&candidate)
                && accepted
                    .iter()
                    .all(|a| pos.distance_m(graph.node_pos[a.index()]) >= self.min_separation_m);

            if separated {
                accepted.push(candidate);
                failures = 0;
            } else {
                failures += 1;
            }
        }

        debug!(
            requested = self.count,
            accepted = accepted.len(),
            pool = pool.len(),
            "origin selection finished"
        );
        accepted
    }
}

/// Candidates that are not origins, in candidate order.
pub fn destinations(candidates: &[NodeId], origins: &[NodeId]) -> Vec<NodeId> {
    let taken: rustc_hash::FxHashSet<NodeId> = origins.iter().copied().collect();
    candidates.iter().copied().filter(|n| !taken.contains(n)).collect()
}
