//! Per-agent route-edge storage kept in lockstep with the engine's slots.

use ts_core::{AgentSlot, EdgeKey};
use ts_engine::EngineEvent;

/// The edge tag of every route waypoint of every live agent, indexed by
/// engine slot.
///
/// Agents the spawner did not create get an empty entry.  The arena is only
/// correct after every [`EngineEvent`] has been applied in order.
#[derive(Debug, Default)]
pub struct RouteEdgeArena {
    edges: Vec<Vec<EdgeKey>>,
}

impl RouteEdgeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn apply(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Created { slot, .. } => {
                let i = slot.index();
                if i >= self.edges.len() {
                    self.edges.resize_with(i + 1, Vec::new);
                } else {
                    self.edges.insert(i, Vec::new());
                }
            }
            EngineEvent::Deleted { slot, .. } => {
                if slot.index() < self.edges.len() {
                    self.edges.remove(slot.index());
                }
            }
            EngineEvent::Reset => self.clear(),
        }
    }

    /// Store the edge sequence of the agent at `slot`.
    pub fn set(&mut self, slot: AgentSlot, edges: Vec<EdgeKey>) {
        let i = slot.index();
        if i >= self.edges.len() {
            self.edges.resize_with(i + 1, Vec::new);
        }
        self.edges[i] = edges;
    }

    /// Edge sequence of `slot`; empty for unknown slots.
    pub fn get(&self, slot: AgentSlot) -> &[EdgeKey] {
        self.edges.get(slot.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Edge that route waypoint `waypoint` of `slot` was taken from.
    pub fn edge_at(&self, slot: AgentSlot, waypoint: usize) -> Option<EdgeKey> {
        self.get(slot).get(waypoint).copied()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
    }

    /// Empty every entry but keep one per slot.
    pub fn forget_routes(&mut self) {
        self.edges.iter_mut().for_each(Vec::clear);
    }
}
