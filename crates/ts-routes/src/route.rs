//! Route and waypoint types.

use serde::{Deserialize, Serialize};

use ts_core::{EdgeKey, GeoPoint, NodeId};

/// One point of a synthesised route.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub pos: GeoPoint,
    /// Street edge this point was taken from.
    pub edge: EdgeKey,
    /// `true` = hard turn (slow down, turn at the point);
    /// `false` = fly-by (pass through smoothly).
    pub turn: bool,
}

/// Ordered waypoints from `origin` to `destination`.
///
/// A built route always has at least two waypoints and its first and last
/// waypoints are turns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub origin:      NodeId,
    pub destination: NodeId,
    pub waypoints:   Vec<Waypoint>,
}

impl Route {
    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Position of the first waypoint (where the agent is created).
    pub fn start(&self) -> Option<GeoPoint> {
        self.waypoints.first().map(|w| w.pos)
    }

    /// Bearing from the first to the second waypoint.  `None` for routes with
    /// fewer than two waypoints.
    pub fn initial_heading(&self) -> Option<f64> {
        match self.waypoints.as_slice() {
            [a, b, ..] => Some(a.pos.bearing_deg(b.pos)),
            _ => None,
        }
    }

    /// Edge tag of every waypoint, in order.  Consecutive waypoints on the
    /// same edge repeat the key.
    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.waypoints.iter().map(|w| w.edge)
    }

    pub fn turn_count(&self) -> usize {
        self.waypoints.iter().filter(|w| w.turn).count()
    }
}
