//! Route synthesis: shortest path → merged street polyline → turn tags.
//!
//! # Algorithm
//!
//! 1. Pairs closer than `min_mission_m` (straight line) are not worth
//!    flying and yield `Ok(None)`.
//! 2. Shortest path by length through the street graph.
//! 3. The geometries of the path's edges are concatenated in order.  Each
//!    edge after the first drops its leading point, which duplicates the
//!    previous edge's last point.
//! 4. Every merged point is tagged with the `EdgeKey` it came from.
//! 5. Turn classification, see [`classify_turns`].

use ts_core::{turn_angle, GeoPoint, NodeId};
use ts_graph::{Router, StreetGraph};

use crate::{Route, RoutesError, RoutesResult, Waypoint};

/// Bearing change above which an interior point is a hard turn.
pub const TURN_THRESHOLD_DEG: f64 = 25.0;

/// Minimum straight-line origin → destination distance worth a route.
pub const DEFAULT_MIN_MISSION_M: f64 = 1_000.0;

/// Builds [`Route`]s over one street graph.
///
/// Borrows the graph immutably and is `Sync` whenever the router is, so one
/// builder is shared by every cache-build worker.
pub struct RouteBuilder<'g, R: Router> {
    graph:         &'g StreetGraph,
    router:        R,
    min_mission_m: f64,
}

impl<'g, R: Router> RouteBuilder<'g, R> {
    pub fn new(graph: &'g StreetGraph, router: R) -> Self {
        Self { graph, router, min_mission_m: DEFAULT_MIN_MISSION_M }
    }

    pub fn with_min_mission(mut self, min_mission_m: f64) -> Self {
        self.min_mission_m = min_mission_m;
        self
    }

    pub fn graph(&self) -> &'g StreetGraph {
        self.graph
    }

    pub fn min_mission_m(&self) -> f64 {
        self.min_mission_m
    }

    /// Build the route from `origin` to `destination`.
    ///
    /// `Ok(None)` when the pair is closer than the minimum mission distance.
    pub fn build(&self, origin: NodeId, destination: NodeId) -> RoutesResult<Option<Route>> {
        let from = self.graph.node_pos(origin)?;
        let to = self.graph.node_pos(destination)?;
        if from.distance_m(to) < self.min_mission_m {
            return Ok(None);
        }

        let path = self.router.shortest_path(self.graph, origin, destination)?;

        let mut points = Vec::new();
        let mut tags = Vec::new();
        for (i, &edge) in path.edges.iter().enumerate() {
            let key = self.graph.edge_key(edge);
            let skip = usize::from(i > 0);
            for &p in self.graph.edge_geometry(edge).iter().skip(skip) {
                points.push(p);
                tags.push(key);
            }
        }

        if points.len() < 2 {
            return Err(RoutesError::DegenerateRoute {
                origin,
                destination,
                points: points.len(),
            });
        }

        let waypoints = classify_turns(&points)
            .into_iter()
            .zip(points)
            .zip(tags)
            .map(|((turn, pos), edge)| Waypoint { pos, edge, turn })
            .collect();

        Ok(Some(Route { origin, destination, waypoints }))
    }
}

/// Turn flag for every point of a polyline.
///
/// The first and last points are always turns.  An interior point is a turn
/// iff the change between the incoming and outgoing segment bearings,
/// reduced into `[0°, 180°]`, is strictly greater than
/// [`TURN_THRESHOLD_DEG`].
pub fn classify_turns(points: &[GeoPoint]) -> Vec<bool> {
    let n = points.len();
    (0..n)
        .map(|i| {
            if i == 0 || i + 1 == n {
                return true;
            }
            let inbound = points[i - 1].bearing_deg(points[i]);
            let outbound = points[i].bearing_deg(points[i + 1]);
            turn_angle(inbound, outbound) > TURN_THRESHOLD_DEG
        })
        .collect()
}
