//! Plain data exchanged across the engine boundary.

use ts_core::{AgentId, AgentSlot, GeoPoint};

/// Everything the engine needs to create one agent.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentSpec {
    pub id:            AgentId,
    /// Vehicle type understood by the engine's performance model, e.g. `M600`.
    pub aircraft_type: String,
    pub pos:           GeoPoint,
    pub heading_deg:   f64,
    pub altitude_m:    f64,
    pub speed_mps:     f64,
}

/// How the agent passes a waypoint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum WaypointMode {
    /// Slow to `turn_speed_mps` and turn at the point.
    Turn { turn_speed_mps: f64 },
    /// Cut the corner without slowing down.
    FlyBy,
}

impl WaypointMode {
    #[inline]
    pub fn is_turn(self) -> bool {
        matches!(self, WaypointMode::Turn { .. })
    }
}

/// A navigation target appended to an agent's flight plan.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NavWaypoint {
    pub pos:        GeoPoint,
    pub altitude_m: f64,
    pub speed_mps:  f64,
    pub mode:       WaypointMode,
}

/// Snapshot of an agent's navigation state, as read by the lifecycle monitor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NavState {
    /// Lateral navigation engaged (following the flight plan).
    pub lnav:             bool,
    pub vnav:             bool,
    pub track_deg:        f64,
    /// Bearing from the agent to its active waypoint.
    pub bearing_to_wp_deg: f64,
    /// Distance from the agent to its active waypoint, metres.
    pub dist_to_wp_m:     f64,
    /// The active waypoint is the last one of the plan.
    pub on_last_waypoint: bool,
}

/// Change notifications used to keep per-agent extension arrays in lockstep
/// with the engine's slot layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EngineEvent {
    /// A new agent now occupies `slot` (always the current end).
    Created { id: AgentId, slot: AgentSlot },
    /// The agent at `slot` was removed; every higher slot moved down by one.
    Deleted { id: AgentId, slot: AgentSlot },
    /// All agents were removed and the engine returned to its initial state.
    Reset,
}

/// Run-control commands, as recorded by engines that keep a command log.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EngineCommand {
    Pause,
    DeleteAll,
    Reset,
}
