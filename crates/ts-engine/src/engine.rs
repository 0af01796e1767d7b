//! The `SimEngine` trait: the boundary between the spawner and whatever
//! simulation engine owns the live agents.

use ts_core::{AgentId, AgentSlot, GeoPoint, SimTime};

use crate::{AgentSpec, EngineEvent, EngineResult, NavState, NavWaypoint};

/// Operations the spawner and lifecycle monitor need from an engine.
///
/// Agents live in dense per-agent arrays inside the engine.  An agent's
/// [`AgentSlot`] is its position in those arrays; deleting an agent shifts
/// every later agent down one slot.  Code that keeps its own per-slot data
/// must apply [`drain_events`](Self::drain_events) before touching it.
pub trait SimEngine {
    /// Current simulation time.
    fn sim_time(&self) -> SimTime;

    /// Advance the engine by `dt_s` seconds.  A paused engine does not move.
    fn step(&mut self, dt_s: f64) -> EngineResult<()>;

    /// Number of live agents.
    fn agent_count(&self) -> usize;

    /// Position of every live agent, indexed by slot.
    fn positions(&self) -> &[GeoPoint];

    /// Create an agent and return the slot it was placed in.
    fn create_agent(&mut self, spec: AgentSpec) -> EngineResult<AgentSlot>;

    fn slot_of(&self, id: AgentId) -> Option<AgentSlot>;

    fn agent_id(&self, slot: AgentSlot) -> Option<AgentId>;

    /// Append a waypoint to the agent's flight plan.
    fn add_waypoint(&mut self, slot: AgentSlot, wp: NavWaypoint) -> EngineResult<()>;

    /// Finalise the flight plan after the last `add_waypoint`.
    fn compute_flight_plan(&mut self, slot: AgentSlot) -> EngineResult<()>;

    fn set_lnav(&mut self, slot: AgentSlot, on: bool) -> EngineResult<()>;

    fn set_vnav(&mut self, slot: AgentSlot, on: bool) -> EngineResult<()>;

    fn nav_state(&self, slot: AgentSlot) -> Option<NavState>;

    fn delete_agent(&mut self, id: AgentId) -> EngineResult<()>;

    fn delete_all(&mut self);

    /// Hold the simulation; [`step`](Self::step) becomes a no-op.
    fn pause(&mut self);

    fn resume(&mut self);

    fn is_paused(&self) -> bool;

    /// Remove all agents and return clock and counters to zero.  The run
    /// state (paused or not) is left as it is.
    fn reset(&mut self);

    /// Radius of the protected zone around each agent, metres.
    fn protected_zone_radius_m(&self) -> f64;

    /// Cumulative number of distinct conflict pairs since the last reset.
    fn conflict_count(&self) -> u64;

    /// Take the create/delete/reset events emitted since the last call, in
    /// the order they happened.
    fn drain_events(&mut self) -> Vec<EngineEvent>;
}
