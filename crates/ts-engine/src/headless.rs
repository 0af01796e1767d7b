//! `HeadlessEngine` — a minimal in-process engine for tests and demos.
//!
//! Kinematics are deliberately simple: agents fly straight at their active
//! waypoint, turn instantly, slow to the waypoint's turn speed on final
//! approach to a turn point, and hold altitude.  Reaching the last waypoint
//! switches LNAV off; the agent then coasts along its last track.
//!
//! Conflict detection counts every distinct pair of agents that has ever
//! been closer than the protected-zone radius.

use rustc_hash::FxHashSet;
use tracing::debug;

use ts_core::{AgentId, AgentSlot, GeoPoint, SimTime};

use crate::{
    AgentSpec, EngineCommand, EngineError, EngineEvent, EngineResult, NavState, NavWaypoint,
    SimEngine, WaypointMode,
};

/// Default protected-zone radius, metres.
pub const DEFAULT_PZ_RADIUS_M: f64 = 32.0;

/// Distance to a turn waypoint inside which the agent flies at turn speed.
const TURN_APPROACH_M: f64 = 20.0;

/// Per-agent state in structure-of-arrays layout, indexed by `AgentSlot`.
#[derive(Default)]
struct AgentArrays {
    ids:        Vec<AgentId>,
    types:      Vec<String>,
    pos:        Vec<GeoPoint>,
    track_deg:  Vec<f64>,
    altitude_m: Vec<f64>,
    speed_mps:  Vec<f64>,
    lnav:       Vec<bool>,
    vnav:       Vec<bool>,
    plans:      Vec<Vec<NavWaypoint>>,
    active_wp:  Vec<usize>,
}

impl AgentArrays {
    fn len(&self) -> usize {
        self.ids.len()
    }

    fn push(&mut self, spec: AgentSpec) {
        self.ids.push(spec.id);
        self.types.push(spec.aircraft_type);
        self.pos.push(spec.pos);
        self.track_deg.push(spec.heading_deg);
        self.altitude_m.push(spec.altitude_m);
        self.speed_mps.push(spec.speed_mps);
        self.lnav.push(false);
        self.vnav.push(false);
        self.plans.push(Vec::new());
        self.active_wp.push(0);
    }

    fn remove(&mut self, i: usize) {
        self.ids.remove(i);
        self.types.remove(i);
        self.pos.remove(i);
        self.track_deg.remove(i);
        self.altitude_m.remove(i);
        self.speed_mps.remove(i);
        self.lnav.remove(i);
        self.vnav.remove(i);
        self.plans.remove(i);
        self.active_wp.remove(i);
    }

    fn clear(&mut self) {
        *self = AgentArrays::default();
    }
}

pub struct HeadlessEngine {
    time:        SimTime,
    paused:      bool,
    pz_radius_m: f64,
    agents:      AgentArrays,
    conflicts:   FxHashSet<(AgentId, AgentId)>,
    events:      Vec<EngineEvent>,
    commands:    Vec<EngineCommand>,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::with_protected_zone(DEFAULT_PZ_RADIUS_M)
    }

    pub fn with_protected_zone(pz_radius_m: f64) -> Self {
        Self {
            time: SimTime::ZERO,
            paused: false,
            pz_radius_m,
            agents: AgentArrays::default(),
            conflicts: FxHashSet::default(),
            events: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Run-control commands received so far (pause, delete-all, reset).
    pub fn command_log(&self) -> &[EngineCommand] {
        &self.commands
    }

    pub fn aircraft_type(&self, slot: AgentSlot) -> Option<&str> {
        self.agents.types.get(slot.index()).map(String::as_str)
    }

    /// Flight plan of `slot` in installation order.
    pub fn flight_plan(&self, slot: AgentSlot) -> Option<&[NavWaypoint]> {
        self.agents.plans.get(slot.index()).map(Vec::as_slice)
    }

    pub fn altitude_m(&self, slot: AgentSlot) -> Option<f64> {
        self.agents.altitude_m.get(slot.index()).copied()
    }

    /// Override an agent's track.  Lets tests stage navigation states.
    pub fn set_track(&mut self, slot: AgentSlot, track_deg: f64) -> EngineResult<()> {
        let i = self.check(slot)?;
        self.agents.track_deg[i] = track_deg;
        Ok(())
    }

    /// Move an agent without flying there.  Lets tests stage positions.
    pub fn teleport(&mut self, slot: AgentSlot, pos: GeoPoint) -> EngineResult<()> {
        let i = self.check(slot)?;
        self.agents.pos[i] = pos;
        Ok(())
    }

    fn check(&self, slot: AgentSlot) -> EngineResult<usize> {
        let i = slot.index();
        if i < self.agents.len() { Ok(i) } else { Err(EngineError::InvalidSlot(slot)) }
    }

    fn advance_agent(&mut self, i: usize, dt_s: f64) {
        let a = &mut self.agents;
        let active = a.active_wp[i];

        let target = if a.lnav[i] { a.plans[i].get(active).copied() } else { None };
        let Some(wp) = target else {
            a.pos[i] = a.pos[i].moved(a.track_deg[i], a.speed_mps[i] * dt_s);
            return;
        };

        let (brg, dist) = a.pos[i].bearing_and_distance(wp.pos);
        a.speed_mps[i] = match wp.mode {
            WaypointMode::Turn { turn_speed_mps } if dist < TURN_APPROACH_M => turn_speed_mps,
            _ => wp.speed_mps,
        };
        if a.vnav[i] {
            a.altitude_m[i] = wp.altitude_m;
        }
        if dist > 0.0 {
            a.track_deg[i] = brg;
        }

        let travel = a.speed_mps[i] * dt_s;
        if travel >= dist {
            a.pos[i] = wp.pos;
            if active + 1 < a.plans[i].len() {
                a.active_wp[i] = active + 1;
            } else {
                a.lnav[i] = false;
            }
        } else {
            a.pos[i] = a.pos[i].moved(brg, travel);
        }
    }

    fn detect_conflicts(&mut self) {
        let a = &self.agents;
        for i in 0..a.len() {
            for j in i + 1..a.len() {
                if a.pos[i].distance_m(a.pos[j]) < self.pz_radius_m {
                    let pair = if a.ids[i] < a.ids[j] { (a.ids[i], a.ids[j]) } else { (a.ids[j], a.ids[i]) };
                    self.conflicts.insert(pair);
                }
            }
        }
    }
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SimEngine for HeadlessEngine {
    fn sim_time(&self) -> SimTime {
        self.time
    }

    fn step(&mut self, dt_s: f64) -> EngineResult<()> {
        if self.paused {
            return Ok(());
        }
        for i in 0..self.agents.len() {
            self.advance_agent(i, dt_s);
        }
        self.detect_conflicts();
        self.time = self.time.offset(dt_s);
        Ok(())
    }

    fn agent_count(&self) -> usize {
        self.agents.len()
    }

    fn positions(&self) -> &[GeoPoint] {
        &self.agents.pos
    }

    fn create_agent(&mut self, spec: AgentSpec) -> EngineResult<AgentSlot> {
        if self.slot_of(spec.id).is_some() {
            return Err(EngineError::DuplicateAgent(spec.id));
        }
        let slot = AgentSlot(self.agents.len() as u32);
        let id = spec.id;
        self.agents.push(spec);
        self.events.push(EngineEvent::Created { id, slot });
        Ok(slot)
    }

    fn slot_of(&self, id: AgentId) -> Option<AgentSlot> {
        self.agents.ids.iter().position(|&x| x == id).map(|i| AgentSlot(i as u32))
    }

    fn agent_id(&self, slot: AgentSlot) -> Option<AgentId> {
        self.agents.ids.get(slot.index()).copied()
    }

    fn add_waypoint(&mut self, slot: AgentSlot, wp: NavWaypoint) -> EngineResult<()> {
        let i = self.check(slot)?;
        self.agents.plans[i].push(wp);
        Ok(())
    }

    fn compute_flight_plan(&mut self, slot: AgentSlot) -> EngineResult<()> {
        let i = self.check(slot)?;
        self.agents.active_wp[i] = 0;
        Ok(())
    }

    fn set_lnav(&mut self, slot: AgentSlot, on: bool) -> EngineResult<()> {
        let i = self.check(slot)?;
        self.agents.lnav[i] = on;
        Ok(())
    }

    fn set_vnav(&mut self, slot: AgentSlot, on: bool) -> EngineResult<()> {
        let i = self.check(slot)?;
        self.agents.vnav[i] = on;
        Ok(())
    }

    fn nav_state(&self, slot: AgentSlot) -> Option<NavState> {
        let i = self.check(slot).ok()?;
        let a = &self.agents;
        let plan = &a.plans[i];
        let active = a.active_wp[i];
        let (bearing_to_wp_deg, dist_to_wp_m) = match plan.get(active) {
            Some(wp) => a.pos[i].bearing_and_distance(wp.pos),
            None => (a.track_deg[i], 0.0),
        };
        Some(NavState {
            lnav: a.lnav[i],
            vnav: a.vnav[i],
            track_deg: a.track_deg[i],
            bearing_to_wp_deg,
            dist_to_wp_m,
            on_last_waypoint: !plan.is_empty() && active + 1 >= plan.len(),
        })
    }

    fn delete_agent(&mut self, id: AgentId) -> EngineResult<()> {
        let slot = self.slot_of(id).ok_or(EngineError::UnknownAgent(id))?;
        self.agents.remove(slot.index());
        self.events.push(EngineEvent::Deleted { id, slot });
        Ok(())
    }

    fn delete_all(&mut self) {
        self.commands.push(EngineCommand::DeleteAll);
        for i in (0..self.agents.len()).rev() {
            let id = self.agents.ids[i];
            self.events.push(EngineEvent::Deleted { id, slot: AgentSlot(i as u32) });
        }
        self.agents.clear();
    }

    fn pause(&mut self) {
        self.commands.push(EngineCommand::Pause);
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn reset(&mut self) {
        self.commands.push(EngineCommand::Reset);
        debug!(agents = self.agents.len(), time = %self.time, "headless engine reset");
        self.agents.clear();
        self.conflicts.clear();
        self.time = SimTime::ZERO;
        self.events.push(EngineEvent::Reset);
    }

    fn protected_zone_radius_m(&self) -> f64 {
        self.pz_radius_m
    }

    fn conflict_count(&self) -> u64 {
        self.conflicts.len() as u64
    }

    fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }
}
