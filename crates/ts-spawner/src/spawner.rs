//! `TrafficSpawner` — tops the live population up to its target.
//!
//! # One tick
//!
//! ```text
//! while live < target and attempts < budget:
//!     (o, d)  ← random cached origin, random cached destination of o
//!     route   ← cache[o, d]                       (miss = consistency error)
//!     if some live agent is within factor × PZ of route start:
//!         attempts += 1; continue                 (reject)
//!     attempts ← 0
//!     create agent at waypoint 0, heading towards waypoint 1
//!     install waypoints 1..n, compute flight plan, LNAV + VNAV on
//! ```

use tracing::{debug, error};

use ts_engine::{AgentSpec, NavWaypoint, SimEngine, WaypointMode};
use ts_routes::Route;

use crate::{SpawnerContext, SpawnerError, SpawnerResult, SpawnerState};

/// Outcome of one [`TrafficSpawner::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpawnReport {
    pub spawned: usize,
    /// Candidates rejected for being too close to live traffic.
    pub rejected: usize,
    /// The tick ended because the attempt budget ran out.
    pub budget_exhausted: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TrafficSpawner;

impl TrafficSpawner {
    pub fn new() -> Self {
        Self
    }

    pub fn tick<E: SimEngine + ?Sized>(
        &self,
        ctx:    &mut SpawnerContext,
        engine: &mut E,
    ) -> SpawnerResult<SpawnReport> {
        ctx.sync(engine);
        let mut report = SpawnReport::default();

        let SpawnerContext { config, state, city, arena } = ctx;
        let Some(city) = city.as_ref() else {
            debug!("no city loaded, nothing to spawn");
            return Ok(report);
        };
        if city.cache.is_empty() {
            debug!(city = %city.name, "route cache is empty, nothing to spawn");
            return Ok(report);
        }

        let clearance_m = config.separation_factor * engine.protected_zone_radius_m();
        let mut attempts = 0;

        while engine.agent_count() < state.target_population {
            if attempts >= config.max_attempts_per_tick {
                report.budget_exhausted = true;
                break;
            }

            let Some((origin, destination)) = city.cache.sample(&mut state.rng) else { break };
            let Some(route) = city.cache.get(origin, destination).filter(|r| r.len() >= 2) else {
                error!(%origin, %destination, city = %city.name, "sampled pair has no usable route");
                return Err(SpawnerError::CacheInconsistent { origin, destination });
            };

            let start = route.waypoints[0].pos;
            if engine.positions().iter().any(|p| p.distance_m(start) < clearance_m) {
                attempts += 1;
                report.rejected += 1;
                continue;
            }
            attempts = 0;

            let slot = launch(engine, state, &config.aircraft_type, route)?;
            for event in engine.drain_events() {
                arena.apply(event);
            }
            arena.set(slot, route.edges().collect());
            report.spawned += 1;
        }

        debug!(
            spawned = report.spawned,
            rejected = report.rejected,
            live = engine.agent_count(),
            target = state.target_population,
            "spawn tick"
        );
        Ok(report)
    }
}

/// Create one agent for `route` and install its flight plan.
fn launch<E: SimEngine + ?Sized>(
    engine:        &mut E,
    state:         &mut SpawnerState,
    aircraft_type: &str,
    route:         &Route,
) -> SpawnerResult<ts_core::AgentSlot> {
    let first = route.waypoints[0].pos;
    let heading_deg = route.initial_heading().unwrap_or(0.0);

    let slot = engine.create_agent(AgentSpec {
        id: state.allocate_id(),
        aircraft_type: aircraft_type.to_owned(),
        pos: first,
        heading_deg,
        altitude_m: state.altitude_m,
        speed_mps: state.speed_mps,
    })?;

    for wp in &route.waypoints[1..] {
        let mode = if wp.turn {
            WaypointMode::Turn { turn_speed_mps: state.turn_speed_mps }
        } else {
            WaypointMode::FlyBy
        };
        engine.add_waypoint(slot, NavWaypoint {
            pos: wp.pos,
            altitude_m: state.altitude_m,
            speed_mps: state.speed_mps,
            mode,
        })?;
    }

    engine.compute_flight_plan(slot)?;
    engine.set_lnav(slot, true)?;
    engine.set_vnav(slot, true)?;
    Ok(slot)
}
