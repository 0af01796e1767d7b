//! `LifecycleMonitor` — retires finished agents and enforces the stop
//! condition.

use tracing::{debug, info};

use ts_core::{wrap_180, AgentId, AgentSlot};
use ts_engine::{NavState, SimEngine};

use crate::{SpawnerContext, SpawnerResult};

/// Heading error below which an agent still counts as flying at its last
/// waypoint.
pub const RETIRE_HEADING_TOLERANCE_DEG: f64 = 10.0;

/// Distance above which an agent still counts as short of its last waypoint.
pub const RETIRE_MIN_DISTANCE_M: f64 = 5.0;

/// Outcome of one [`LifecycleMonitor::tick`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MonitorReport {
    pub retired: Vec<AgentId>,
    /// The stop condition fired: the engine was paused, cleared and reset.
    pub stopped: bool,
}

/// `true` if an agent in this state has finished its route.
///
/// LNAV off, on the last waypoint, and not still closing on it (heading
/// error under [`RETIRE_HEADING_TOLERANCE_DEG`] with more than
/// [`RETIRE_MIN_DISTANCE_M`] to go).
pub fn should_retire(nav: &NavState) -> bool {
    let closing = wrap_180(nav.track_deg - nav.bearing_to_wp_deg).abs()
        < RETIRE_HEADING_TOLERANCE_DEG
        && nav.dist_to_wp_m > RETIRE_MIN_DISTANCE_M;
    !nav.lnav && nav.on_last_waypoint && !closing
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LifecycleMonitor;

impl LifecycleMonitor {
    pub fn new() -> Self {
        Self
    }

    pub fn tick<E: SimEngine + ?Sized>(
        &self,
        ctx:    &mut SpawnerContext,
        engine: &mut E,
    ) -> SpawnerResult<MonitorReport> {
        ctx.sync(engine);
        let mut report = MonitorReport::default();

        for i in 0..engine.agent_count() {
            let slot = AgentSlot(i as u32);
            if let (Some(nav), Some(id)) = (engine.nav_state(slot), engine.agent_id(slot)) {
                if should_retire(&nav) {
                    report.retired.push(id);
                }
            }
        }
        for &id in &report.retired {
            engine.delete_agent(id)?;
        }
        if !report.retired.is_empty() {
            debug!(count = report.retired.len(), "retired agents");
        }

        let now = engine.sim_time();
        let conflicts = engine.conflict_count();
        if ctx.state.stop.triggered(now, conflicts) {
            info!(time = %now, conflicts, stop = ?ctx.state.stop, "stop condition reached");
            engine.pause();
            engine.delete_all();
            engine.reset();
            report.stopped = true;
        }

        ctx.sync(engine);
        Ok(report)
    }
}
