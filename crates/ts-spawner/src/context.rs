//! `SpawnerContext` — everything the spawn and monitor callbacks share.

use tracing::{debug, info};

use ts_core::{AgentId, AgentSlot, SimRng};
use ts_engine::{EngineEvent, SimEngine};

use crate::{CityDataset, RouteEdgeArena, SpawnerConfig, SpawnerResult, StopCondition};

// ── SpawnerState ──────────────────────────────────────────────────────────────

/// Mutable run state.  Rebuilt from the config on every reset.
#[derive(Debug)]
pub struct SpawnerState {
    pub target_population: usize,
    pub altitude_m:        f64,
    pub speed_mps:         f64,
    pub turn_speed_mps:    f64,
    pub stop:              StopCondition,
    pub rng:               SimRng,
    next_agent_id:         u32,
}

impl SpawnerState {
    pub fn from_config(config: &SpawnerConfig, target_population: usize) -> Self {
        Self {
            target_population,
            altitude_m: config.altitude_m(),
            speed_mps: config.speed_mps(),
            turn_speed_mps: config.turn_speed_mps(),
            stop: config.stop,
            rng: SimRng::new(config.seed),
            next_agent_id: 1,
        }
    }

    /// Next agent id.  Ids start at 1 and are never reused before a reset.
    pub fn allocate_id(&mut self) -> AgentId {
        let id = AgentId(self.next_agent_id);
        self.next_agent_id += 1;
        id
    }

    pub fn peek_next_id(&self) -> AgentId {
        AgentId(self.next_agent_id)
    }
}

// ── SpawnerContext ────────────────────────────────────────────────────────────

/// Owned by the host and passed by `&mut` into
/// [`TrafficSpawner::tick`](crate::TrafficSpawner::tick) and
/// [`LifecycleMonitor::tick`](crate::LifecycleMonitor::tick).
///
/// Lifecycle: construct (optionally loading the default city), tick
/// repeatedly, reset on an engine reset, drop.
pub struct SpawnerContext {
    pub(crate) config: SpawnerConfig,
    pub(crate) state:  SpawnerState,
    pub(crate) city:   Option<CityDataset>,
    pub(crate) arena:  RouteEdgeArena,
}

impl SpawnerContext {
    /// A context with no city loaded.
    pub fn new(config: SpawnerConfig) -> Self {
        let state = SpawnerState::from_config(&config, config.initial_target_population);
        Self { config, state, city: None, arena: RouteEdgeArena::new() }
    }

    /// A context with `config.default_city` loaded from `config.data_root`.
    pub fn with_default_city(config: SpawnerConfig) -> SpawnerResult<Self> {
        let mut ctx = Self::new(config);
        if let Some(name) = ctx.config.default_city.clone() {
            ctx.load_city(&name)?;
        }
        Ok(ctx)
    }

    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    pub fn state(&self) -> &SpawnerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SpawnerState {
        &mut self.state
    }

    pub fn city(&self) -> Option<&CityDataset> {
        self.city.as_ref()
    }

    pub fn arena(&self) -> &RouteEdgeArena {
        &self.arena
    }

    /// Replace the active city.  Edge tags of agents already flying refer to
    /// the old graph and are dropped; the agents themselves are left alone.
    pub fn set_city(&mut self, city: CityDataset) {
        info!(city = %city.name, routes = city.cache.len(), "active city set");
        self.arena.forget_routes();
        self.city = Some(city);
    }

    /// Load `name` from the data root and make it active.  On failure the
    /// previous city stays active.
    pub fn load_city(&mut self, name: &str) -> SpawnerResult<()> {
        let city = CityDataset::load(&self.config.data_root, name)?;
        self.set_city(city);
        Ok(())
    }

    /// Reinitialise the run state from the config and drop all per-agent
    /// data.  The loaded city is kept.
    pub fn reset(&mut self) {
        self.state = SpawnerState::from_config(&self.config, self.config.target_population);
        self.arena.clear();
        debug!(target = self.state.target_population, "spawner state reset");
    }

    /// Apply pending engine events.  A reset event resets the context.
    pub fn sync<E: SimEngine + ?Sized>(&mut self, engine: &mut E) {
        for event in engine.drain_events() {
            match event {
                EngineEvent::Reset => self.reset(),
                other => self.arena.apply(other),
            }
        }
    }

    /// Street-group id of the edge route waypoint `waypoint` of `slot` lies
    /// on.  `None` if unknown or the dataset has no street groups.
    pub fn stroke_at(&self, slot: AgentSlot, waypoint: usize) -> Option<u32> {
        let edge = self.arena.edge_at(slot, waypoint)?;
        self.city.as_ref()?.graph.stroke_of(edge)
    }
}
