//! headless — spawner, monitor and headless engine on a synthetic city.
//!
//! ```text
//! headless [spawner.toml] [duration_s]
//! ```
//!
//! Builds a 12 × 12 street grid with 150 m blocks, precomputes routes in
//! memory, then runs the periodic spawner for `duration_s` of sim time
//! (default one hour) and logs the population every simulated minute.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ts_core::{GeoPoint, NodeId, SimRng, SimTime};
use ts_engine::{HeadlessEngine, SimEngine};
use ts_graph::{DijkstraRouter, StreetGraph, StreetGraphBuilder};
use ts_routes::{destinations, CacheBuildConfig, RouteBuilder, RouteCache};
use ts_sim::{RunOutcome, SimBuilder, SimObserver};
use ts_spawner::{CityDataset, MonitorReport, SpawnReport, SpawnerConfig};

// ── Constants ─────────────────────────────────────────────────────────────────

const GRID_SIDE:          usize = 12;
const BLOCK_M:            f64   = 150.0;
const STREET_LENGTH:      usize = 4;    // blocks per named street segment
const ORIGIN_COUNT:       usize = 30;
const DEFAULT_DURATION_S: f64   = 3_600.0;
const LOG_EVERY_S:        f64   = 60.0;
const CENTRE: GeoPoint = GeoPoint { lat: 48.2082, lon: 16.3738 };

// ── Synthetic city ────────────────────────────────────────────────────────────

/// Square grid of two-way streets.  Every `STREET_LENGTH` blocks of a row or
/// column share one stroke id.
fn grid_city() -> StreetGraph {
    let mut b = StreetGraphBuilder::new();
    let mut ids = Vec::with_capacity(GRID_SIDE * GRID_SIDE);
    for row in 0..GRID_SIDE {
        let west = CENTRE.moved(180.0, row as f64 * BLOCK_M);
        for col in 0..GRID_SIDE {
            let osm_id = (row * GRID_SIDE + col) as u64 + 1;
            ids.push(b.add_node(osm_id, west.moved(90.0, col as f64 * BLOCK_M)));
        }
    }
    let at = |row: usize, col: usize| ids[row * GRID_SIDE + col];

    let mut stroke = 0u32;
    for row in 0..GRID_SIDE {
        for col in 0..GRID_SIDE - 1 {
            if col % STREET_LENGTH == 0 {
                stroke += 1;
            }
            b.add_street(at(row, col), at(row, col + 1), Some(stroke));
        }
    }
    for col in 0..GRID_SIDE {
        for row in 0..GRID_SIDE - 1 {
            if row % STREET_LENGTH == 0 {
                stroke += 1;
            }
            b.add_street(at(row, col), at(row + 1, col), Some(stroke));
        }
    }
    b.build()
}

fn build_cache(graph: &StreetGraph) -> Result<RouteCache> {
    let config = CacheBuildConfig { origin_count: ORIGIN_COUNT, ..CacheBuildConfig::default() };
    let mut rng = SimRng::new(config.seed);
    let origins = config.selector().select(graph, &mut rng);
    let all: Vec<NodeId> = graph.nodes().collect();
    let dests = destinations(&all, &origins);

    let builder = RouteBuilder::new(graph, DijkstraRouter).with_min_mission(config.min_mission_m);
    let mut cache = RouteCache::new();
    cache.build_all(&builder, &origins, &dests, config.workers)?;
    Ok(cache)
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Summary {
    spawned:    usize,
    rejected:   usize,
    retired:    usize,
    peak:       usize,
    stops:      usize,
    next_log_s: f64,
}

impl SimObserver for Summary {
    fn on_spawn(&mut self, _time: SimTime, report: &SpawnReport) {
        self.spawned += report.spawned;
        self.rejected += report.rejected;
    }

    fn on_monitor(&mut self, _time: SimTime, report: &MonitorReport) {
        self.retired += report.retired.len();
    }

    fn on_stop(&mut self, time: SimTime, runs: usize) {
        self.stops = runs;
        info!(%time, runs, "stop condition reached");
    }

    fn on_step_end(&mut self, time: SimTime, agents: usize) {
        self.peak = self.peak.max(agents);
        if time.secs() >= self.next_log_s {
            info!(%time, agents, spawned = self.spawned, retired = self.retired, "population");
            self.next_log_s += LOG_EVERY_S;
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SpawnerConfig::from_file(Path::new(&path))
            .with_context(|| format!("reading config {path}"))?,
        None => SpawnerConfig { initial_target_population: 40, ..SpawnerConfig::default() },
    };
    let duration_s = match args.next() {
        Some(s) => s.parse::<f64>().with_context(|| format!("bad duration {s}"))?,
        None => DEFAULT_DURATION_S,
    };

    // 1. City.
    let t0 = Instant::now();
    let graph = grid_city();
    let cache = build_cache(&graph)?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        routes = cache.len(),
        origins = cache.origins().len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "synthetic city ready"
    );
    let mut city = CityDataset::from_parts("Gridtown", graph, cache);
    city.centre = Some(CENTRE);

    // 2. Run.
    let mut sim = SimBuilder::new(HeadlessEngine::new(), config).city(city).build()?;
    let mut summary = Summary::default();
    let t1 = Instant::now();
    let outcome = sim.run_for(duration_s, &mut summary)?;

    // 3. Report.
    let stroke = sim.ctx.stroke_at(ts_core::AgentSlot(0), 0);
    info!(
        ?outcome,
        sim_time = %sim.engine.sim_time(),
        live = sim.engine.agent_count(),
        peak = summary.peak,
        spawned = summary.spawned,
        rejected = summary.rejected,
        retired = summary.retired,
        conflicts = sim.engine.conflict_count(),
        first_agent_stroke = ?stroke,
        wall_s = t1.elapsed().as_secs_f64(),
        "run finished"
    );
    if outcome == RunOutcome::Stopped {
        info!(runs = summary.stops, "run ended by stop condition");
    }
    Ok(())
}
