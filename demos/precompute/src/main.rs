//! precompute — build and save the route cache for one city.
//!
//! ```text
//! precompute <city_dir> [cache_build.toml]
//! ```
//!
//! Reads `nodes.csv`/`edges.csv` (and `spawn_points.csv` when present) from
//! `<city_dir>`, selects separated origins, builds every origin→destination
//! route in parallel and writes `<city_dir>/cache/`.  An existing cache is
//! extended, never overwritten.  The cache is saved every `checkpoint_every`
//! origins, so an interrupted run resumes from its last save.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ts_core::{NodeId, SimRng};
use ts_graph::{load_graph_dir, load_node_pool, DijkstraRouter};
use ts_routes::{destinations, CacheBuildConfig, RouteBuilder, RouteCache};

const CACHE_DIR:         &str = "cache";
const SPAWN_POINTS_FILE: &str = "spawn_points.csv";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(city_dir) = args.next().map(PathBuf::from) else {
        bail!("usage: precompute <city_dir> [cache_build.toml]");
    };
    let config = match args.next() {
        Some(path) => CacheBuildConfig::from_file(Path::new(&path))
            .with_context(|| format!("reading config {path}"))?,
        None => CacheBuildConfig::default(),
    };
    info!(?config, city = %city_dir.display(), "precompute starting");

    // 1. Street graph and optional spawn-point pool.
    let t0 = Instant::now();
    let graph = load_graph_dir(&city_dir)
        .with_context(|| format!("loading street graph from {}", city_dir.display()))?;
    let pool_path = city_dir.join(SPAWN_POINTS_FILE);
    let pool = if pool_path.is_file() {
        let file = std::fs::File::open(&pool_path)?;
        Some(load_node_pool(file, &graph).context("reading spawn points")?)
    } else {
        None
    };
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        pool = pool.as_ref().map(Vec::len),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "graph loaded"
    );

    // 2. Origins and destinations.
    let mut rng = SimRng::new(config.seed);
    let selector = config.selector();
    let origins = match &pool {
        Some(pool) => selector.select_from(&graph, pool, &mut rng),
        None => selector.select(&graph, &mut rng),
    };
    let candidates: Vec<NodeId> = match pool {
        Some(pool) => pool,
        None => graph.nodes().collect(),
    };
    let dests = destinations(&candidates, &origins);
    info!(origins = origins.len(), destinations = dests.len(), "endpoints selected");

    // 3. Build, extending any cache already on disk.
    let cache_dir = city_dir.join(CACHE_DIR);
    let mut cache = if RouteCache::exists(&cache_dir) {
        RouteCache::load(&cache_dir, &graph).context("loading existing route cache")?
    } else {
        RouteCache::new()
    };

    let t1 = Instant::now();
    let builder = RouteBuilder::new(&graph, DijkstraRouter).with_min_mission(config.min_mission_m);
    let report = cache.build_in_chunks(
        &builder,
        &origins,
        &dests,
        config.workers,
        config.checkpoint_every,
        |partial| partial.save(&cache_dir, &graph),
    )?;
    info!(
        built = report.built,
        skipped_short = report.skipped_short,
        failed = report.failed,
        already_cached = report.already_cached,
        elapsed_s = t1.elapsed().as_secs_f64(),
        "routes built"
    );

    if !RouteCache::exists(&cache_dir) {
        cache.save(&cache_dir, &graph)?;
    }
    info!(routes = cache.len(), dir = %cache_dir.display(), "done");
    Ok(())
}
