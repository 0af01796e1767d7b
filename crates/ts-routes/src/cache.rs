//! The route cache: parallel offline build, O(1) sampling, persistence.
//!
//! # On-disk layout
//!
//! ```text
//! <dir>/routes.bin   bincode Vec<Route>, sorted by (origin, destination)
//! <dir>/index.bin    bincode BTreeMap<origin, sorted Vec<destination>>
//! <dir>/nodes.bin    bincode Vec<u64>, external node id of every saved NodeId
//! ```
//!
//! Dense `NodeId`s depend on the row order of `nodes.csv`, so the saved ids
//! are translated through `nodes.bin` into the ids of the graph the cache is
//! loaded against.  A saved node or edge missing from that graph rejects the
//! cache.
//!
//! The index is redundant; it is rebuilt from the records on load and the
//! two must agree, otherwise the cache is rejected as corrupt.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use ts_core::{EdgeKey, NodeId, SimRng};
use ts_graph::{Router, StreetGraph};

use crate::{Route, RouteBuilder, RoutesError, RoutesResult};

pub const ROUTES_FILE: &str = "routes.bin";
pub const INDEX_FILE: &str = "index.bin";
pub const NODES_FILE: &str = "nodes.bin";

/// How far a loaded route's first and last waypoints may lie from its
/// origin and destination nodes.
const ENDPOINT_TOLERANCE_M: f64 = 1.0;

// ── BuildReport ───────────────────────────────────────────────────────────────

/// Outcome counts of one [`RouteCache::build_all`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Routes built and inserted by this call.
    pub built: usize,
    /// Pairs closer than the minimum mission distance.
    pub skipped_short: usize,
    /// Pairs that failed to route (logged).
    pub failed: usize,
    /// Pairs already present before the call.
    pub already_cached: usize,
}

impl BuildReport {
    pub fn pairs(&self) -> usize {
        self.built + self.skipped_short + self.failed + self.already_cached
    }

    fn absorb(&mut self, other: BuildReport) {
        self.built += other.built;
        self.skipped_short += other.skipped_short;
        self.failed += other.failed;
        self.already_cached += other.already_cached;
    }
}

// ── RouteCache ────────────────────────────────────────────────────────────────

/// Write-once map `(origin, destination) → Route` with a per-origin index.
///
/// The index keeps destinations sorted per origin and origins sorted, so a
/// seeded [`sample`](Self::sample) is reproducible for a given cache.
#[derive(Debug, Default)]
pub struct RouteCache {
    routes:  FxHashMap<(NodeId, NodeId), Route>,
    index:   BTreeMap<NodeId, Vec<NodeId>>,
    origins: Vec<NodeId>,
}

impl RouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn contains(&self, origin: NodeId, destination: NodeId) -> bool {
        self.routes.contains_key(&(origin, destination))
    }

    pub fn get(&self, origin: NodeId, destination: NodeId) -> Option<&Route> {
        self.routes.get(&(origin, destination))
    }

    /// Origins with at least one cached destination, ascending.
    pub fn origins(&self) -> &[NodeId] {
        &self.origins
    }

    /// Cached destinations of `origin`, ascending.  Empty if none.
    pub fn destinations_of(&self, origin: NodeId) -> &[NodeId] {
        self.index.get(&origin).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All routes in `(origin, destination)` order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> + '_ {
        self.index.iter().flat_map(move |(&o, dests)| {
            dests.iter().filter_map(move |&d| self.routes.get(&(o, d)))
        })
    }

    /// Insert a route unless its pair is already cached.  Returns `false`
    /// (and leaves the existing entry untouched) on a duplicate.
    pub fn insert(&mut self, route: Route) -> bool {
        let key = (route.origin, route.destination);
        if self.routes.contains_key(&key) {
            return false;
        }

        let dests = self.index.entry(route.origin).or_default();
        if dests.is_empty() {
            if let Err(pos) = self.origins.binary_search(&route.origin) {
                self.origins.insert(pos, route.origin);
            }
        }
        if let Err(pos) = dests.binary_search(&route.destination) {
            dests.insert(pos, route.destination);
        }

        self.routes.insert(key, route);
        true
    }

    /// Uniformly random origin among those with routes, then a uniformly
    /// random cached destination of it.  `None` for an empty cache.
    pub fn sample(&self, rng: &mut SimRng) -> Option<(NodeId, NodeId)> {
        let &origin = rng.choose(self.origins.as_slice())?;
        let &destination = rng.choose(self.destinations_of(origin))?;
        Some((origin, destination))
    }

    // ── Parallel build ────────────────────────────────────────────────────

    /// Build every `origins × destinations` pair not yet cached.
    ///
    /// Routes are computed on a dedicated rayon pool of `workers` threads
    /// (`None` = one per core) and inserted sequentially afterwards, so each
    /// pair is produced by exactly one task.  Calling this twice with the
    /// same inputs changes nothing the second time.
    pub fn build_all<R: Router>(
        &mut self,
        builder:      &RouteBuilder<'_, R>,
        origins:      &[NodeId],
        destinations: &[NodeId],
        workers:      Option<usize>,
    ) -> RoutesResult<BuildReport> {
        self.build_in_chunks(builder, origins, destinations, workers, origins.len(), |_| Ok(()))
    }

    /// Like [`build_all`](Self::build_all), but works through `origins`
    /// `chunk_origins` at a time and hands the cache to `checkpoint` after
    /// every chunk.
    ///
    /// With a checkpoint that saves the cache, an interrupted build keeps
    /// every finished chunk; rerunning on the loaded cache resumes where it
    /// stopped.  A checkpoint error aborts the build.
    pub fn build_in_chunks<R, F>(
        &mut self,
        builder:       &RouteBuilder<'_, R>,
        origins:       &[NodeId],
        destinations:  &[NodeId],
        workers:       Option<usize>,
        chunk_origins: usize,
        mut checkpoint: F,
    ) -> RoutesResult<BuildReport>
    where
        R: Router,
        F: FnMut(&RouteCache) -> RoutesResult<()>,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.unwrap_or(0))
            .build()?;

        let mut report = BuildReport::default();
        for chunk in origins.chunks(chunk_origins.max(1)) {
            let chunk_report = self.build_chunk(&pool, builder, chunk, destinations);
            report.absorb(chunk_report);
            if chunk_report.built > 0 {
                checkpoint(self)?;
            }
            debug!(
                origins = chunk.len(),
                built = chunk_report.built,
                total = self.len(),
                "route chunk finished"
            );
        }

        info!(
            built = report.built,
            skipped_short = report.skipped_short,
            failed = report.failed,
            already_cached = report.already_cached,
            total = self.len(),
            "route cache build finished"
        );
        Ok(report)
    }

    fn build_chunk<R: Router>(
        &mut self,
        pool:         &rayon::ThreadPool,
        builder:      &RouteBuilder<'_, R>,
        origins:      &[NodeId],
        destinations: &[NodeId],
    ) -> BuildReport {
        let mut report = BuildReport::default();

        let mut pairs = Vec::with_capacity(origins.len() * destinations.len());
        for &o in origins {
            for &d in destinations {
                if self.contains(o, d) {
                    report.already_cached += 1;
                } else {
                    pairs.push((o, d));
                }
            }
        }
        debug!(pairs = pairs.len(), threads = pool.current_num_threads(), "building routes");

        let results: Vec<_> = pool.install(|| {
            pairs
                .par_iter()
                .map(|&(o, d)| (o, d, builder.build(o, d)))
                .collect()
        });

        for (origin, destination, result) in results {
            match result {
                Ok(Some(route)) => {
                    if self.insert(route) {
                        report.built += 1;
                    }
                }
                Ok(None) => report.skipped_short += 1,
                Err(e) => {
                    warn!(%origin, %destination, error = %e, "skipping pair");
                    report.failed += 1;
                }
            }
        }
        report
    }

    // ── Persistence ───────────────────────────────────────────────────────

    /// Write the cache files into `dir`, creating it if needed.  `graph` is
    /// the graph the cached routes were built on.
    pub fn save(&self, dir: &Path, graph: &StreetGraph) -> RoutesResult<()> {
        std::fs::create_dir_all(dir)?;

        let records: Vec<&Route> = self.iter().collect();
        let mut w = BufWriter::new(File::create(dir.join(ROUTES_FILE))?);
        bincode::serialize_into(&mut w, &records)?;
        w.flush()?;

        let mut w = BufWriter::new(File::create(dir.join(INDEX_FILE))?);
        bincode::serialize_into(&mut w, &self.index)?;
        w.flush()?;

        let mut w = BufWriter::new(File::create(dir.join(NODES_FILE))?);
        bincode::serialize_into(&mut w, &graph.node_osm_id)?;
        w.flush()?;

        info!(routes = records.len(), dir = %dir.display(), "route cache saved");
        Ok(())
    }

    /// Load a cache written by [`save`](Self::save), with every node and
    /// edge translated into the ids of `graph`.
    pub fn load(dir: &Path, graph: &StreetGraph) -> RoutesResult<Self> {
        let records: Vec<Route> =
            bincode::deserialize_from(BufReader::new(File::open(dir.join(ROUTES_FILE))?))?;
        let index: BTreeMap<NodeId, Vec<NodeId>> =
            bincode::deserialize_from(BufReader::new(File::open(dir.join(INDEX_FILE))?))?;
        let saved_nodes: Vec<u64> =
            bincode::deserialize_from(BufReader::new(File::open(dir.join(NODES_FILE))?))?;

        let ids = NodeTranslation::new(&saved_nodes, graph);

        let mut cache = RouteCache::new();
        for route in records {
            let route = ids.route(route)?;
            let (o, d) = (route.origin, route.destination);
            if route.len() < 2 {
                return Err(RoutesError::CorruptIndex(format!(
                    "route {o} -> {d} has fewer than two waypoints"
                )));
            }
            if !cache.insert(route) {
                return Err(RoutesError::CorruptIndex(format!("duplicate route {o} -> {d}")));
            }
        }

        let mut translated: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
        for (origin, dests) in index {
            let mut dests = dests.into_iter().map(|d| ids.node(d)).collect::<RoutesResult<Vec<_>>>()?;
            dests.sort_unstable();
            translated.insert(ids.node(origin)?, dests);
        }

        if cache.index != translated {
            return Err(RoutesError::CorruptIndex(format!(
                "index lists {} origin(s) / {} pair(s) but records give {} / {}",
                translated.len(),
                translated.values().map(Vec::len).sum::<usize>(),
                cache.index.len(),
                cache.len(),
            )));
        }

        info!(routes = cache.len(), origins = cache.origins.len(), dir = %dir.display(), "route cache loaded");
        Ok(cache)
    }

    /// `true` if `dir` holds every cache file.
    pub fn exists(dir: &Path) -> bool {
        [ROUTES_FILE, INDEX_FILE, NODES_FILE].iter().all(|f| dir.join(f).is_file())
    }
}

// ── Id translation ────────────────────────────────────────────────────────────

/// Saved `NodeId` → `NodeId` of the loading graph, through external ids.
struct NodeTranslation<'a> {
    saved: &'a [u64],
    graph: &'a StreetGraph,
}

impl<'a> NodeTranslation<'a> {
    fn new(saved: &'a [u64], graph: &'a StreetGraph) -> Self {
        Self { saved, graph }
    }

    fn node(&self, saved_id: NodeId) -> RoutesResult<NodeId> {
        let &osm_id = self.saved.get(saved_id.index()).ok_or_else(|| {
            RoutesError::CorruptIndex(format!("{saved_id} is outside the saved node table"))
        })?;
        self.graph.node_by_osm_id(osm_id).ok_or_else(|| {
            RoutesError::GraphMismatch(format!("cached node {osm_id} is not in the street graph"))
        })
    }

    fn edge(&self, saved: EdgeKey) -> RoutesResult<EdgeKey> {
        let key = EdgeKey::new(self.node(saved.u)?, self.node(saved.v)?, saved.key);
        if self.graph.edge_id(key).is_none() {
            return Err(RoutesError::GraphMismatch(format!(
                "cached edge {key} is not in the street graph"
            )));
        }
        Ok(key)
    }

    fn route(&self, mut route: Route) -> RoutesResult<Route> {
        route.origin = self.node(route.origin)?;
        route.destination = self.node(route.destination)?;
        for w in &mut route.waypoints {
            w.edge = self.edge(w.edge)?;
        }

        let ends = [
            (route.origin, route.waypoints.first()),
            (route.destination, route.waypoints.last()),
        ];
        for (node, waypoint) in ends {
            let Some(w) = waypoint else { continue };
            let gap = w.pos.distance_m(self.graph.node_pos[node.index()]);
            if gap > ENDPOINT_TOLERANCE_M {
                return Err(RoutesError::GraphMismatch(format!(
                    "route {} -> {} ends {gap:.1} m from node {node}",
                    route.origin, route.destination
                )));
            }
        }
        Ok(route)
    }
}
