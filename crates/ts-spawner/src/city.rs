//! City datasets: street graph, route cache and optional extras, loaded from
//! one directory.
//!
//! ```text
//! <root>/<city>/nodes.csv          required
//! <root>/<city>/edges.csv          required
//! <root>/<city>/cache/             required (routes.bin, index.bin, nodes.bin)
//! <root>/<city>/centre.txt         optional: latitude line, longitude line
//! <root>/<city>/spawn_points.csv   optional: `osmid` column
//! ```
//!
//! Loading is all-or-nothing: any missing required file or malformed
//! optional file fails the whole load.

use std::fs;
use std::path::Path;

use tracing::info;

use ts_core::{GeoPoint, NodeId};
use ts_graph::{load_graph_dir, load_node_pool, StreetGraph};
use ts_routes::RouteCache;

use crate::{SpawnerError, SpawnerResult};

pub const CACHE_DIR: &str = "cache";
pub const CENTRE_FILE: &str = "centre.txt";
pub const SPAWN_POINTS_FILE: &str = "spawn_points.csv";

pub struct CityDataset {
    pub name:       String,
    pub graph:      StreetGraph,
    pub cache:      RouteCache,
    /// Map centre, when the dataset provides one.
    pub centre:     Option<GeoPoint>,
    /// Candidate spawn nodes, when the dataset restricts them.
    pub spawn_pool: Option<Vec<NodeId>>,
}

impl CityDataset {
    /// Assemble a dataset from in-memory parts.
    pub fn from_parts(name: impl Into<String>, graph: StreetGraph, cache: RouteCache) -> Self {
        Self { name: name.into(), graph, cache, centre: None, spawn_pool: None }
    }

    /// Load `<root>/<name>`.
    pub fn load(root: &Path, name: &str) -> SpawnerResult<Self> {
        Self::load_dir(&root.join(name), name)
    }

    pub fn load_dir(dir: &Path, name: &str) -> SpawnerResult<Self> {
        let fail = |reason: String| SpawnerError::City { city: name.to_owned(), reason };

        let graph = load_graph_dir(dir).map_err(|e| fail(e.to_string()))?;
        let cache = RouteCache::load(&dir.join(CACHE_DIR), &graph).map_err(|e| fail(e.to_string()))?;

        let centre_path = dir.join(CENTRE_FILE);
        let centre = if centre_path.is_file() {
            let text = fs::read_to_string(&centre_path).map_err(|e| fail(e.to_string()))?;
            Some(parse_centre(&text).map_err(fail)?)
        } else {
            None
        };

        let pool_path = dir.join(SPAWN_POINTS_FILE);
        let spawn_pool = if pool_path.is_file() {
            let file = fs::File::open(&pool_path).map_err(|e| fail(e.to_string()))?;
            Some(load_node_pool(file, &graph).map_err(|e| fail(e.to_string()))?)
        } else {
            None
        };

        info!(
            city = name,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            routes = cache.len(),
            "city loaded"
        );
        Ok(Self { name: name.to_owned(), graph, cache, centre, spawn_pool })
    }
}

/// Names of the sub-directories of `root` that look like city datasets,
/// sorted.
pub fn available_cities(root: &Path) -> SpawnerResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() && path.join("nodes.csv").is_file() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_owned());
            }
        }
    }
    names.sort();
    Ok(names)
}

fn parse_centre(text: &str) -> Result<GeoPoint, String> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    let mut coord = |what: &str| -> Result<f64, String> {
        let line = lines.next().ok_or_else(|| format!("{CENTRE_FILE}: missing {what}"))?;
        line.parse().map_err(|_| format!("{CENTRE_FILE}: bad {what} {line:?}"))
    };
    let lat = coord("latitude")?;
    let lon = coord("longitude")?;
    Ok(GeoPoint::new(lat, lon))
}
