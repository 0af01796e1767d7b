//! CSV city-graph loader.
//!
//! # File format
//!
//! A city directory holds two CSV files exported from the cleaned street
//! network:
//!
//! ```csv
//! # nodes.csv
//! osmid,lat,lon
//! 101,48.2082,16.3738
//! 102,48.2090,16.3750
//! ```
//!
//! ```csv
//! # edges.csv
//! u,v,key,length,stroke,geometry
//! 101,102,0,120.5,7,"LINESTRING (16.3738 48.2082, 16.3744 48.2086, 16.3750 48.2090)"
//! 102,101,0,120.5,7,
//! ```
//!
//! `u`/`v` reference `osmid`s.  `stroke` (street-group id) and `geometry` may
//! be empty; an empty geometry becomes the straight segment between the two
//! nodes.  WKT coordinates are `lon lat`, as GIS tools write them.
//!
//! Loading is all-or-nothing: any malformed row fails the whole load.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use ts_core::{GeoPoint, NodeId};

use crate::network::{EdgeSpec, StreetGraph, StreetGraphBuilder};
use crate::{GraphError, GraphResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    osmid: u64,
    lat:   f64,
    lon:   f64,
}

#[derive(Deserialize)]
struct EdgeRecord {
    u:        u64,
    v:        u64,
    key:      u32,
    length:   f64,
    stroke:   Option<u32>,
    geometry: Option<String>,
}

#[derive(Deserialize)]
struct PoolRecord {
    osmid: u64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load `nodes.csv` and `edges.csv` from `dir`.
pub fn load_graph_dir(dir: &Path) -> GraphResult<StreetGraph> {
    let nodes = std::fs::File::open(dir.join("nodes.csv"))?;
    let edges = std::fs::File::open(dir.join("edges.csv"))?;
    load_graph_readers(nodes, edges)
}

/// Like [`load_graph_dir`] but accepts any `Read` sources.
pub fn load_graph_readers<N: Read, E: Read>(nodes: N, edges: E) -> GraphResult<StreetGraph> {
    let mut builder = StreetGraphBuilder::new();
    let mut seen = rustc_hash::FxHashMap::default();

    for row in csv::Reader::from_reader(nodes).deserialize::<NodeRecord>() {
        let row = row?;
        let id = builder.add_node(row.osmid, GeoPoint::new(row.lat, row.lon));
        if seen.insert(row.osmid, id).is_some() {
            return Err(GraphError::DuplicateOsmId(row.osmid));
        }
    }

    for row in csv::Reader::from_reader(edges).deserialize::<EdgeRecord>() {
        let row = row?;
        let from = *seen.get(&row.u).ok_or(GraphError::UnknownOsmId(row.u))?;
        let to   = *seen.get(&row.v).ok_or(GraphError::UnknownOsmId(row.v))?;
        if !(row.length.is_finite() && row.length >= 0.0) {
            return Err(GraphError::Parse(format!(
                "edge ({}, {}, {}) has invalid length {}",
                row.u, row.v, row.key, row.length
            )));
        }
        let geometry = match row.geometry.as_deref().map(str::trim) {
            None | Some("") => Vec::new(),
            Some(wkt) => parse_linestring(wkt)?,
        };
        builder.add_edge(EdgeSpec {
            from,
            to,
            key: row.key,
            length_m: row.length,
            geometry,
            stroke: row.stroke,
        });
    }

    debug!(
        nodes = builder.node_count(),
        edges = builder.edge_count(),
        "street graph parsed"
    );
    Ok(builder.build())
}

/// Read a node pool (one `osmid` column) and map it onto graph nodes.
///
/// Used for spawn-point candidate lists.  Unknown ids fail the load.
pub fn load_node_pool<R: Read>(reader: R, graph: &StreetGraph) -> GraphResult<Vec<NodeId>> {
    csv::Reader::from_reader(reader)
        .deserialize::<PoolRecord>()
        .map(|row| {
            let osmid = row?.osmid;
            graph.node_by_osm_id(osmid).ok_or(GraphError::UnknownOsmId(osmid))
        })
        .collect()
}

/// Parse a WKT `LINESTRING (lon lat, lon lat, ...)` into points.
pub fn parse_linestring(wkt: &str) -> GraphResult<Vec<GeoPoint>> {
    let bad = |why: &str| GraphError::Parse(format!("invalid LINESTRING {wkt:?}: {why}"));

    let body = wkt
        .trim()
        .strip_prefix("LINESTRING")
        .ok_or_else(|| bad("missing LINESTRING tag"))?
        .trim()
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| bad("missing parentheses"))?;

    let points = body
        .split(',')
        .map(|pair| {
            let mut it = pair.split_whitespace();
            let lon = it.next().and_then(|s| s.parse::<f64>().ok());
            let lat = it.next().and_then(|s| s.parse::<f64>().ok());
            match (lon, lat, it.next()) {
                (Some(lon), Some(lat), None) => Ok(GeoPoint::new(lat, lon)),
                _ => Err(bad("expected `lon lat` pairs")),
            }
        })
        .collect::<GraphResult<Vec<_>>>()?;

    if points.len() < 2 {
        return Err(bad("fewer than two points"));
    }
    Ok(points)
}
