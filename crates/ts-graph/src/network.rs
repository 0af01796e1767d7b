//! Street graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_from[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays are sorted by `(from, to, key)` and indexed by `EdgeId`.
//! Iteration over a node's outgoing edges is a contiguous memory scan.
//!
//! Each edge carries its full polyline geometry (first point at `from`, last
//! point at `to`) because routes are flown along the street shape, not
//! node-to-node.  Parallel edges between the same ordered pair are kept
//! apart by their `key`.

use rustc_hash::FxHashMap;

use ts_core::{EdgeId, EdgeKey, GeoPoint, NodeId};

use crate::{GraphError, GraphResult};

// ── StreetGraph ───────────────────────────────────────────────────────────────

/// Immutable directed street graph in CSR format.
///
/// Array fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`StreetGraphBuilder`].
pub struct StreetGraph {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// External (OSM) identifier each node was loaded with.
    pub node_osm_id: Vec<u64>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId) ─────────────────────────────────────
    pub edge_from: Vec<NodeId>,
    pub edge_to: Vec<NodeId>,

    /// Parallel-edge key; `(from, to, key)` is unique.
    pub edge_key: Vec<u32>,

    /// Length of each edge in metres.  Used as the shortest-path weight.
    pub edge_length_m: Vec<f64>,

    /// Ordered polyline of each edge.  Always at least two points.
    pub edge_geometry: Vec<Vec<GeoPoint>>,

    /// Street-group id the edge belongs to, when the dataset provides one.
    pub edge_stroke: Vec<Option<u32>>,

    osm_index: FxHashMap<u64, NodeId>,
    edge_index: FxHashMap<EdgeKey, EdgeId>,
}

impl StreetGraph {
    /// Construct an empty graph with no nodes or edges.
    pub fn empty() -> Self {
        StreetGraphBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// All node ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_pos.len() as u32).map(NodeId)
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_pos.len()
    }

    // ── Node lookups ──────────────────────────────────────────────────────

    /// Position of `node`, or `NodeNotFound`.
    #[inline]
    pub fn node_pos(&self, node: NodeId) -> GraphResult<GeoPoint> {
        self.node_pos
            .get(node.index())
            .copied()
            .ok_or(GraphError::NodeNotFound(node))
    }

    #[inline]
    pub fn node_by_osm_id(&self, osm_id: u64) -> Option<NodeId> {
        self.osm_index.get(&osm_id).copied()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    // ── Edge lookups ──────────────────────────────────────────────────────

    #[inline]
    pub fn edge_key(&self, edge: EdgeId) -> EdgeKey {
        EdgeKey::new(
            self.edge_from[edge.index()],
            self.edge_to[edge.index()],
            self.edge_key[edge.index()],
        )
    }

    #[inline]
    pub fn edge_id(&self, key: EdgeKey) -> Option<EdgeId> {
        self.edge_index.get(&key).copied()
    }

    #[inline]
    pub fn edge_geometry(&self, edge: EdgeId) -> &[GeoPoint] {
        &self.edge_geometry[edge.index()]
    }

    /// Street-group id of the edge identified by `key`.
    pub fn stroke_of(&self, key: EdgeKey) -> Option<u32> {
        self.edge_id(key).and_then(|e| self.edge_stroke[e.index()])
    }

}

// ── StreetGraphBuilder ────────────────────────────────────────────────────────

/// One directed edge handed to [`StreetGraphBuilder::add_edge`].
#[derive(Clone, Debug)]
pub struct EdgeSpec {
    pub from:     NodeId,
    pub to:       NodeId,
    pub key:      u32,
    pub length_m: f64,
    /// Ordered polyline.  An empty or single-point geometry is replaced by
    /// the straight segment between the two node positions.
    pub geometry: Vec<GeoPoint>,
    pub stroke:   Option<u32>,
}

/// Construct a [`StreetGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use ts_core::GeoPoint;
/// use ts_graph::StreetGraphBuilder;
///
/// let mut b = StreetGraphBuilder::new();
/// let a = b.add_node(1, GeoPoint::new(48.200, 16.370));
/// let c = b.add_node(2, GeoPoint::new(48.205, 16.370));
/// b.add_street(a, c, None);
/// let g = b.build();
/// assert_eq!(g.node_count(), 2);
/// assert_eq!(g.edge_count(), 2); // bidirectional
/// ```
pub struct StreetGraphBuilder {
    nodes:   Vec<GeoPoint>,
    osm_ids: Vec<u64>,
    edges:   Vec<EdgeSpec>,
}

impl StreetGraphBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), osm_ids: Vec::new(), edges: Vec::new() }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:   Vec::with_capacity(nodes),
            osm_ids: Vec::with_capacity(nodes),
            edges:   Vec::with_capacity(edges),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, osm_id: u64, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        self.osm_ids.push(osm_id);
        id
    }

    /// Add a **directed** edge.
    pub fn add_edge(&mut self, spec: EdgeSpec) {
        self.edges.push(spec);
    }

    /// Convenience: a straight two-way street between `a` and `b` with
    /// length equal to the flat-earth distance.  Uses key 0 in both
    /// directions.
    pub fn add_street(&mut self, a: NodeId, b: NodeId, stroke: Option<u32>) {
        let pa = self.nodes[a.index()];
        let pb = self.nodes[b.index()];
        let length_m = pa.distance_m(pb);
        for (from, to, geometry) in [(a, b, vec![pa, pb]), (b, a, vec![pb, pa])] {
            self.add_edge(EdgeSpec { from, to, key: 0, length_m, geometry, stroke });
        }
    }

    pub fn node_pos(&self, id: NodeId) -> GeoPoint {
        self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Consume the builder and produce a [`StreetGraph`].
    ///
    /// Time complexity: O(E log E) for the edge sort.
    pub fn build(self) -> StreetGraph {
        let node_count = self.nodes.len();
        let edge_count = self.edges.len();

        let mut raw = self.edges;
        raw.sort_by_key(|e| (e.from.0, e.to.0, e.key));

        let mut edge_from     = Vec::with_capacity(edge_count);
        let mut edge_to       = Vec::with_capacity(edge_count);
        let mut edge_key      = Vec::with_capacity(edge_count);
        let mut edge_length_m = Vec::with_capacity(edge_count);
        let mut edge_geometry = Vec::with_capacity(edge_count);
        let mut edge_stroke   = Vec::with_capacity(edge_count);
        let mut edge_index    = FxHashMap::default();

        let mut node_out_start = vec![0u32; node_count + 1];

        for (i, e) in raw.into_iter().enumerate() {
            node_out_start[e.from.index() + 1] += 1;

            let geometry = if e.geometry.len() >= 2 {
                e.geometry
            } else {
                vec![self.nodes[e.from.index()], self.nodes[e.to.index()]]
            };

            edge_index.insert(EdgeKey::new(e.from, e.to, e.key), EdgeId(i as u32));
            edge_from.push(e.from);
            edge_to.push(e.to);
            edge_key.push(e.key);
            edge_length_m.push(e.length_m);
            edge_geometry.push(geometry);
            edge_stroke.push(e.stroke);
        }

        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let osm_index = self
            .osm_ids
            .iter()
            .enumerate()
            .map(|(i, &osm)| (osm, NodeId(i as u32)))
            .collect();

        StreetGraph {
            node_pos: self.nodes,
            node_osm_id: self.osm_ids,
            node_out_start,
            edge_from,
            edge_to,
            edge_key,
            edge_length_m,
            edge_geometry,
            edge_stroke,
            osm_index,
            edge_index,
        }
    }
}

impl Default for StreetGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
