//! `ts-graph` — street graph and shortest paths.
//!
//! The graph is supplied already cleaned and validated; this crate only
//! stores it in a form that is fast to query and never mutates it after
//! [`StreetGraphBuilder::build`].
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `StreetGraph` (CSR), `StreetGraphBuilder`, `EdgeSpec` |
//! | [`router`]  | `Router` trait, `ShortestPath`, `DijkstraRouter`            |
//! | [`loader`]  | CSV city loading (`nodes.csv`, `edges.csv`, node pools)     |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `ts-core` types.        |

pub mod error;
pub mod loader;
pub mod network;
pub mod router;


pub use error::{GraphError, GraphResult};
pub use loader::{load_graph_dir, load_graph_readers, load_node_pool, parse_linestring};
pub use network::{EdgeSpec, StreetGraph, StreetGraphBuilder};
pub use router::{DijkstraRouter, Router, ShortestPath};
