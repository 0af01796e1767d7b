//! Graph-subsystem error type.

use thiserror::Error;

use ts_core::NodeId;

/// Errors produced by `ts-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("no path from {from} to {to}")]
    NoPath { from: NodeId, to: NodeId },

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("unknown OSM node id {0}")]
    UnknownOsmId(u64),

    #[error("duplicate OSM node id {0}")]
    DuplicateOsmId(u64),

    #[error("graph parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
