use thiserror::Error;

use ts_core::NodeId;
use ts_graph::GraphError;

#[derive(Debug, Error)]
pub enum RoutesError {
    #[error("routing error: {0}")]
    Graph(#[from] GraphError),

    #[error("route {origin} -> {destination} has {points} point(s); at least two required")]
    DegenerateRoute {
        origin:      NodeId,
        destination: NodeId,
        points:      usize,
    },

    #[error("route cache index is corrupt: {0}")]
    CorruptIndex(String),

    #[error("route cache does not match the street graph: {0}")]
    GraphMismatch(String),

    #[error("route cache encoding error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("could not start build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("invalid cache build config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RoutesResult<T> = Result<T, RoutesError>;
