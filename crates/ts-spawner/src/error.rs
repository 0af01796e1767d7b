use thiserror::Error;

use ts_core::NodeId;
use ts_engine::EngineError;
use ts_routes::RoutesError;

#[derive(Debug, Error)]
pub enum SpawnerError {
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("route cache error: {0}")]
    Routes(#[from] RoutesError),

    #[error("cannot load city {city:?}: {reason}")]
    City { city: String, reason: String },

    #[error("route cache has no usable route {origin} -> {destination}")]
    CacheInconsistent { origin: NodeId, destination: NodeId },

    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("bad argument {arg:?} for {command}")]
    BadArgument { command: &'static str, arg: String },

    #[error("invalid spawner config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SpawnerResult<T> = Result<T, SpawnerError>;
