use thiserror::Error;

use ts_engine::EngineError;
use ts_spawner::SpawnerError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Spawner(#[from] SpawnerError),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

pub type SimResult<T> = Result<T, SimError>;
