use thiserror::Error;

use ts_core::{AgentId, AgentSlot};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("agent {0} does not exist")]
    UnknownAgent(AgentId),

    #[error("agent {0} already exists")]
    DuplicateAgent(AgentId),

    #[error("no agent at slot {0}")]
    InvalidSlot(AgentSlot),
}

pub type EngineResult<T> = Result<T, EngineError>;
