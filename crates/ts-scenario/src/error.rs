//! Error types for ts-scenario.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("axis `{0}` has no values")]
    EmptyAxis(String),

    #[error("axis `{0}` is declared twice")]
    DuplicateAxis(String),

    #[error("unknown axis `{0}`")]
    UnknownAxis(String),

    #[error("template `{template}` references unknown parameter `{name}`")]
    UnknownPlaceholder { template: String, name: String },

    #[error("template `{0}` has an unclosed `{{`")]
    UnclosedPlaceholder(String),

    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ScenarioError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScenarioError::Io { path: path.into(), source }
    }
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;
