//! Destinations for generated scenario files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::{ScenarioError, ScenarioResult};

/// Receives finished scenario files.  Shared across generator threads.
pub trait ScenarioSink: Sync {
    /// Store `contents` under file name `name`, replacing any previous file.
    fn write(&self, name: &str, contents: &str) -> ScenarioResult<()>;
}

/// Writes each scenario to `<dir>/<name>`.
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    /// Create `dir` if needed.
    pub fn new(dir: impl Into<PathBuf>) -> ScenarioResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| ScenarioError::io(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ScenarioSink for DirSink {
    fn write(&self, name: &str, contents: &str) -> ScenarioResult<()> {
        let path = self.dir.join(name);
        fs::write(&path, contents).map_err(|e| ScenarioError::io(path, e))
    }
}

/// Keeps scenarios in memory, keyed by name.
#[derive(Default)]
pub struct MemorySink {
    files: Mutex<BTreeMap<String, String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner).get(name).cloned()
    }

    pub fn into_files(self) -> BTreeMap<String, String> {
        self.files.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ScenarioSink for MemorySink {
    fn write(&self, name: &str, contents: &str) -> ScenarioResult<()> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_owned(), contents.to_owned());
        Ok(())
    }
}
