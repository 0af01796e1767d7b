//! Batch files: one `SCEN` block per repetition of a single scenario.
//!
//! ```text
//! 00:00:00.00>SCEN INTENTCD_1
//! 00:00:00.00>PCALL CDSTUDY.scn
//! 00:00:00.00>SEED 0
//! 00:00:00.00>FF
//!
//! 00:00:00.00>SCEN INTENTCD_2
//! ...
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::{ScenarioError, ScenarioResult};

const AT_START: &str = "00:00:00.00>";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BatchFile {
    /// Scenario names are `<scen_prefix>_<n>`, `n` from 1.
    pub scen_prefix: String,
    /// Scenario file each block calls.
    pub pcall:       String,
    pub repetitions: usize,
}

impl BatchFile {
    pub fn new(scen_prefix: impl Into<String>, pcall: impl Into<String>, repetitions: usize) -> Self {
        Self { scen_prefix: scen_prefix.into(), pcall: pcall.into(), repetitions }
    }

    /// Block `i` seeds the run with `i`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for i in 0..self.repetitions {
            out.push_str(&format!(
                "{AT_START}SCEN {}_{}\n{AT_START}PCALL {}\n{AT_START}SEED {i}\n{AT_START}FF\n\n",
                self.scen_prefix,
                i + 1,
                self.pcall,
            ));
        }
        out
    }

    pub fn write(&self, path: &Path) -> ScenarioResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ScenarioError::io(parent, e))?;
        }
        fs::write(path, self.render()).map_err(|e| ScenarioError::io(path, e))
    }
}
