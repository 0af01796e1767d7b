//! `ScenarioBatchConfig` — a batch experiment described in TOML.
//!
//! ```toml
//! prefix        = "M22"
//! base_dir      = "Vienna/Base Scenarios"
//! base_template = "{strategic}/Flight_intention_{demand}_{repetition}.scn"
//! output_dir    = "Vienna/M2.2"
//! workers       = 16
//! name_axes     = ["demand", "tactical", "strategic", "repetition"]
//!
//! header = [
//!     "00:00:00>SEED {repetition}",
//!     { line = "00:00:00>RESO M22CR", when = { tactical = "SB" } },
//!     "00:00:00.00>FF",
//! ]
//!
//! [[axes]]
//! name   = "demand"
//! values = [60, 90, 120]
//!
//! [[axes]]
//! name       = "strategic"
//! values     = ["RandomAlt", "4D", "4DRTA"]
//! base_alias = { RandomAlt = "Standard", 4DRTA = "4DoF" }
//! ```
//!
//! Every field is optional.  Missing axes, header lines and prefix are empty,
//! so a file only needs to describe its own study.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use crate::{Axis, BatchFile, ParamTuple, ScenarioError, ScenarioResult};

/// One header line, optionally emitted only for matching tuples.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum HeaderLine {
    Always(String),
    When {
        line: String,
        /// Axis → required value; all must match.
        when: BTreeMap<String, String>,
    },
}

impl HeaderLine {
    pub fn when(line: impl Into<String>, axis: impl Into<String>, value: impl Into<String>) -> Self {
        HeaderLine::When { line: line.into(), when: BTreeMap::from([(axis.into(), value.into())]) }
    }

    pub fn template(&self) -> &str {
        match self {
            HeaderLine::Always(line) | HeaderLine::When { line, .. } => line,
        }
    }

    pub fn applies(&self, tuple: &ParamTuple<'_>) -> bool {
        match self {
            HeaderLine::Always(_) => true,
            HeaderLine::When { when, .. } => {
                when.iter().all(|(axis, value)| tuple.get(axis) == Some(value.as_str()))
            }
        }
    }

    pub(crate) fn condition_axes(&self) -> impl Iterator<Item = &str> {
        let when = match self {
            HeaderLine::Always(_) => None,
            HeaderLine::When { when, .. } => Some(when),
        };
        when.into_iter().flat_map(|w| w.keys().map(String::as_str))
    }
}

impl From<&str> for HeaderLine {
    fn from(line: &str) -> Self {
        HeaderLine::Always(line.to_owned())
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ScenarioBatchConfig {
    /// Leading component of every scenario name.
    pub prefix:        String,
    /// Directory the base template is resolved against.
    pub base_dir:      PathBuf,
    /// Path of the intention file a scenario copies, relative to `base_dir`.
    /// Placeholders use each axis's base alias.
    pub base_template: String,
    pub output_dir:    PathBuf,
    /// `None` = one thread per logical CPU.
    pub workers:       Option<usize>,
    pub header:        Vec<HeaderLine>,
    /// Axes that appear in scenario names, in order.  `None` = all axes.
    pub name_axes:     Option<Vec<String>>,
    pub axes:          Vec<Axis>,
    /// Optional repetition batch written next to the scenarios.
    pub batch:         Option<BatchFile>,
}

impl Default for ScenarioBatchConfig {
    fn default() -> Self {
        Self {
            prefix:        String::new(),
            base_dir:      PathBuf::from("."),
            base_template: String::new(),
            output_dir:    PathBuf::from("scenarios"),
            workers:       None,
            header:        Vec::new(),
            name_axes:     None,
            axes:          Vec::new(),
            batch:         None,
        }
    }
}

impl ScenarioBatchConfig {
    pub fn from_toml_str(s: &str) -> ScenarioResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> ScenarioResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ScenarioError::io(path, e))?;
        Self::from_toml_str(&text)
    }
}

// ── Serde helpers ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

/// Accept axis values written as TOML strings, integers, floats or booleans.
pub(crate) fn scalar_strings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let raw = Vec::<Scalar>::deserialize(d)?;
    Ok(raw
        .into_iter()
        .map(|s| match s {
            Scalar::Int(v) => v.to_string(),
            Scalar::Float(v) => v.to_string(),
            Scalar::Bool(v) => v.to_string(),
            Scalar::Str(v) => v,
        })
        .collect())
}
