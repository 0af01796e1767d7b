//! `ScenarioBatchGenerator` — one scenario file per parameter tuple.
//!
//! ```text
//! for tuple in axes₁ × axes₂ × … (parallel):
//!     name   ← PREFIX_v₁_v₂_….scn             (name_axes order)
//!     header ← header templates matching tuple, rendered with tuple values
//!     body   ← base_dir / base_template        (rendered with base aliases)
//!     sink.write(name, header ++ body)
//! ```
//!
//! Template problems fail the whole batch before anything is written.  A
//! missing or unreadable base file fails only its own scenario.

use std::fs;
use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::template::render;
use crate::{natural_sort, ParamTuple, ParameterGrid, ScenarioBatchConfig, ScenarioError, ScenarioResult, ScenarioSink};

pub const SCENARIO_EXT: &str = "scn";

/// A fully resolved scenario, ready to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioSpec {
    pub name:   String,
    /// Base intention file, relative to `base_dir`.
    pub base:   PathBuf,
    pub header: Vec<String>,
}

/// Outcome of [`ScenarioBatchGenerator::generate`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Names of written scenarios, naturally sorted.
    pub written: Vec<String>,
    /// `(name, reason)` for scenarios that could not be written.
    pub failed:  Vec<(String, String)>,
}

pub struct ScenarioBatchGenerator {
    config: ScenarioBatchConfig,
    grid:   ParameterGrid,
}

impl ScenarioBatchGenerator {
    /// Validate the axes and every axis a template or condition refers to.
    pub fn new(config: ScenarioBatchConfig) -> ScenarioResult<Self> {
        let grid = ParameterGrid::new(config.axes.clone())?;

        let referenced = config
            .name_axes
            .iter()
            .flatten()
            .map(String::as_str)
            .chain(config.header.iter().flat_map(|h| h.condition_axes()));
        for axis in referenced {
            if !grid.has_axis(axis) {
                return Err(ScenarioError::UnknownAxis(axis.to_owned()));
            }
        }
        Ok(Self { config, grid })
    }

    pub fn config(&self) -> &ScenarioBatchConfig {
        &self.config
    }

    pub fn grid(&self) -> &ParameterGrid {
        &self.grid
    }

    /// Resolve one tuple.
    pub fn spec(&self, tuple: &ParamTuple<'_>) -> ScenarioResult<ScenarioSpec> {
        let values: Vec<&str> = match &self.config.name_axes {
            Some(names) => names.iter().filter_map(|n| tuple.get(n)).collect(),
            None => tuple.pairs().map(|(_, v)| v).collect(),
        };
        let stem = std::iter::once(self.config.prefix.as_str())
            .filter(|p| !p.is_empty())
            .chain(values)
            .collect::<Vec<_>>()
            .join("_");

        let header = self
            .config
            .header
            .iter()
            .filter(|h| h.applies(tuple))
            .map(|h| render(h.template(), |n| tuple.get(n)))
            .collect::<ScenarioResult<Vec<_>>>()?;

        let base = render(&self.config.base_template, |n| tuple.base_value(n))?;

        Ok(ScenarioSpec { name: format!("{stem}.{SCENARIO_EXT}"), base: PathBuf::from(base), header })
    }

    /// Resolve every tuple, in grid order.
    pub fn plan(&self) -> ScenarioResult<Vec<ScenarioSpec>> {
        self.grid.iter().map(|t| self.spec(&t)).collect()
    }

    /// Header lines followed by the base file's contents.
    pub fn compose(&self, spec: &ScenarioSpec) -> ScenarioResult<String> {
        let path = self.config.base_dir.join(&spec.base);
        let body = fs::read_to_string(&path).map_err(|e| ScenarioError::io(path, e))?;
        let mut text = String::with_capacity(body.len() + 64 * spec.header.len());
        for line in &spec.header {
            text.push_str(line);
            text.push('\n');
        }
        text.push_str(&body);
        Ok(text)
    }

    /// Write every scenario to `sink` on a worker pool of
    /// `config.workers` threads.
    pub fn generate<S: ScenarioSink>(&self, sink: &S) -> ScenarioResult<BatchReport> {
        let specs = self.plan()?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers.unwrap_or(0))
            .build()?;
        debug!(scenarios = specs.len(), threads = pool.current_num_threads(), "generating scenarios");

        let results: Vec<(String, ScenarioResult<()>)> = pool.install(|| {
            specs
                .par_iter()
                .map(|spec| {
                    let res = self.compose(spec).and_then(|text| sink.write(&spec.name, &text));
                    (spec.name.clone(), res)
                })
                .collect()
        });

        let mut report = BatchReport::default();
        for (name, res) in results {
            match res {
                Ok(()) => report.written.push(name),
                Err(e) => {
                    warn!(scenario = %name, error = %e, "scenario not written");
                    report.failed.push((name, e.to_string()));
                }
            }
        }
        natural_sort(&mut report.written);

        info!(written = report.written.len(), failed = report.failed.len(), "scenario batch finished");
        Ok(report)
    }
}
