//! `ts-scenario` — scenario batch generation for traffic experiments.
//!
//! An experiment is the cross product of a few independent variables
//! (demand level, resolution method, wind, …).  Each tuple becomes one
//! scenario file: a templated header followed by a pre-built intention file.
//!
//! | Module        | Contents                                          |
//! |---------------|---------------------------------------------------|
//! | [`config`]    | `ScenarioBatchConfig` (TOML), `HeaderLine`        |
//! | [`grid`]      | `Axis`, `ParameterGrid`, `ParamTuple`             |
//! | [`generator`] | `ScenarioBatchGenerator`, `ScenarioSpec`          |
//! | [`sink`]      | `ScenarioSink`, `DirSink`, `MemorySink`           |
//! | [`batch`]     | `BatchFile` (repetition batches)                  |
//! | [`sort`]      | `natural_sort`, `natural_cmp`                     |

pub mod batch;
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod sink;
pub mod sort;
mod template;


pub use batch::BatchFile;
pub use config::{HeaderLine, ScenarioBatchConfig};
pub use error::{ScenarioError, ScenarioResult};
pub use generator::{BatchReport, ScenarioBatchGenerator, ScenarioSpec, SCENARIO_EXT};
pub use grid::{Axis, ParamTuple, ParameterGrid};
pub use sink::{DirSink, MemorySink, ScenarioSink};
pub use sort::{natural_cmp, natural_sort};
