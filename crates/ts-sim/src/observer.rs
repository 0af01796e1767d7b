//! Observer hooks for progress reporting.

use ts_core::SimTime;
use ts_spawner::{MonitorReport, SpawnReport};

/// Callbacks invoked by [`Sim`][crate::Sim] while it steps.
///
/// All methods default to no-ops; override what you need.
///
/// # Example: population logger
///
/// ```rust,ignore
/// struct Population(Vec<usize>);
///
/// impl SimObserver for Population {
///     fn on_step_end(&mut self, _time: SimTime, agents: usize) {
///         self.0.push(agents);
///     }
/// }
/// ```
pub trait SimObserver {
    /// After each spawner tick.
    fn on_spawn(&mut self, _time: SimTime, _report: &SpawnReport) {}

    /// After each monitor tick, including the one that stops the run.
    fn on_monitor(&mut self, _time: SimTime, _report: &MonitorReport) {}

    /// The stop condition fired at `time`.  `runs` counts completed runs.
    fn on_stop(&mut self, _time: SimTime, _runs: usize) {}

    /// After the engine advanced one step.
    fn on_step_end(&mut self, _time: SimTime, _agents: usize) {}

    /// Once when [`Sim::run_for`][crate::Sim::run_for] finishes without a stop.
    fn on_run_end(&mut self, _time: SimTime) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
