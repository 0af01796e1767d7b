//! The `Sim` runner.

use tracing::info;

use ts_engine::SimEngine;
use ts_spawner::{LifecycleMonitor, SpawnerCommand, SpawnerContext, TrafficSpawner};

use crate::{PeriodicTimer, SimObserver, SimResult};

/// Result of one [`Sim::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced,
    /// The stop condition fired; the engine is paused and reset.
    Stopped,
}

/// Result of [`Sim::run_for`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Stopped,
}

/// Drives a [`SimEngine`] and the two spawner callbacks.
///
/// One step:
///
/// ```text
/// now ← engine.sim_time()
/// spawn timer due   → TrafficSpawner::tick
/// monitor timer due → LifecycleMonitor::tick   (stop → timers reset, return)
/// engine.step(dt)
/// ```
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<E: SimEngine> {
    pub engine: E,
    pub ctx:    SpawnerContext,
    /// Engine step, seconds of sim time.
    pub dt_s:   f64,

    pub(crate) spawner:       TrafficSpawner,
    pub(crate) monitor:       LifecycleMonitor,
    pub(crate) spawn_timer:   PeriodicTimer,
    pub(crate) monitor_timer: PeriodicTimer,
    pub(crate) runs:          usize,
}

impl<E: SimEngine> Sim<E> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Number of runs ended by the stop condition so far.
    pub fn completed_runs(&self) -> usize {
        self.runs
    }

    /// Run for `duration_s` of sim time, or until the stop condition fires.
    ///
    /// The step count is fixed up front, so a paused engine cannot stall
    /// the loop.
    pub fn run_for<O: SimObserver>(&mut self, duration_s: f64, observer: &mut O) -> SimResult<RunOutcome> {
        let steps = (duration_s / self.dt_s).round().max(0.0) as u64;
        for _ in 0..steps {
            if self.step(observer)? == StepOutcome::Stopped {
                return Ok(RunOutcome::Stopped);
            }
        }
        observer.on_run_end(self.engine.sim_time());
        Ok(RunOutcome::Completed)
    }

    /// Fire due callbacks, then advance the engine by `dt_s`.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<StepOutcome> {
        let now = self.engine.sim_time();

        if self.spawn_timer.poll(now) {
            let report = self.spawner.tick(&mut self.ctx, &mut self.engine)?;
            observer.on_spawn(now, &report);
        }

        if self.monitor_timer.poll(now) {
            let report = self.monitor.tick(&mut self.ctx, &mut self.engine)?;
            observer.on_monitor(now, &report);
            if report.stopped {
                self.runs += 1;
                self.reset_timers();
                info!(time = %now, runs = self.runs, "run stopped");
                observer.on_stop(now, self.runs);
                return Ok(StepOutcome::Stopped);
            }
        }

        self.engine.step(self.dt_s)?;
        observer.on_step_end(self.engine.sim_time(), self.engine.agent_count());
        Ok(StepOutcome::Advanced)
    }

    /// Parse and apply one host command line.  Returns the echo message.
    pub fn command(&mut self, line: &str) -> SimResult<String> {
        let cmd: SpawnerCommand = line.parse()?;
        Ok(cmd.apply(&mut self.ctx, &mut self.engine)?)
    }

    /// Unpause the engine, e.g. to start the next run after a stop.
    pub fn resume(&mut self) {
        self.engine.resume();
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn reset_timers(&mut self) {
        let now = self.engine.sim_time();
        self.spawn_timer.reset(now);
        self.monitor_timer.reset(now);
    }
}
