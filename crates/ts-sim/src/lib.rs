//! `ts-sim` — host-side runner for the traffic spawner.
//!
//! Steps a [`SimEngine`][ts_engine::SimEngine] at a fixed `dt` and fires the
//! two spawner callbacks off its clock:
//!
//! | Callback                      | Period (config)            |
//! |-------------------------------|----------------------------|
//! | `TrafficSpawner::tick`        | `spawn_period_s` (1.0 s)   |
//! | `LifecycleMonitor::tick`      | `monitor_period_s` (0.5 s) |
//!
//! When the monitor reports a stop, the run ends and both timers restart
//! from the reset engine clock.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ts_engine::HeadlessEngine;
//! use ts_sim::{NoopObserver, SimBuilder};
//! use ts_spawner::SpawnerConfig;
//!
//! let mut sim = SimBuilder::new(HeadlessEngine::new(), SpawnerConfig::default())
//!     .city(city)
//!     .build()?;
//! sim.run_for(86_400.0, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod timer;

#[cfg(test)]
mod tests;

pub use builder::{SimBuilder, DEFAULT_DT_S};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{RunOutcome, Sim, StepOutcome};
pub use timer::PeriodicTimer;
