//! `ts-spawner` — keeps a live simulation populated with routed agents.
//!
//! Two callbacks run off the engine clock, both taking the host-owned
//! [`SpawnerContext`] by `&mut`:
//!
//! - [`TrafficSpawner::tick`] (every `spawn_period_s`) creates agents on
//!   cached routes until the target population is reached, skipping route
//!   starts that are too close to live traffic.
//! - [`LifecycleMonitor::tick`] (every `monitor_period_s`) deletes agents
//!   that have finished their route and ends the run when the stop
//!   condition fires.
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`config`]  | `SpawnerConfig` (TOML), `StopCondition`                    |
//! | [`context`] | `SpawnerContext`, `SpawnerState`                           |
//! | [`arena`]   | `RouteEdgeArena` (per-slot route edges)                    |
//! | [`spawner`] | `TrafficSpawner`, `SpawnReport`                            |
//! | [`monitor`] | `LifecycleMonitor`, `MonitorReport`, `should_retire`       |
//! | [`city`]    | `CityDataset`, `available_cities`                          |
//! | [`command`] | `SpawnerCommand` (host text commands)                      |
//! | [`error`]   | `SpawnerError`, `SpawnerResult<T>`                         |

pub mod arena;
pub mod city;
pub mod command;
pub mod config;
pub mod context;
pub mod error;
pub mod monitor;
pub mod spawner;


pub use arena::RouteEdgeArena;
pub use city::{available_cities, CityDataset};
pub use command::SpawnerCommand;
pub use config::{SpawnerConfig, StopCondition};
pub use context::{SpawnerContext, SpawnerState};
pub use error::{SpawnerError, SpawnerResult};
pub use monitor::{should_retire, LifecycleMonitor, MonitorReport};
pub use spawner::{SpawnReport, TrafficSpawner};
