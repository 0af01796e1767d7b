//! `ts-engine` — the simulation-engine boundary.
//!
//! The spawner never owns agents.  It creates them, installs their flight
//! plans, reads their navigation state and deletes them through the
//! [`SimEngine`] trait, so the same spawner drives a full traffic simulator
//! or the in-process [`HeadlessEngine`].
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`engine`]   | `SimEngine` trait                                          |
//! | [`types`]    | `AgentSpec`, `NavWaypoint`, `WaypointMode`, `NavState`, `EngineEvent`, `EngineCommand` |
//! | [`headless`] | `HeadlessEngine` (straight-line kinematics, pair counting) |
//! | [`error`]    | `EngineError`, `EngineResult<T>`                           |

pub mod engine;
pub mod error;
pub mod headless;
pub mod types;


pub use engine::SimEngine;
pub use error::{EngineError, EngineResult};
pub use headless::{HeadlessEngine, DEFAULT_PZ_RADIUS_M};
pub use types::{AgentSpec, EngineCommand, EngineEvent, NavState, NavWaypoint, WaypointMode};
