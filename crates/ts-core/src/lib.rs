//! `ts-core` — foundational types for the traffic spawner workspace.
//!
//! This crate is a dependency of every other `ts-*` crate.  It has no `ts-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | [`ids`]   | `NodeId`, `EdgeId`, `AgentId`, `AgentSlot`, `EdgeKey`       |
//! | [`geo`]   | `GeoPoint`, flat-earth bearing/distance, angle helpers      |
//! | [`time`]  | `SimTime` (seconds, `HH:MM:SS` display/parse)               |
//! | [`rng`]   | `SimRng` (seeded, deterministic)                            |
//! | [`units`] | knots/feet conversions                                      |
//! | [`error`] | `CoreError`, `CoreResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `ts-routes` for cache persistence.             |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;
pub mod units;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{bearing_and_distance, turn_angle, wrap_180, GeoPoint, EARTH_RADIUS_M};
pub use ids::{AgentId, AgentSlot, EdgeId, EdgeKey, NodeId};
pub use rng::SimRng;
pub use time::SimTime;
