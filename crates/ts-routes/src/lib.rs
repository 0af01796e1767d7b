//! `ts-routes` — offline route synthesis and the route cache.
//!
//! # Pipeline
//!
//! ```text
//! StreetGraph ──► OriginSelector ──► (origins, destinations)
//!                                          │
//!                  RouteBuilder ◄──────────┘   one task per pair (rayon)
//!                       │
//!                       ▼
//!                  RouteCache ──► routes.bin + index.bin + nodes.bin
//! ```
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`route`]   | `Route`, `Waypoint`                                       |
//! | [`origin`]  | `OriginSelector`, `destinations`                          |
//! | [`builder`] | `RouteBuilder`, `classify_turns`, thresholds              |
//! | [`cache`]   | `RouteCache`, `BuildReport`, persistence                  |
//! | [`config`]  | `CacheBuildConfig` (TOML)                                 |
//! | [`error`]   | `RoutesError`, `RoutesResult<T>`                          |

pub mod builder;
pub mod cache;
pub mod config;
pub mod error;
pub mod origin;
pub mod route;

#[cfg(test)]
mod tests;

pub use builder::{classify_turns, RouteBuilder, DEFAULT_MIN_MISSION_M, TURN_THRESHOLD_DEG};
pub use cache::{BuildReport, RouteCache};
pub use config::CacheBuildConfig;
pub use error::{RoutesError, RoutesResult};
pub use origin::{destinations, OriginSelector};
pub use route::{Route, Waypoint};
