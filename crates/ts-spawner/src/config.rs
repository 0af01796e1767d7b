//! Spawner configuration and stop conditions.
//!
//! ```toml
//! initial_target_population = 200
//! target_population         = 50
//! altitude_ft               = 100.0
//! speed_kts                 = 20.0
//! turn_speed_kts            = 5.0
//! seed                      = 12345
//! data_root                 = "data/cities"
//! default_city              = "Vienna"
//!
//! [stop]
//! mode    = "sim_time"
//! after_s = 604800.0
//! ```
//!
//! Every key is optional and falls back to [`SpawnerConfig::default`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ts_core::{units, SimTime};

use crate::SpawnerResult;

// ── StopCondition ─────────────────────────────────────────────────────────────

/// When the lifecycle monitor ends the run.  Exactly one mode is active.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StopCondition {
    /// Sim time strictly greater than `after_s`.
    SimTime { after_s: f64 },
    /// Cumulative conflict count strictly greater than `above`.
    Conflicts { above: u64 },
}

impl StopCondition {
    /// Seven simulated days.
    pub const DEFAULT_STOP_TIME_S: f64 = 7.0 * 24.0 * 3_600.0;

    /// Threshold used when switching to conflict mode without a count.
    pub const DEFAULT_STOP_CONFLICTS: u64 = 10_000;

    pub fn triggered(&self, now: SimTime, conflicts: u64) -> bool {
        match *self {
            StopCondition::SimTime { after_s } => now.secs() > after_s,
            StopCondition::Conflicts { above } => conflicts > above,
        }
    }
}

impl Default for StopCondition {
    fn default() -> Self {
        StopCondition::SimTime { after_s: Self::DEFAULT_STOP_TIME_S }
    }
}

// ── SpawnerConfig ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Live-agent target when the spawner is first created.
    pub initial_target_population: usize,
    /// Live-agent target after every reset.
    pub target_population: usize,
    pub altitude_ft: f64,
    pub speed_kts: f64,
    pub turn_speed_kts: f64,
    pub aircraft_type: String,
    pub spawn_period_s: f64,
    pub monitor_period_s: f64,
    /// Consecutive separation rejections tolerated per spawn tick.
    pub max_attempts_per_tick: usize,
    /// Spawn clearance as a multiple of the engine's protected-zone radius.
    pub separation_factor: f64,
    pub stop: StopCondition,
    pub seed: u64,
    /// Directory holding one sub-directory per city.
    pub data_root: PathBuf,
    pub default_city: Option<String>,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            initial_target_population: 200,
            target_population: 50,
            altitude_ft: 100.0,
            speed_kts: 20.0,
            turn_speed_kts: 5.0,
            aircraft_type: "M600".into(),
            spawn_period_s: 1.0,
            monitor_period_s: 0.5,
            max_attempts_per_tick: 20,
            separation_factor: 2.0,
            stop: StopCondition::default(),
            seed: 12345,
            data_root: PathBuf::from("data/cities"),
            default_city: None,
        }
    }
}

impl SpawnerConfig {
    pub fn from_toml_str(s: &str) -> SpawnerResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> SpawnerResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn altitude_m(&self) -> f64 {
        units::ft_to_m(self.altitude_ft)
    }

    pub fn speed_mps(&self) -> f64 {
        units::kts_to_mps(self.speed_kts)
    }

    pub fn turn_speed_mps(&self) -> f64 {
        units::kts_to_mps(self.turn_speed_kts)
    }
}
