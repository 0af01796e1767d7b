//! Offline cache-build configuration.
//!
//! ```toml
//! origin_count     = 200
//! min_separation_m = 300.0
//! max_attempts     = 100
//! min_mission_m    = 1000.0
//! seed             = 0
//! workers          = 8      # omit for one worker per core
//! checkpoint_every = 10     # origins built between cache saves
//! ```
//!
//! Every key is optional and falls back to [`CacheBuildConfig::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{OriginSelector, RoutesResult, DEFAULT_MIN_MISSION_M};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheBuildConfig {
    pub origin_count:     usize,
    pub min_separation_m: f64,
    pub max_attempts:     usize,
    pub min_mission_m:    f64,
    /// Seed of the origin-sampling RNG.
    pub seed:             u64,
    pub workers:          Option<usize>,
    /// Origins built between two saves of the cache.
    pub checkpoint_every: usize,
}

impl Default for CacheBuildConfig {
    fn default() -> Self {
        let selector = OriginSelector::default();
        Self {
            origin_count:     selector.count,
            min_separation_m: selector.min_separation_m,
            max_attempts:     selector.max_attempts,
            min_mission_m:    DEFAULT_MIN_MISSION_M,
            seed:             0,
            workers:          None,
            checkpoint_every: 10,
        }
    }
}

impl CacheBuildConfig {
    pub fn from_toml_str(s: &str) -> RoutesResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> RoutesResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn selector(&self) -> OriginSelector {
        OriginSelector {
            count:            self.origin_count,
            min_separation_m: self.min_separation_m,
            max_attempts:     self.max_attempts,
        }
    }
}
