//! Fluent builder for constructing a [`Sim`].

use ts_engine::SimEngine;
use ts_spawner::{CityDataset, LifecycleMonitor, SpawnerConfig, SpawnerContext, TrafficSpawner};

use crate::{PeriodicTimer, Sim, SimError, SimResult};

/// Default engine step, seconds.
pub const DEFAULT_DT_S: f64 = 0.05;

/// Fluent builder for [`Sim<E>`].
///
/// | Method       | Default                                     |
/// |--------------|---------------------------------------------|
/// | `.city(c)`   | `config.default_city`, loaded from disk     |
/// | `.dt(s)`     | [`DEFAULT_DT_S`]                            |
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(HeadlessEngine::new(), SpawnerConfig::default())
///     .city(city)
///     .build()?;
/// sim.run_for(3_600.0, &mut NoopObserver)?;
/// ```
pub struct SimBuilder<E: SimEngine> {
    engine: E,
    config: SpawnerConfig,
    city:   Option<CityDataset>,
    dt_s:   f64,
}

impl<E: SimEngine> SimBuilder<E> {
    pub fn new(engine: E, config: SpawnerConfig) -> Self {
        Self { engine, config, city: None, dt_s: DEFAULT_DT_S }
    }

    /// Use an already loaded city instead of `config.default_city`.
    pub fn city(mut self, city: CityDataset) -> Self {
        self.city = Some(city);
        self
    }

    pub fn dt(mut self, dt_s: f64) -> Self {
        self.dt_s = dt_s;
        self
    }

    /// Validate the timing parameters, set up the spawner context and return
    /// a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<E>> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.dt_s) {
            return Err(SimError::Config(format!("engine step must be positive, got {}", self.dt_s)));
        }
        for (what, v) in [
            ("spawn_period_s", self.config.spawn_period_s),
            ("monitor_period_s", self.config.monitor_period_s),
        ] {
            if !positive(v) {
                return Err(SimError::Config(format!("{what} must be positive, got {v}")));
            }
        }
        if !(self.config.separation_factor.is_finite() && self.config.separation_factor >= 0.0) {
            return Err(SimError::Config(format!(
                "separation_factor must be non-negative, got {}",
                self.config.separation_factor
            )));
        }
        if self.config.max_attempts_per_tick == 0 {
            return Err(SimError::Config("max_attempts_per_tick must be at least 1".into()));
        }

        let spawn_timer = PeriodicTimer::new(self.config.spawn_period_s);
        let monitor_timer = PeriodicTimer::new(self.config.monitor_period_s);

        let ctx = match self.city {
            Some(city) => {
                let mut ctx = SpawnerContext::new(self.config);
                ctx.set_city(city);
                ctx
            }
            None => SpawnerContext::with_default_city(self.config)?,
        };

        Ok(Sim {
            engine: self.engine,
            ctx,
            dt_s: self.dt_s,
            spawner: TrafficSpawner::new(),
            monitor: LifecycleMonitor::new(),
            spawn_timer,
            monitor_timer,
            runs: 0,
        })
    }
}
