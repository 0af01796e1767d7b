//! Unit tests for ts-sim.

use ts_core::{EdgeKey, GeoPoint, NodeId, SimTime};
use ts_engine::HeadlessEngine;
use ts_graph::StreetGraph;
use ts_routes::{Route, RouteCache, Waypoint};
use ts_spawner::{CityDataset, MonitorReport, SpawnReport, SpawnerConfig, StopCondition};

use crate::{Sim, SimBuilder, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

const HOME: GeoPoint = GeoPoint { lat: 52.37, lon: 4.89 };

/// `n` north-bound 600 m routes starting 400 m apart.
fn city(n: u32) -> CityDataset {
    let mut cache = RouteCache::new();
    for i in 0..n {
        let start = HOME.moved(90.0, 400.0 * i as f64);
        let end = start.moved(0.0, 600.0);
        let edge = EdgeKey::new(NodeId(i), NodeId(n + i), 0);
        cache.insert(Route {
            origin: NodeId(i),
            destination: NodeId(n + i),
            waypoints: vec![
                Waypoint { pos: start, edge, turn: true },
                Waypoint { pos: end, edge, turn: true },
            ],
        });
    }
    CityDataset::from_parts("Polder", StreetGraph::empty(), cache)
}

fn sim(config: SpawnerConfig, origins: u32) -> Sim<HeadlessEngine> {
    SimBuilder::new(HeadlessEngine::new(), config)
        .city(city(origins))
        .dt(0.05)
        .build()
        .unwrap()
}

#[derive(Default)]
struct Recorder {
    spawn_ticks:   Vec<SimTime>,
    monitor_ticks: usize,
    spawned:       usize,
    retired:       usize,
    stops:         Vec<(SimTime, usize)>,
    run_ends:      usize,
}

impl SimObserver for Recorder {
    fn on_spawn(&mut self, time: SimTime, report: &SpawnReport) {
        self.spawn_ticks.push(time);
        self.spawned += report.spawned;
    }
    fn on_monitor(&mut self, _time: SimTime, report: &MonitorReport) {
        self.monitor_ticks += 1;
        self.retired += report.retired.len();
    }
    fn on_stop(&mut self, time: SimTime, runs: usize) {
        self.stops.push((time, runs));
    }
    fn on_run_end(&mut self, _time: SimTime) {
        self.run_ends += 1;
    }
}

// ── PeriodicTimer ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod timer {
    use ts_core::SimTime;
    use crate::PeriodicTimer;

    #[test]
    fn fires_once_per_period() {
        let mut t = PeriodicTimer::new(0.5);
        let fired = (0..40)
            .map(|i| SimTime(i as f64 * 0.1))
            .filter(|&now| t.poll(now))
            .count();
        assert_eq!(fired, 8);
    }

    #[test]
    fn missed_periods_collapse() {
        let mut t = PeriodicTimer::new(1.0);
        assert!(t.poll(SimTime(0.0)));
        assert!(t.poll(SimTime(5.5)));
        assert_eq!(t.next_due(), SimTime(6.0));
        assert!(!t.poll(SimTime(5.9)));
    }

    #[test]
    fn reset_makes_due() {
        let mut t = PeriodicTimer::new(1.0);
        assert!(t.poll(SimTime(10.0)));
        t.reset(SimTime::ZERO);
        assert!(t.poll(SimTime::ZERO));
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use ts_engine::HeadlessEngine;
    use ts_spawner::SpawnerConfig;
    use super::city;
    use crate::{SimBuilder, SimError};

    #[test]
    fn rejects_bad_timing() {
        let build = |cfg: SpawnerConfig, dt: f64| {
            SimBuilder::new(HeadlessEngine::new(), cfg).city(city(1)).dt(dt).build()
        };
        assert!(matches!(build(SpawnerConfig::default(), 0.0), Err(SimError::Config(_))));
        let cfg = SpawnerConfig { monitor_period_s: -1.0, ..SpawnerConfig::default() };
        assert!(matches!(build(cfg, 0.1), Err(SimError::Config(_))));
        let cfg = SpawnerConfig { max_attempts_per_tick: 0, ..SpawnerConfig::default() };
        assert!(matches!(build(cfg, 0.1), Err(SimError::Config(_))));
        assert!(build(SpawnerConfig::default(), 0.1).is_ok());
    }

    #[test]
    fn missing_default_city_fails() {
        let dir = std::env::temp_dir().join("ts-sim-no-such-root");
        let cfg = SpawnerConfig {
            data_root: dir,
            default_city: Some("Nowhere".into()),
            ..SpawnerConfig::default()
        };
        assert!(matches!(
            SimBuilder::new(HeadlessEngine::new(), cfg).build(),
            Err(SimError::Spawner(_))
        ));
    }

    #[test]
    fn no_city_builds_idle_sim() {
        let sim = SimBuilder::new(HeadlessEngine::new(), SpawnerConfig::default()).build().unwrap();
        assert!(sim.ctx.city().is_none());
    }
}

// ── Running ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod running {
    use ts_core::SimTime;
    use ts_engine::{EngineCommand, SimEngine};
    use ts_spawner::{SpawnerConfig, StopCondition};
    use super::{sim, Recorder};
    use crate::{NoopObserver, RunOutcome};

    #[test]
    fn callback_cadence() {
        let mut s = sim(SpawnerConfig::default(), 3);
        let mut rec = Recorder::default();
        assert_eq!(s.run_for(10.0, &mut rec).unwrap(), RunOutcome::Completed);
        assert_eq!(rec.spawn_ticks.len(), 10);
        assert_eq!(rec.monitor_ticks, 20);
        assert_eq!(rec.run_ends, 1);
        assert!((s.engine.sim_time().secs() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn spawns_up_to_origin_count() {
        let cfg = SpawnerConfig { max_attempts_per_tick: 200, ..SpawnerConfig::default() };
        let mut s = sim(cfg, 4);
        let mut rec = Recorder::default();
        s.run_for(1.0, &mut rec).unwrap();
        assert_eq!(rec.spawned, 4);
        assert_eq!(s.engine.agent_count(), 4);
    }

    #[test]
    fn agents_retire_and_respawn() {
        let cfg = SpawnerConfig { initial_target_population: 2, ..SpawnerConfig::default() };
        let mut s = sim(cfg, 6);
        let mut rec = Recorder::default();
        // 600 m at ~10 m/s: each agent finishes within about a minute.
        s.run_for(300.0, &mut rec).unwrap();
        assert!(rec.retired >= 4, "retired {}", rec.retired);
        assert_eq!(rec.spawned, rec.retired + s.engine.agent_count());
        assert!(s.engine.agent_count() <= 2);
    }

    #[test]
    fn stop_ends_run_and_restarts_timers() {
        let cfg = SpawnerConfig {
            stop: StopCondition::SimTime { after_s: 5.0 },
            ..SpawnerConfig::default()
        };
        let mut s = sim(cfg, 3);
        let mut rec = Recorder::default();

        assert_eq!(s.run_for(60.0, &mut rec).unwrap(), RunOutcome::Stopped);
        assert_eq!(rec.stops.len(), 1);
        assert!((rec.stops[0].0.secs() - 5.5).abs() < 1e-6);
        assert_eq!(rec.stops[0].1, 1);
        assert_eq!(rec.run_ends, 0);
        assert_eq!(s.completed_runs(), 1);
        assert!(s.engine.is_paused());
        assert_eq!(s.engine.agent_count(), 0);
        assert_eq!(s.engine.sim_time(), SimTime::ZERO);
        assert_eq!(
            s.engine.command_log(),
            &[EngineCommand::Pause, EngineCommand::DeleteAll, EngineCommand::Reset]
        );

        s.resume();
        assert_eq!(s.run_for(1.0, &mut NoopObserver).unwrap(), RunOutcome::Completed);
        assert!(s.engine.agent_count() > 0);
        assert_eq!(s.engine.command_log().len(), 3);
    }

    #[test]
    fn host_commands() {
        let mut s = sim(SpawnerConfig::default(), 5);
        assert!(s.command("trafficnumber 1").unwrap().contains('1'));
        s.run_for(2.0, &mut NoopObserver).unwrap();
        assert_eq!(s.engine.agent_count(), 1);

        s.command("DELETEALL").unwrap();
        assert_eq!(s.engine.agent_count(), 0);
        assert!(s.command("WARP 9").is_err());
    }
}

#[test]
fn stop_config_roundtrip_through_builder() {
    let cfg = SpawnerConfig { stop: StopCondition::Conflicts { above: 3 }, ..SpawnerConfig::default() };
    let s = sim(cfg, 1);
    assert_eq!(s.ctx.state().stop, StopCondition::Conflicts { above: 3 });
    assert_eq!(s.ctx.state().target_population, 200);
}
