//! Host command surface.
//!
//! | Command                 | Effect                                         |
//! |-------------------------|------------------------------------------------|
//! | `TRAFFICNUMBER [n]`     | Set the target population (default 50)         |
//! | `STOPSIMT t`            | Stop when sim time exceeds `t` (seconds or `HH:MM:SS`) |
//! | `STOPCONF n`            | Stop when the conflict count exceeds `n`       |
//! | `LOADCITY [name]`       | Load a city; without a valid name, list cities |
//! | `DELETEALL`             | Delete every live agent                        |
//!
//! Command words are case-insensitive.  `STOPSIMT` and `STOPCONF` switch the
//! stop condition's mode, so only one of them is ever active.

use std::str::FromStr;

use ts_core::SimTime;
use ts_engine::SimEngine;

use crate::{available_cities, SpawnerContext, SpawnerError, SpawnerResult, StopCondition};

const DEFAULT_TRAFFIC_NUMBER: usize = 50;

#[derive(Clone, Debug, PartialEq)]
pub enum SpawnerCommand {
    TrafficNumber(usize),
    StopSimTime(SimTime),
    StopConflicts(u64),
    LoadCity(Option<String>),
    DeleteAll,
}

impl FromStr for SpawnerCommand {
    type Err = SpawnerError;

    fn from_str(line: &str) -> SpawnerResult<Self> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(SpawnerError::UnknownCommand(String::new()));
        };
        let arg = words.next();

        fn bad(command: &'static str, arg: &str) -> SpawnerError {
            SpawnerError::BadArgument { command, arg: arg.to_owned() }
        }

        match head.to_ascii_uppercase().as_str() {
            "TRAFFICNUMBER" => match arg {
                None => Ok(SpawnerCommand::TrafficNumber(DEFAULT_TRAFFIC_NUMBER)),
                Some(a) => a.parse().map(SpawnerCommand::TrafficNumber).map_err(|_| bad("TRAFFICNUMBER", a)),
            },
            "STOPSIMT" => {
                let a = arg.ok_or_else(|| bad("STOPSIMT", ""))?;
                a.parse::<SimTime>()
                    .ok()
                    .filter(|t| t.secs() >= 0.0)
                    .map(SpawnerCommand::StopSimTime)
                    .ok_or_else(|| bad("STOPSIMT", a))
            }
            "STOPCONF" => {
                let a = arg.ok_or_else(|| bad("STOPCONF", ""))?;
                a.parse().map(SpawnerCommand::StopConflicts).map_err(|_| bad("STOPCONF", a))
            }
            "LOADCITY" => Ok(SpawnerCommand::LoadCity(arg.map(str::to_owned))),
            "DELETEALL" => Ok(SpawnerCommand::DeleteAll),
            _ => Err(SpawnerError::UnknownCommand(head.to_owned())),
        }
    }
}

impl SpawnerCommand {
    /// Apply to the context (and engine, for `DELETEALL`).  Returns the
    /// message to echo back to the host.
    pub fn apply<E: SimEngine + ?Sized>(
        self,
        ctx:    &mut SpawnerContext,
        engine: &mut E,
    ) -> SpawnerResult<String> {
        match self {
            SpawnerCommand::TrafficNumber(n) => {
                ctx.state.target_population = n;
                Ok(format!("The target traffic number was set to {n}."))
            }
            SpawnerCommand::StopSimTime(t) => {
                ctx.state.stop = StopCondition::SimTime { after_s: t.secs() };
                Ok(format!("Simulation stops after {t}."))
            }
            SpawnerCommand::StopConflicts(n) => {
                ctx.state.stop = StopCondition::Conflicts { above: n };
                Ok(format!("Simulation stops after {n} conflicts."))
            }
            SpawnerCommand::LoadCity(name) => {
                let cities = available_cities(&ctx.config.data_root)?;
                match name {
                    Some(name) if cities.contains(&name) => {
                        ctx.load_city(&name)?;
                        Ok(format!("Loaded city {name}."))
                    }
                    _ => Ok(format!("The following cities are available: {}.", cities.join(", "))),
                }
            }
            SpawnerCommand::DeleteAll => {
                engine.delete_all();
                ctx.sync(engine);
                Ok("Deleted all agents.".to_owned())
            }
        }
    }
}
