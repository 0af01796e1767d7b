//! Simulation time.
//!
//! The host engine runs on a continuous clock in seconds since the start of
//! the run.  `SimTime` wraps that `f64` so that thresholds, periods and
//! scenario timestamps are not confused with distances or speeds.
//!
//! Scenario files stamp commands with `HH:MM:SS` (optionally `HH:MM:SS.ss`);
//! `SimTime` displays and parses that form.  Hours are not wrapped at 24, so
//! a 7-day stop time displays as `168:00:00`.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Seconds since the start of the simulation run.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn from_secs(secs: f64) -> Self {
        SimTime(secs)
    }

    #[inline]
    pub fn from_hms(hours: u32, minutes: u32, seconds: f64) -> Self {
        SimTime(hours as f64 * 3_600.0 + minutes as f64 * 60.0 + seconds)
    }

    #[inline]
    pub fn from_days(days: f64) -> Self {
        SimTime(days * 86_400.0)
    }

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// `self + secs`.
    #[inline]
    pub fn offset(self, secs: f64) -> SimTime {
        SimTime(self.0 + secs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.max(0.0);
        let whole = total.floor() as u64;
        let hours = whole / 3_600;
        let minutes = (whole % 3_600) / 60;
        let seconds = whole % 60;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}

impl FromStr for SimTime {
    type Err = CoreError;

    /// Accepts `HH:MM:SS`, `HH:MM:SS.ss`, or a bare number of seconds.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = || CoreError::Parse(format!("invalid sim time {s:?}: expected HH:MM:SS or seconds"));

        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [secs] => secs.parse::<f64>().map(SimTime).map_err(|_| bad()),
            [h, m, sec] => {
                let hours = h.parse::<u32>().map_err(|_| bad())?;
                let minutes = m.parse::<u32>().map_err(|_| bad())?;
                let seconds = sec.parse::<f64>().map_err(|_| bad())?;
                if minutes >= 60 || !(0.0..60.0).contains(&seconds) {
                    return Err(bad());
                }
                Ok(SimTime::from_hms(hours, minutes, seconds))
            }
            _ => Err(bad()),
        }
    }
}
