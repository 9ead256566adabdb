use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::{str::FromStr, time::Duration};

#[cfg(test)]
use proptest::prelude::*;

/// Configuration for the session's timing policy.
#[derive(Debug, Display, Copy, Clone, PartialEq, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{}", "ron::ser::to_string(self).unwrap()")]
#[serde(deny_unknown_fields, rename_all = "snake_case", default)]
pub struct SessionOptions {
    /// The cooldown after a jump.
    #[cfg_attr(test, strategy((1u64..60_000).prop_map(Duration::from_millis)))]
    #[serde(with = "humantime_serde")]
    pub rest_short: Duration,

    /// The cooldown after a move.
    #[cfg_attr(test, strategy((1u64..60_000).prop_map(Duration::from_millis)))]
    #[serde(with = "humantime_serde")]
    pub rest_long: Duration,

    /// Movement speed in cells per second.
    #[cfg_attr(test, strategy(0.5f64..8.0))]
    pub speed: f64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            rest_short: Duration::from_millis(2000),
            rest_long: Duration::from_millis(5000),
            speed: 2.0,
        }
    }
}

/// The reason why parsing [`SessionOptions`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse session options")]
pub struct ParseOptionsError(ron::de::SpannedError);

impl FromStr for SessionOptions {
    type Err = ParseOptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}

/// The timing constants every piece carries, derived from [`SessionOptions`].
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Tempo {
    #[cfg_attr(test, strategy(1u64..60_000))]
    pub rest_short_ms: u64,
    #[cfg_attr(test, strategy(1u64..60_000))]
    pub rest_long_ms: u64,
    #[cfg_attr(test, strategy(0.5f64..8.0))]
    pub speed: f64,
}

impl Tempo {
    /// How long a move trajectory spanning `dist` cells takes.
    ///
    /// Zero distance still takes the 100ms floor, so a move to the current
    /// cell remains observable by the animation layer.
    #[inline(always)]
    pub fn move_duration_ms(&self, dist: f64) -> u64 {
        ((dist / self.speed * 1000.).round() as u64).max(100)
    }
}

impl Default for Tempo {
    fn default() -> Self {
        SessionOptions::default().into()
    }
}

impl From<SessionOptions> for Tempo {
    fn from(options: SessionOptions) -> Self {
        Tempo {
            rest_short_ms: options.rest_short.as_millis() as u64,
            rest_long_ms: options.rest_long.as_millis() as u64,
            speed: options.speed,
        }
    }
}
