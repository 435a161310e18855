use std::time::{Duration, Instant};

use thiserror::Error;

/// Wall-clock stopwatch around a single named step.
pub struct Timer {
    start: Instant,
    name: &'static str,
}

impl Timer {
    pub fn start(name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            name,
        }
    }

    pub fn stop(self) -> (&'static str, Duration) {
        (self.name, self.start.elapsed())
    }
}

/// Batch-wide wall-clock limit, checked between inputs.
#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    start: Instant,
    limit: Option<Duration>,
}

impl TimeBudget {
    /// A zero limit means unlimited.
    pub fn start(limit: Option<Duration>) -> Self {
        Self {
            start: Instant::now(),
            limit: limit.filter(|limit| !limit.is_zero()),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn limit(&self) -> Option<Duration> {
        self.limit
    }

    pub fn expired(&self) -> bool {
        self.limit.is_some_and(|limit| self.elapsed() > limit)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid time budget {0:?}: expected seconds, optionally suffixed with s, m or h")]
pub struct BudgetParseError(pub String);

/// Parses `90`, `1.5`, `30s`, `2m` or `1h`. `0` yields `None` (unlimited).
pub fn parse_time_budget(value: &str) -> Result<Option<Duration>, BudgetParseError> {
    let trimmed = value.trim();
    let invalid = || BudgetParseError(value.to_string());

    let (number, scale) = match trimmed.char_indices().last() {
        Some((idx, 's')) => (&trimmed[..idx], 1.0),
        Some((idx, 'm')) => (&trimmed[..idx], 60.0),
        Some((idx, 'h')) => (&trimmed[..idx], 3600.0),
        Some(_) => (trimmed, 1.0),
        None => return Err(invalid()),
    };

    let seconds: f64 = number.trim().parse().map_err(|_| invalid())?;
    let seconds = seconds * scale;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(invalid());
    }

    let budget = Duration::try_from_secs_f64(seconds).map_err(|_| invalid())?;
    Ok((!budget.is_zero()).then_some(budget))
}
