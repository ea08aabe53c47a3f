//! Next-run planning for agent frequencies.

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use pacer_core::{FrequencyConfig, FrequencySpec, Result, SchedulerConfig, SchedulerError};

use crate::jitter::random_jitter;
use crate::window::{next_window_start, random_time_in_window};

/// Computed next execution slot.
#[derive(Debug, Clone, Serialize)]
pub struct NextRun {
    /// Absolute next-run instant.
    pub at: DateTime<Utc>,
    /// Distance from the reference `now`, in milliseconds.
    pub delay_ms: i64,
    /// Local-time rendering for humans, e.g. `"Friday 7 August at 15:30"`.
    pub description: String,
}

/// Zone-carrying entry point for next-run computation.
///
/// All window and weekday arithmetic happens in the planner's zone; the
/// returned instants are UTC.
#[derive(Debug, Clone, Copy)]
pub struct Planner {
    tz: Tz,
}

impl Default for Planner {
    fn default() -> Self {
        Self {
            tz: chrono_tz::Europe::Paris,
        }
    }
}

impl Planner {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Build a planner from loaded settings. An unknown zone name is
    /// rejected rather than silently falling back.
    pub fn from_config(config: &SchedulerConfig) -> Result<Self> {
        let tz = Tz::from_str(&config.timezone)
            .map_err(|_| SchedulerError::Timezone(config.timezone.clone()))?;
        Ok(Self { tz })
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Compute the next run for `spec` after `now` with thread-local
    /// randomness. See [`Planner::next_run_with`].
    pub fn next_run(&self, spec: &FrequencySpec, now: DateTime<Utc>) -> Result<NextRun> {
        self.next_run_with(spec, now, &mut rand::thread_rng())
    }

    /// Compute the next run for `spec` after `now`, drawing jitter and
    /// window offsets from `rng`.
    ///
    /// The spec is validated first: an invalid one fails with
    /// [`SchedulerError::Configuration`] carrying every validation message
    /// comma-joined, and nothing is computed.
    pub fn next_run_with<R: Rng + ?Sized>(
        &self,
        spec: &FrequencySpec,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<NextRun> {
        let config = FrequencyConfig::try_from(spec)?;
        let at = self.plan(&config, now, rng)?;
        let local = at.with_timezone(&self.tz);
        debug!(next_run = %at, "next run planned");
        Ok(NextRun {
            at,
            delay_ms: (at - now).num_milliseconds(),
            description: local.format("%A %-d %B at %H:%M").to_string(),
        })
    }

    fn plan<R: Rng + ?Sized>(
        &self,
        config: &FrequencyConfig,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<DateTime<Utc>> {
        match config {
            FrequencyConfig::Interval {
                every_minutes,
                jitter_minutes,
                window,
            } => {
                let jitter = jitter_minutes.map(|j| random_jitter(rng, j)).unwrap_or(0);
                let candidate = now + Duration::minutes(i64::from(*every_minutes) + jitter);
                let Some(window) = window else {
                    return Ok(candidate);
                };
                if window.contains(candidate.with_timezone(&self.tz).time()) {
                    return Ok(candidate);
                }
                // The jittered candidate missed the window: snap to the next
                // opening and draw a fresh offset inside it. The original
                // jitter is deliberately not carried over.
                debug!(candidate = %candidate, window = %window, "candidate outside window, snapping");
                let start = next_window_start(self.tz, candidate, window, None)
                    .ok_or(SchedulerError::OutOfRange)?;
                let picked = random_time_in_window(start, window, rng)
                    .ok_or(SchedulerError::OutOfRange)?;
                Ok(picked.with_timezone(&Utc))
            }
            FrequencyConfig::Daily { window } => {
                let start = next_window_start(self.tz, now, window, None)
                    .ok_or(SchedulerError::OutOfRange)?;
                let picked = random_time_in_window(start, window, rng)
                    .ok_or(SchedulerError::OutOfRange)?;
                Ok(picked.with_timezone(&Utc))
            }
            FrequencyConfig::Weekly { window, days } => {
                let start = next_window_start(self.tz, now, window, Some(days))
                    .ok_or(SchedulerError::OutOfRange)?;
                let picked = random_time_in_window(start, window, rng)
                    .ok_or(SchedulerError::OutOfRange)?;
                Ok(picked.with_timezone(&Utc))
            }
        }
    }
}
