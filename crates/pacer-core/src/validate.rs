//! Field-level checks for the loose [`FrequencySpec`] wire shape.
//!
//! Validation accumulates: every applicable rule runs, so a dashboard can
//! surface all problems in one pass instead of one per submit. The typed
//! [`FrequencyConfig`] is only constructible through this boundary.

use std::collections::BTreeSet;

use crate::config::MIN_WINDOW_MINUTES;
use crate::error::SchedulerError;
use crate::types::{FrequencyConfig, FrequencySpec, TimeOfDay, TimeWindow, ValidationReport};

/// Check `spec` for internal consistency.
///
/// Never fails. Returns every detected problem; an empty-string field is
/// treated the same as an absent one.
pub fn validate_frequency(spec: &FrequencySpec) -> ValidationReport {
    let mut errors = Vec::new();

    let kind = match spec.kind.as_deref().filter(|k| !k.is_empty()) {
        Some(k) => k,
        None => {
            // Without a type nothing else can be meaningfully checked.
            return ValidationReport::from_errors(vec!["type is required".to_string()]);
        }
    };

    let window_start = spec.window_start.as_deref().filter(|s| !s.is_empty());
    let window_end = spec.window_end.as_deref().filter(|s| !s.is_empty());

    match kind {
        "interval" => {
            match spec.interval_minutes {
                None => {
                    errors.push("intervalMinutes is required for interval frequency".to_string())
                }
                Some(m) if m <= 0 => {
                    errors.push("intervalMinutes must be greater than 0".to_string())
                }
                Some(m) if m > i64::from(u32::MAX) => {
                    errors.push("intervalMinutes is out of range".to_string())
                }
                Some(_) => {}
            }
            if let Some(jitter) = spec.jitter_minutes {
                if jitter < 0 {
                    errors.push("jitterMinutes must not be negative".to_string());
                } else if let Some(interval) = spec.interval_minutes {
                    // Integer-exact half bound: equality with interval/2 is
                    // allowed. An overflowing double certainly exceeds it.
                    if jitter.checked_mul(2).map_or(true, |doubled| doubled > interval) {
                        errors.push(format!(
                            "jitterMinutes ({jitter}) must not exceed half of intervalMinutes ({interval})"
                        ));
                    }
                }
            }
        }
        "daily" | "weekly" => {
            if window_start.is_none() {
                errors.push(format!("windowStart is required for {kind} frequency"));
            }
            if window_end.is_none() {
                errors.push(format!("windowEnd is required for {kind} frequency"));
            }
        }
        other => errors.push(format!("unknown frequency type: {other}")),
    }

    if kind == "weekly" {
        match spec.days_of_week.as_deref() {
            None | Some([]) => {
                errors.push("daysOfWeek is required for weekly frequency".to_string())
            }
            Some(days) => {
                let out_of_range: Vec<String> = days
                    .iter()
                    .filter(|d| !(0..=6).contains(*d))
                    .map(|d| d.to_string())
                    .collect();
                if !out_of_range.is_empty() {
                    errors.push(format!(
                        "daysOfWeek values must be between 0 and 6, got: {}",
                        out_of_range.join(", ")
                    ));
                }
            }
        }
    }

    // Format checks run for any supplied bound, even when the active type
    // does not require a window.
    let start = parse_window_bound("windowStart", window_start, &mut errors);
    let end = parse_window_bound("windowEnd", window_end, &mut errors);
    if let (Some(start), Some(end)) = (start, end) {
        let window = TimeWindow::new(start, end);
        let duration = window.duration_minutes();
        if duration < MIN_WINDOW_MINUTES {
            errors.push(format!(
                "time window must span at least {MIN_WINDOW_MINUTES} minutes, got {duration}"
            ));
        }
    }

    ValidationReport::from_errors(errors)
}

fn parse_window_bound(
    field: &str,
    value: Option<&str>,
    errors: &mut Vec<String>,
) -> Option<TimeOfDay> {
    let raw = value?;
    match TimeOfDay::parse(raw) {
        Ok(t) => Some(t),
        Err(_) => {
            errors.push(format!("{field} must be a valid HH:mm time, got \"{raw}\""));
            None
        }
    }
}

impl TryFrom<&FrequencySpec> for FrequencyConfig {
    type Error = SchedulerError;

    /// Validate and narrow the loose shape. On failure the error message
    /// carries every validation problem, comma-joined.
    fn try_from(spec: &FrequencySpec) -> Result<Self, Self::Error> {
        let report = validate_frequency(spec);
        if !report.valid {
            return Err(SchedulerError::Configuration(report.errors.join(", ")));
        }

        let window = match (
            spec.window_start.as_deref().filter(|s| !s.is_empty()),
            spec.window_end.as_deref().filter(|s| !s.is_empty()),
        ) {
            (Some(start), Some(end)) => Some(TimeWindow::new(
                TimeOfDay::parse(start)?,
                TimeOfDay::parse(end)?,
            )),
            _ => None,
        };

        match spec.kind.as_deref() {
            Some("interval") => Ok(FrequencyConfig::Interval {
                // The validation pass guarantees presence and positivity.
                every_minutes: spec.interval_minutes.unwrap_or(0) as u32,
                jitter_minutes: spec.jitter_minutes.map(|j| j as u32),
                window,
            }),
            Some("daily") => match window {
                Some(window) => Ok(FrequencyConfig::Daily { window }),
                None => Err(SchedulerError::Configuration(
                    "windowStart is required for daily frequency".to_string(),
                )),
            },
            Some("weekly") => {
                let days: BTreeSet<u8> = spec
                    .days_of_week
                    .as_deref()
                    .unwrap_or(&[])
                    .iter()
                    .map(|d| *d as u8)
                    .collect();
                match (window, days.is_empty()) {
                    (Some(window), false) => Ok(FrequencyConfig::Weekly { window, days }),
                    _ => Err(SchedulerError::Configuration(
                        "daysOfWeek is required for weekly frequency".to_string(),
                    )),
                }
            }
            _ => Err(SchedulerError::Configuration("type is required".to_string())),
        }
    }
}
