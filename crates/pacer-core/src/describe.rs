//! Human-readable rendering and structural comparison of frequency specs.
//!
//! Rendering is purely descriptive and never fails: missing or malformed
//! fields degrade to whatever readable text is available.

use crate::types::FrequencySpec;

const DAY_ABBREV: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Render `spec` as short descriptive text for lists and tooltips.
///
/// - interval: `"1h30min ± 15min (08:00-18:00)"`, zero components omitted
/// - daily: `"Daily (08:00-10:00)"`
/// - weekly: `"Mon, Wed, Fri (08:00-10:00)"`, days sorted ascending
pub fn describe_frequency(spec: &FrequencySpec) -> String {
    match spec.kind.as_deref() {
        Some("interval") => {
            let mut out = compact_minutes(spec.interval_minutes.unwrap_or(0));
            if let Some(jitter) = spec.jitter_minutes {
                if jitter > 0 {
                    out.push_str(&format!(" ± {}", compact_minutes(jitter)));
                }
            }
            if let Some(range) = window_range(spec) {
                out.push_str(&format!(" ({range})"));
            }
            out
        }
        Some("daily") => match window_range(spec) {
            Some(range) => format!("Daily ({range})"),
            None => "Daily".to_string(),
        },
        Some("weekly") => {
            let mut days = spec.days_of_week.clone().unwrap_or_default();
            days.sort_unstable();
            let names: Vec<&str> = days
                .iter()
                .filter_map(|d| usize::try_from(*d).ok())
                .filter_map(|d| DAY_ABBREV.get(d).copied())
                .collect();
            let label = if names.is_empty() {
                "Weekly".to_string()
            } else {
                names.join(", ")
            };
            match window_range(spec) {
                Some(range) => format!("{label} ({range})"),
                None => label,
            }
        }
        Some(other) => other.to_string(),
        None => "unconfigured".to_string(),
    }
}

/// Structural equality, order-independent on the weekday list.
///
/// A weekday list on exactly one side makes the specs unequal, even when the
/// list is empty; two absent lists are equal.
pub fn frequencies_equal(a: &FrequencySpec, b: &FrequencySpec) -> bool {
    if a.kind != b.kind
        || a.interval_minutes != b.interval_minutes
        || a.jitter_minutes != b.jitter_minutes
        || a.window_start != b.window_start
        || a.window_end != b.window_end
    {
        return false;
    }
    match (&a.days_of_week, &b.days_of_week) {
        (None, None) => true,
        (Some(x), Some(y)) => {
            let mut x = x.clone();
            let mut y = y.clone();
            x.sort_unstable();
            y.sort_unstable();
            x == y
        }
        _ => false,
    }
}

/// `90` → `"1h30min"`, `60` → `"1h"`, `45` → `"45min"`, `0` → `"0min"`.
fn compact_minutes(total: i64) -> String {
    let hours = total / 60;
    let minutes = total % 60;
    if hours > 0 && minutes > 0 {
        format!("{hours}h{minutes}min")
    } else if hours > 0 {
        format!("{hours}h")
    } else {
        format!("{minutes}min")
    }
}

fn window_range(spec: &FrequencySpec) -> Option<String> {
    match (spec.window_start.as_deref(), spec.window_end.as_deref()) {
        (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => {
            Some(format!("{start}-{end}"))
        }
        _ => None,
    }
}
