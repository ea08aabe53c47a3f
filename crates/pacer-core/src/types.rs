use std::collections::BTreeSet;
use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

/// Minutes in one civil day.
pub const MINUTES_PER_DAY: i64 = 1440;

/// Raw frequency configuration as it arrives from the dashboard or API.
///
/// Everything is optional and the numbers are deliberately wide: this is the
/// loose wire shape. Field-level problems are reported by
/// [`validate_frequency`](crate::validate::validate_frequency), not by serde,
/// so a caller can show every error at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencySpec {
    /// `"interval"`, `"daily"` or `"weekly"`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Nominal spacing between runs, in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_minutes: Option<i64>,
    /// Symmetric random spread applied on top of each interval, in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jitter_minutes: Option<i64>,
    /// Opening bound of the daily window, `HH:mm`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_start: Option<String>,
    /// Closing bound of the daily window, `HH:mm` (the bound itself is
    /// outside the window).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_end: Option<String>,
    /// Allowed weekdays for weekly runs, `0` = Sunday … `6` = Saturday.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<i64>>,
}

/// Validated frequency configuration.
///
/// Built from a [`FrequencySpec`] via `TryFrom`, which runs the full
/// validation pass first. Fields irrelevant to the active variant are not
/// representable.
#[derive(Debug, Clone, PartialEq)]
pub enum FrequencyConfig {
    /// Repeat every `every_minutes`, optionally jittered and confined to a
    /// recurring daily window.
    Interval {
        every_minutes: u32,
        jitter_minutes: Option<u32>,
        window: Option<TimeWindow>,
    },
    /// Run once per day, somewhere inside the window.
    Daily { window: TimeWindow },
    /// Run on the given weekdays (`0` = Sunday), somewhere inside the window.
    Weekly { window: TimeWindow, days: BTreeSet<u8> },
}

/// A wall-clock time of day, stored as minutes since local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    /// Parse a strict 24-hour `HH:mm` string (`"08:05"`, `"23:59"`).
    ///
    /// Both the two-digit shape and the numeric range are enforced, so a
    /// parsed value always maps onto a real wall-clock minute.
    pub fn parse(s: &str) -> Result<Self, SchedulerError> {
        let bytes = s.as_bytes();
        let shape_ok = bytes.len() == 5
            && bytes[2] == b':'
            && bytes[0].is_ascii_digit()
            && bytes[1].is_ascii_digit()
            && bytes[3].is_ascii_digit()
            && bytes[4].is_ascii_digit();
        if !shape_ok {
            return Err(SchedulerError::TimeOfDay(s.to_string()));
        }
        let hour = u16::from(bytes[0] - b'0') * 10 + u16::from(bytes[1] - b'0');
        let minute = u16::from(bytes[3] - b'0') * 10 + u16::from(bytes[4] - b'0');
        if hour > 23 || minute > 59 {
            return Err(SchedulerError::TimeOfDay(s.to_string()));
        }
        Ok(Self {
            minutes: hour * 60 + minute,
        })
    }

    pub fn hour(self) -> u16 {
        self.minutes / 60
    }

    pub fn minute(self) -> u16 {
        self.minutes % 60
    }

    /// Minutes since local midnight, always in `0..1440`.
    pub fn minutes_from_midnight(self) -> u16 {
        self.minutes
    }

    pub fn to_naive_time(self) -> NaiveTime {
        // minutes < 1440 by construction, so this cannot actually fail.
        NaiveTime::from_hms_opt(u32::from(self.hour()), u32::from(self.minute()), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// A recurring daily wall-clock band, possibly crossing midnight
/// (`22:00-06:00` spans into the next civil day).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeWindow {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// True when the band crosses midnight.
    pub fn wraps(&self) -> bool {
        self.end.minutes_from_midnight() <= self.start.minutes_from_midnight()
    }

    /// Wall-clock length in minutes, normalised for midnight wraparound.
    pub fn duration_minutes(&self) -> i64 {
        let start = i64::from(self.start.minutes_from_midnight());
        let mut end = i64::from(self.end.minutes_from_midnight());
        if end <= start {
            end += MINUTES_PER_DAY;
        }
        end - start
    }

    /// Half-open membership: the start minute is inside, the end minute is
    /// not. Seconds are ignored — membership is decided per wall-clock
    /// minute.
    pub fn contains(&self, t: NaiveTime) -> bool {
        self.contains_minute(i64::from(t.hour()) * 60 + i64::from(t.minute()))
    }

    fn contains_minute(&self, minute: i64) -> bool {
        let start = i64::from(self.start.minutes_from_midnight());
        let end = i64::from(self.end.minutes_from_midnight());
        if start <= end {
            minute >= start && minute < end
        } else {
            // Wrapping band: late evening or early morning.
            minute >= start || minute < end
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Outcome of checking a [`FrequencySpec`]. Collects every problem found
/// instead of stopping at the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tod(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    #[test]
    fn parse_valid_times() {
        assert_eq!(tod("00:00").minutes_from_midnight(), 0);
        assert_eq!(tod("08:05").minutes_from_midnight(), 485);
        assert_eq!(tod("23:59").minutes_from_midnight(), 1439);
    }

    #[test]
    fn parse_rejects_bad_shape() {
        assert!(TimeOfDay::parse("8:05").is_err());
        assert!(TimeOfDay::parse("08:5").is_err());
        assert!(TimeOfDay::parse("0805").is_err());
        assert!(TimeOfDay::parse("ab:cd").is_err());
        assert!(TimeOfDay::parse("").is_err());
    }

    #[test]
    fn parse_rejects_out_of_range() {
        assert!(TimeOfDay::parse("24:00").is_err());
        assert!(TimeOfDay::parse("99:99").is_err());
        assert!(TimeOfDay::parse("12:60").is_err());
    }

    #[test]
    fn display_round_trip() {
        assert_eq!(tod("07:30").to_string(), "07:30");
        assert_eq!(tod("00:00").to_string(), "00:00");
    }

    #[test]
    fn window_duration_plain() {
        let w = TimeWindow::new(tod("08:00"), tod("10:00"));
        assert!(!w.wraps());
        assert_eq!(w.duration_minutes(), 120);
    }

    #[test]
    fn window_duration_wrapping() {
        let w = TimeWindow::new(tod("22:00"), tod("06:00"));
        assert!(w.wraps());
        assert_eq!(w.duration_minutes(), 480);
    }

    #[test]
    fn window_contains_half_open() {
        let w = TimeWindow::new(tod("08:00"), tod("10:00"));
        assert!(w.contains(NaiveTime::from_hms_opt(8, 0, 0).unwrap()));
        assert!(w.contains(NaiveTime::from_hms_opt(9, 59, 0).unwrap()));
        // The closing bound itself is outside.
        assert!(!w.contains(NaiveTime::from_hms_opt(10, 0, 0).unwrap()));
        assert!(!w.contains(NaiveTime::from_hms_opt(7, 59, 0).unwrap()));
    }

    #[test]
    fn window_contains_wrapping() {
        let w = TimeWindow::new(tod("22:00"), tod("06:00"));
        assert!(w.contains(NaiveTime::from_hms_opt(23, 30, 0).unwrap()));
        assert!(w.contains(NaiveTime::from_hms_opt(2, 0, 0).unwrap()));
        assert!(!w.contains(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
        assert!(!w.contains(NaiveTime::from_hms_opt(6, 0, 0).unwrap()));
    }

    #[test]
    fn spec_wire_shape_is_camel_case() {
        let json = r#"{
            "type": "weekly",
            "windowStart": "08:00",
            "windowEnd": "10:00",
            "daysOfWeek": [1, 3, 5]
        }"#;
        let spec: FrequencySpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.kind.as_deref(), Some("weekly"));
        assert_eq!(spec.window_start.as_deref(), Some("08:00"));
        assert_eq!(spec.days_of_week, Some(vec![1, 3, 5]));
    }

    #[test]
    fn spec_serialises_without_absent_fields() {
        let spec = FrequencySpec {
            kind: Some("interval".to_string()),
            interval_minutes: Some(60),
            ..Default::default()
        };
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"type":"interval","intervalMinutes":60}"#);
    }
}
