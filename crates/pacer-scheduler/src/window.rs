//! Civil-time window arithmetic in a named IANA zone.
//!
//! Finding the next window opening and picking a random instant inside it
//! are kept separate so daily/weekly runs land at a different time each
//! occurrence instead of all firing on the same minute every day.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Days, Duration, LocalResult, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use rand::Rng;

use pacer_core::types::{TimeWindow, MINUTES_PER_DAY};

/// Resolve a naive local datetime to an absolute instant in `tz`.
///
/// A fall-back fold takes the earlier of the two instants; a spring-forward
/// gap is probed past in 30-minute steps. Returns `None` only on calendar
/// overflow.
pub(crate) fn resolve_local(tz: Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    let mut probe = local;
    // DST gaps are at most a few hours wide.
    for _ in 0..8 {
        match tz.from_local_datetime(&probe) {
            LocalResult::Single(dt) => return Some(dt),
            LocalResult::Ambiguous(earlier, _) => return Some(earlier),
            LocalResult::None => {
                probe = probe.checked_add_signed(Duration::minutes(30))?;
            }
        }
    }
    None
}

/// First instant at `window.start` strictly after `from`, in `tz`.
///
/// With a weekday filter (`0` = Sunday) the candidate advances by civil days,
/// at most 7, until its local weekday is allowed. Day stepping goes through
/// `NaiveDate` rather than adding 24-hour spans, so a DST shift cannot bend
/// the start time.
pub fn next_window_start(
    tz: Tz,
    from: DateTime<Utc>,
    window: &TimeWindow,
    days: Option<&BTreeSet<u8>>,
) -> Option<DateTime<Tz>> {
    let local_from = from.with_timezone(&tz);
    let start_time = window.start.to_naive_time();

    let mut date = local_from.date_naive();
    let mut candidate = resolve_local(tz, date.and_time(start_time))?;
    if candidate <= local_from {
        // Today's opening has already passed.
        date = date.checked_add_days(Days::new(1))?;
        candidate = resolve_local(tz, date.and_time(start_time))?;
    }

    if let Some(days) = days {
        for _ in 0..7 {
            let weekday = candidate.weekday().num_days_from_sunday() as u8;
            if days.contains(&weekday) {
                break;
            }
            date = date.checked_add_days(Days::new(1))?;
            candidate = resolve_local(tz, date.and_time(start_time))?;
        }
    }

    Some(candidate)
}

/// Uniformly random instant inside the window occurrence opening at `start`.
///
/// The offset is drawn over `[0, duration)` minutes. For a midnight-crossing
/// window the pick may land past midnight, on the following civil day.
pub fn random_time_in_window<R: Rng + ?Sized>(
    start: DateTime<Tz>,
    window: &TimeWindow,
    rng: &mut R,
) -> Option<DateTime<Tz>> {
    let tz = start.timezone();
    let duration = window.duration_minutes();
    let offset = rng.gen_range(0..duration);
    let target = i64::from(window.start.minutes_from_midnight()) + offset;

    let mut date = start.date_naive();
    if target >= MINUTES_PER_DAY {
        date = date.checked_add_days(Days::new(1))?;
    }
    let minute_of_day = target % MINUTES_PER_DAY;
    let time = NaiveTime::from_hms_opt((minute_of_day / 60) as u32, (minute_of_day % 60) as u32, 0)?;
    resolve_local(tz, date.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use chrono_tz::Europe::Paris;
    use pacer_core::types::TimeOfDay;
    use rand::{rngs::StdRng, SeedableRng};

    fn window(start: &str, end: &str) -> TimeWindow {
        TimeWindow::new(
            TimeOfDay::parse(start).unwrap(),
            TimeOfDay::parse(end).unwrap(),
        )
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn start_later_today_is_used() {
        // 2026-08-07 05:00 UTC is 07:00 in Paris (CEST, UTC+2).
        let from = utc(2026, 8, 7, 5, 0);
        let start = next_window_start(Paris, from, &window("08:00", "10:00"), None).unwrap();
        assert_eq!(start.date_naive().day(), 7);
        assert_eq!((start.hour(), start.minute()), (8, 0));
    }

    #[test]
    fn start_exactly_now_moves_to_tomorrow() {
        // 06:00 UTC == 08:00 Paris, not strictly after the opening.
        let from = utc(2026, 8, 7, 6, 0);
        let start = next_window_start(Paris, from, &window("08:00", "10:00"), None).unwrap();
        assert_eq!(start.date_naive().day(), 8);
        assert_eq!((start.hour(), start.minute()), (8, 0));
    }

    #[test]
    fn passed_start_moves_to_tomorrow() {
        // 12:00 UTC == 14:00 Paris.
        let from = utc(2026, 8, 7, 12, 0);
        let start = next_window_start(Paris, from, &window("08:00", "10:00"), None).unwrap();
        assert_eq!(start.date_naive().day(), 8);
    }

    #[test]
    fn weekday_filter_advances_to_allowed_day() {
        // 2026-08-07 is a Friday; only Monday (1) is allowed.
        let from = utc(2026, 8, 7, 12, 0);
        let days: BTreeSet<u8> = [1].into_iter().collect();
        let start = next_window_start(Paris, from, &window("08:00", "10:00"), Some(&days)).unwrap();
        assert_eq!(start.weekday().num_days_from_sunday(), 1);
        assert_eq!(start.date_naive().day(), 10);
        assert_eq!((start.hour(), start.minute()), (8, 0));
    }

    #[test]
    fn weekday_filter_keeps_today_when_allowed() {
        let from = utc(2026, 8, 7, 5, 0);
        let friday: BTreeSet<u8> = [5].into_iter().collect();
        let start =
            next_window_start(Paris, from, &window("08:00", "10:00"), Some(&friday)).unwrap();
        assert_eq!(start.date_naive().day(), 7);
    }

    #[test]
    fn spring_forward_gap_resolves_past_the_jump() {
        // Paris skips 02:00-03:00 on 2026-03-29. A 02:30 opening does not
        // exist that day; the resolver lands on 03:00 CEST.
        let from = utc(2026, 3, 29, 0, 30); // 01:30 CET
        let start = next_window_start(Paris, from, &window("02:30", "04:30"), None).unwrap();
        assert_eq!(start.date_naive().day(), 29);
        assert_eq!((start.hour(), start.minute()), (3, 0));
    }

    #[test]
    fn random_pick_stays_inside_plain_window() {
        let from = utc(2026, 8, 7, 5, 0);
        let w = window("08:00", "10:00");
        let start = next_window_start(Paris, from, &w, None).unwrap();
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = random_time_in_window(start, &w, &mut rng).unwrap();
            assert!(w.contains(picked.time()), "picked {picked}");
            assert!(picked >= start);
        }
    }

    #[test]
    fn random_pick_can_cross_midnight_in_wrapping_window() {
        let from = utc(2026, 8, 7, 12, 0);
        let w = window("22:00", "06:00");
        let start = next_window_start(Paris, from, &w, None).unwrap();
        let mut crossed = false;
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = random_time_in_window(start, &w, &mut rng).unwrap();
            assert!(w.contains(picked.time()), "picked {picked}");
            if picked.date_naive() > start.date_naive() {
                crossed = true;
            }
        }
        // 6 of the 8 window hours lie past midnight, so some pick crosses.
        assert!(crossed);
    }
}
