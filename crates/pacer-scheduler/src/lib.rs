//! `pacer-scheduler` — timezone-aware next-run computation for agent jobs.
//!
//! # Overview
//!
//! A [`Planner`] turns a frequency spec into the next absolute execution
//! instant. All window and weekday arithmetic happens in the planner's named
//! IANA zone (Europe/Paris by default), because daily and weekly cadences
//! are civil-calendar concepts; DST transitions come from the tz database,
//! not from offset math.
//!
//! # Frequency variants
//!
//! | Variant    | Behaviour                                                  |
//! |------------|------------------------------------------------------------|
//! | `interval` | now + N minutes ± jitter, optionally snapped into a window |
//! | `daily`    | next window opening, at a random minute inside the window  |
//! | `weekly`   | like `daily`, restricted to the configured weekdays        |
//!
//! Randomness (jitter and in-window placement) is drawn through an injected
//! [`rand::Rng`] so tests can seed it; the convenience path uses the thread
//! RNG. The computation itself is pure: no I/O, no shared state, nothing is
//! retained between calls.

pub mod jitter;
pub mod planner;
pub mod window;

pub use jitter::random_jitter;
pub use planner::{NextRun, Planner};
pub use window::{next_window_start, random_time_in_window};
