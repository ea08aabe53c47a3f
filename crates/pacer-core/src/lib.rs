//! `pacer-core` — value types and validation for agent run frequencies.
//!
//! # Overview
//!
//! Agent run cadence arrives from the dashboard as a loose, all-optional
//! [`FrequencySpec`]. This crate checks it ([`validate_frequency`] collects
//! every problem at once), narrows it into the typed [`FrequencyConfig`] sum
//! type, and renders/compares it for display ([`describe_frequency`],
//! [`frequencies_equal`]). The actual next-run computation lives in
//! `pacer-scheduler`.
//!
//! # Frequency kinds
//!
//! | Kind       | Behaviour                                                 |
//! |------------|-----------------------------------------------------------|
//! | `interval` | Repeat every N minutes, optional ± jitter, optional window |
//! | `daily`    | Once per day, at a random time inside an HH:mm window      |
//! | `weekly`   | Like `daily`, restricted to an allowed set of weekdays     |
//!
//! Windows may cross midnight (`22:00-06:00`) and must span at least an hour.

pub mod config;
pub mod describe;
pub mod error;
pub mod types;
pub mod validate;

pub use config::{SchedulerConfig, DEFAULT_TIMEZONE, MIN_WINDOW_MINUTES};
pub use describe::{describe_frequency, frequencies_equal};
pub use error::{Result, SchedulerError};
pub use types::{
    FrequencyConfig, FrequencySpec, TimeOfDay, TimeWindow, ValidationReport, MINUTES_PER_DAY,
};
pub use validate::validate_frequency;
