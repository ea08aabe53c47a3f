use thiserror::Error;

/// Errors that can occur within the scheduling core.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The frequency configuration failed validation. The message carries
    /// every detected problem, comma-joined.
    #[error("Invalid frequency configuration: {0}")]
    Configuration(String),

    /// A time-of-day string is not a valid `HH:mm` value.
    #[error("Invalid time of day: {0} (expected HH:mm)")]
    TimeOfDay(String),

    /// The configured IANA timezone name is unknown to the tz database.
    #[error("Unknown timezone: {0}")]
    Timezone(String),

    /// The settings file or environment overrides could not be read.
    #[error("Settings error: {0}")]
    Settings(String),

    /// Date arithmetic left the representable calendar range.
    #[error("Next-run computation left the supported date range")]
    OutOfRange,
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
