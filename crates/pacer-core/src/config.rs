use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};

/// Zone every window and weekday computation is carried out in, unless
/// overridden. Daily and weekly frequencies are civil-calendar concepts, so
/// the zone must be a named IANA zone, not a fixed UTC offset.
pub const DEFAULT_TIMEZONE: &str = "Europe/Paris";

/// Narrowest window the validator accepts, in minutes.
pub const MIN_WINDOW_MINUTES: i64 = 60;

/// Scheduling settings (`pacer.toml` + `PACER_*` env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// IANA zone name used for civil-time arithmetic.
    /// Override with env var: PACER_TIMEZONE=America/New_York
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl SchedulerConfig {
    /// Load `pacer.toml` from the working directory, then apply `PACER_*`
    /// environment overrides. Missing file and missing keys fall back to
    /// defaults.
    pub fn load() -> Result<Self> {
        let config: SchedulerConfig = Figment::new()
            .merge(Toml::file("pacer.toml"))
            .merge(Env::prefixed("PACER_"))
            .extract()
            .map_err(|e| SchedulerError::Settings(e.to_string()))?;
        tracing::debug!(timezone = %config.timezone, "scheduler settings loaded");
        Ok(config)
    }
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_zone_is_paris() {
        assert_eq!(SchedulerConfig::default().timezone, "Europe/Paris");
    }
}
