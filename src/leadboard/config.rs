use crate::error::{LeadError, Result};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_ASSIGNEE: &str = "System";
const DEFAULT_SOURCE: &str = "Website";
const DEFAULT_FOLLOW_UP_HOURS: i64 = 24;
// ten years
const MAX_FOLLOW_UP_HOURS: i64 = 24 * 365 * 10;
// en-US locale rendering, e.g. "1/21/2024, 3:04:05 PM"
const DEFAULT_NOTE_TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Defaults applied to new leads and notes, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LeadboardConfig {
    /// Owner recorded on leads created without an explicit assignee
    pub default_assignee: String,

    /// Acquisition channel recorded when the form doesn't supply one
    pub default_source: String,

    /// How far after creation the first follow-up is scheduled
    pub follow_up_hours: i64,

    /// chrono format string for the timestamp prefix of appended notes (local time)
    pub note_timestamp_format: String,
}

impl Default for LeadboardConfig {
    fn default() -> Self {
        Self {
            default_assignee: DEFAULT_ASSIGNEE.to_string(),
            default_source: DEFAULT_SOURCE.to_string(),
            follow_up_hours: DEFAULT_FOLLOW_UP_HOURS,
            note_timestamp_format: DEFAULT_NOTE_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl LeadboardConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(LeadError::Io)?;
        let config: LeadboardConfig =
            serde_json::from_str(&content).map_err(LeadError::Serialization)?;
        config.check()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(LeadError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(LeadError::Serialization)?;
        fs::write(config_path, content).map_err(LeadError::Io)?;
        Ok(())
    }

    /// When the first follow-up falls for a lead created at `from`.
    ///
    /// The delay is clamped to `0..=MAX_FOLLOW_UP_HOURS`, so a config built in code
    /// without going through [`LeadboardConfig::load`] still cannot overflow.
    pub fn follow_up_after(&self, from: DateTime<Utc>) -> DateTime<Utc> {
        let hours = self.follow_up_hours.clamp(0, MAX_FOLLOW_UP_HOURS);
        TimeDelta::try_hours(hours)
            .and_then(|delay| from.checked_add_signed(delay))
            .unwrap_or(from)
    }

    fn check(&self) -> Result<()> {
        if !(0..=MAX_FOLLOW_UP_HOURS).contains(&self.follow_up_hours) {
            return Err(LeadError::Validation(format!(
                "follow_up_hours must be between 0 and {}, got {}",
                MAX_FOLLOW_UP_HOURS, self.follow_up_hours
            )));
        }
        if self.note_timestamp_format.trim().is_empty() {
            return Err(LeadError::Validation(
                "note_timestamp_format must not be empty".into(),
            ));
        }
        Ok(())
    }
}
