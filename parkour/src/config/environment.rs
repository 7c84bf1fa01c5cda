//! Environment variable handling for configuration overrides.
//!
//! `PARKOUR_*` variables override values read from configuration files.

use crate::config::schema::Config;
use crate::database::DATA_DIR_ENV;
use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Overrides the resolver depth bound.
pub const MAX_DEPTH_ENV: &str = "PARKOUR_MAX_DEPTH";
/// Overrides whether the home directory stops the resolver.
pub const STOP_AT_HOME_ENV: &str = "PARKOUR_STOP_AT_HOME";
/// Overrides the database busy timeout, in seconds.
pub const BUSY_TIMEOUT_ENV: &str = "PARKOUR_BUSY_TIMEOUT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use parkour::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Empty variables are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., non-numeric depth, invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(val) = Self::var(MAX_DEPTH_ENV) {
            config.max_depth = Some(val.parse().map_err(|_| Error::Validation {
                field: MAX_DEPTH_ENV.into(),
                message: "Must be a positive integer".into(),
            })?);
        }

        if let Some(val) = Self::var(STOP_AT_HOME_ENV) {
            config.stop_at_home = Some(Self::parse_bool(STOP_AT_HOME_ENV, &val)?);
        }

        if let Some(val) = Self::var(DATA_DIR_ENV) {
            config.data_dir = Some(PathBuf::from(val));
        }

        if let Some(val) = Self::var(BUSY_TIMEOUT_ENV) {
            config.busy_timeout_seconds = Some(val.parse().map_err(|_| Error::Validation {
                field: BUSY_TIMEOUT_ENV.into(),
                message: "Must be a positive integer".into(),
            })?);
        }

        Ok(())
    }

    fn var(name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.trim().is_empty())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
