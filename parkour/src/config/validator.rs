//! Configuration validation.

use crate::config::schema::{Config, IndicatorConfig, IndicatorEntry};
use crate::error::{Error, Result};
use crate::root::Tier;
use std::collections::HashSet;

/// Largest accepted `max_depth`.
pub const MAX_DEPTH_LIMIT: usize = 1000;

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use parkour::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { max_depth: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(depth) = config.max_depth {
            if depth == 0 || depth > MAX_DEPTH_LIMIT {
                return Err(Error::Validation {
                    field: "max_depth".into(),
                    message: format!("Must be between 1 and {MAX_DEPTH_LIMIT}"),
                });
            }
        }

        if let Some(timeout) = config.busy_timeout_seconds {
            if timeout == 0 {
                return Err(Error::Validation {
                    field: "busy_timeout_seconds".into(),
                    message: "Timeout must be greater than 0".into(),
                });
            }
        }

        if let Some(dir) = &config.data_dir {
            if dir.as_os_str().is_empty() {
                return Err(Error::Validation {
                    field: "data_dir".into(),
                    message: "Cannot be empty".into(),
                });
            }
        }

        if let Some(indicators) = &config.indicators {
            Self::validate_indicators(indicators)?;
        }

        Ok(())
    }

    fn validate_indicators(indicators: &IndicatorConfig) -> Result<()> {
        for tier in Tier::ALL {
            let mut seen = HashSet::new();
            for entry in indicators.tier(tier) {
                let field = format!("indicators.{}", Self::tier_key(tier));
                Self::validate_entry(&field, entry)?;
                if !seen.insert(entry.category.trim()) {
                    return Err(Error::Validation {
                        field,
                        message: format!("Duplicate category '{}'", entry.category),
                    });
                }
            }
        }
        Ok(())
    }

    const fn tier_key(tier: Tier) -> &'static str {
        match tier {
            Tier::VersionControl => "version_control",
            Tier::Workspace => "workspace",
            Tier::Language => "language",
        }
    }

    fn validate_entry(field: &str, entry: &IndicatorEntry) -> Result<()> {
        Self::validate_identifier(&format!("{field}.category"), &entry.category)?;

        if entry.patterns.is_empty() {
            return Err(Error::Validation {
                field: format!("{field}.{}", entry.category),
                message: "At least one pattern is required".into(),
            });
        }

        for pattern in &entry.patterns {
            let pattern_field = format!("{field}.{}.patterns", entry.category);
            Self::validate_identifier(&pattern_field, pattern)?;
            if pattern.contains('/') || pattern.contains('\\') {
                return Err(Error::Validation {
                    field: pattern_field,
                    message: format!("Pattern '{pattern}' must name a single entry"),
                });
            }
            if pattern.trim() == "*" {
                return Err(Error::Validation {
                    field: pattern_field,
                    message: "Wildcard pattern needs a suffix".into(),
                });
            }
        }
        Ok(())
    }

    /// Checks that the identifier is non-empty after trimming, contains no
    /// null bytes, and is not longer than 255 characters.
    fn validate_identifier(field: &str, value: &str) -> Result<()> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot be empty or only whitespace".into(),
            });
        }

        if trimmed.contains('\0') {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot contain null bytes".into(),
            });
        }

        if trimmed.len() > 255 {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot exceed 255 characters".into(),
            });
        }

        Ok(())
    }
}
