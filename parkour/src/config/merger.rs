//! Configuration merging and precedence handling.
//!
//! Scalar fields are overwritten by higher-precedence sources; indicator
//! lists accumulate per tier.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, IndicatorConfig};
use crate::root::Tier;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use parkour::config::{Config, ConfigMerger};
///
/// let low = Config { max_depth: Some(10), ..Default::default() };
/// let high = Config { max_depth: Some(20), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.max_depth, Some(20));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Indicators: accumulated per tier, a repeated category replaces
    ///   the earlier entry in place
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.max_depth.is_some() {
            target.max_depth = source.max_depth;
        }

        if source.stop_at_home.is_some() {
            target.stop_at_home = source.stop_at_home;
        }

        if source.data_dir.is_some() {
            target.data_dir.clone_from(&source.data_dir);
        }

        if source.busy_timeout_seconds.is_some() {
            target.busy_timeout_seconds = source.busy_timeout_seconds;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref source_indicators) = source.indicators {
            match &mut target.indicators {
                Some(target_indicators) => {
                    Self::merge_indicators(target_indicators, source_indicators);
                }
                None => target.indicators.clone_from(&source.indicators),
            }
        }
    }

    fn merge_indicators(target: &mut IndicatorConfig, source: &IndicatorConfig) {
        for tier in Tier::ALL {
            let entries = match tier {
                Tier::VersionControl => &mut target.version_control,
                Tier::Workspace => &mut target.workspace,
                Tier::Language => &mut target.language,
            };
            for entry in source.tier(tier) {
                match entries.iter_mut().find(|e| e.category == entry.category) {
                    Some(existing) => existing.clone_from(entry),
                    None => entries.push(entry.clone()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{IndicatorEntry, OutputFormat};
    use std::path::PathBuf;

    fn make_source(precedence: u8, config: Config) -> ConfigSource {
        ConfigSource {
            path: PathBuf::from(format!("test-{precedence}.yaml")),
            precedence,
            config,
        }
    }

    fn language(entries: &[(&str, &str)]) -> Option<IndicatorConfig> {
        Some(IndicatorConfig {
            language: entries
                .iter()
                .map(|(category, pattern)| IndicatorEntry {
                    category: (*category).into(),
                    patterns: vec![(*pattern).into()],
                    priority: None,
                })
                .collect(),
            ..Default::default()
        })
    }

    #[test]
    fn test_merge_simple_fields() {
        let mut target = Config::default();
        let source = Config {
            max_depth: Some(8),
            stop_at_home: Some(false),
            output_format: Some(OutputFormat::Json),
            ..Default::default()
        };

        ConfigMerger::merge_into(&mut target, &source);
        assert_eq!(target.max_depth, Some(8));
        assert_eq!(target.stop_at_home, Some(false));
        assert_eq!(target.output_format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_merge_none_values_dont_overwrite() {
        let mut target = Config {
            data_dir: Some(PathBuf::from("/keep")),
            ..Default::default()
        };
        let source = Config {
            busy_timeout_seconds: Some(2),
            ..Default::default()
        };

        ConfigMerger::merge_into(&mut target, &source);
        assert_eq!(target.data_dir, Some(PathBuf::from("/keep")));
        assert_eq!(target.busy_timeout_seconds, Some(2));
    }

    #[test]
    fn test_merge_indicators_accumulate() {
        let mut target = Config {
            indicators: language(&[("zig", "build.zig")]),
            ..Default::default()
        };
        let source = Config {
            indicators: language(&[("elixir", "mix.exs")]),
            ..Default::default()
        };

        ConfigMerger::merge_into(&mut target, &source);
        let names: Vec<_> = target
            .indicators
            .unwrap()
            .language
            .into_iter()
            .map(|e| e.category)
            .collect();
        assert_eq!(names, ["zig", "elixir"]);
    }

    #[test]
    fn test_merge_indicators_replace_same_category() {
        let mut target = Config {
            indicators: language(&[("zig", "build.zig")]),
            ..Default::default()
        };
        let source = Config {
            indicators: language(&[("zig", "build.zig.zon")]),
            ..Default::default()
        };

        ConfigMerger::merge_into(&mut target, &source);
        let entries = target.indicators.unwrap().language;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].patterns, ["build.zig.zon"]);
    }

    #[test]
    fn test_merge_multiple_sources() {
        let sources = vec![
            make_source(
                1,
                Config {
                    max_depth: Some(5),
                    stop_at_home: Some(true),
                    ..Default::default()
                },
            ),
            make_source(
                2,
                Config {
                    max_depth: Some(9),
                    ..Default::default()
                },
            ),
        ];

        let result = ConfigMerger::merge(sources);
        assert_eq!(result.max_depth, Some(9));
        assert_eq!(result.stop_at_home, Some(true));
    }
}
