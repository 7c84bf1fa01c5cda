//! Configuration schema definitions.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::database::{default_data_dir, DatabaseConfig, DATABASE_FILE_NAME};
use crate::error::Result;
use crate::root::{Indicator, IndicatorSet, Tier, DEFAULT_MAX_DEPTH};

/// Busy timeout used when none is configured.
pub const DEFAULT_BUSY_TIMEOUT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional so that sources can be layered; unset fields
/// fall back to the built-in defaults through the accessor methods.
///
/// # Examples
///
/// ```
/// use parkour::config::Config;
///
/// let config: Config = serde_yaml::from_str("max_depth: 12\nstop_at_home: false\n").unwrap();
/// assert_eq!(config.effective_max_depth(), 12);
/// assert!(!config.effective_stop_at_home());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// How many levels above the start path the resolver examines.
    pub max_depth: Option<usize>,

    /// Whether reaching the home directory ends the resolver's search.
    pub stop_at_home: Option<bool>,

    /// Directory holding the state database.
    pub data_dir: Option<PathBuf>,

    /// Maximum time to wait for the database lock (seconds).
    pub busy_timeout_seconds: Option<u64>,

    /// Extra root indicators, appended after the built-ins of each tier.
    pub indicators: Option<IndicatorConfig>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Configured depth bound, or the default of 100.
    #[must_use]
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }

    /// Configured home stop, on by default.
    #[must_use]
    pub fn effective_stop_at_home(&self) -> bool {
        self.stop_at_home.unwrap_or(true)
    }

    /// Configured busy timeout, five seconds by default.
    #[must_use]
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(
            self.busy_timeout_seconds
                .unwrap_or(DEFAULT_BUSY_TIMEOUT_SECONDS),
        )
    }

    /// Database settings derived from `data_dir` and the busy timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory is configured and the home
    /// directory cannot be determined.
    pub fn database_config(&self) -> Result<DatabaseConfig> {
        let data_dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };
        Ok(DatabaseConfig::new(data_dir.join(DATABASE_FILE_NAME))
            .with_busy_timeout(self.busy_timeout()))
    }

    /// The built-in indicators followed by any configured ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use parkour::config::{Config, IndicatorConfig, IndicatorEntry};
    /// use parkour::root::Tier;
    ///
    /// let config = Config {
    ///     indicators: Some(IndicatorConfig {
    ///         language: vec![IndicatorEntry {
    ///             category: "elixir".into(),
    ///             patterns: vec!["mix.exs".into()],
    ///             priority: None,
    ///         }],
    ///         ..Default::default()
    ///     }),
    ///     ..Default::default()
    /// };
    /// let set = config.indicator_set();
    /// assert_eq!(set.tier(Tier::Language).last().unwrap().category(), "elixir");
    /// ```
    #[must_use]
    pub fn indicator_set(&self) -> IndicatorSet {
        let mut set = IndicatorSet::builtin();
        if let Some(extra) = &self.indicators {
            for tier in Tier::ALL {
                for entry in extra.tier(tier) {
                    set.push(tier, entry.to_indicator(tier));
                }
            }
        }
        set
    }
}

/// User-defined indicators per tier.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct IndicatorConfig {
    /// Extra version-control categories.
    #[serde(default)]
    pub version_control: Vec<IndicatorEntry>,
    /// Extra workspace categories.
    #[serde(default)]
    pub workspace: Vec<IndicatorEntry>,
    /// Extra language categories.
    #[serde(default)]
    pub language: Vec<IndicatorEntry>,
}

impl IndicatorConfig {
    /// The entries configured for one tier.
    #[must_use]
    pub fn tier(&self, tier: Tier) -> &[IndicatorEntry] {
        match tier {
            Tier::VersionControl => &self.version_control,
            Tier::Workspace => &self.workspace,
            Tier::Language => &self.language,
        }
    }

    /// Whether no entries are configured in any tier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Tier::ALL.iter().all(|t| self.tier(*t).is_empty())
    }
}

/// One configured indicator category.
///
/// ```yaml
/// indicators:
///   language:
///     - category: elixir
///       patterns: [mix.exs]
///     - category: dotnet-script
///       patterns: ["*.csx"]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct IndicatorEntry {
    /// Category name reported as the project kind.
    pub category: String,
    /// Entry names or `*suffix` wildcards.
    pub patterns: Vec<String>,
    /// Informational priority; defaults to the tier's.
    #[serde(default)]
    pub priority: Option<u32>,
}

impl IndicatorEntry {
    fn to_indicator(&self, tier: Tier) -> Indicator {
        Indicator::new(
            self.category.clone(),
            self.priority.unwrap_or(tier.default_priority()),
            &self.patterns,
        )
    }
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use parkour::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
    /// Human-readable table format.
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
            Self::Table => write!(f, "table"),
        }
    }
}
