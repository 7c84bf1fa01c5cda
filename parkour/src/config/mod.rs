//! Configuration system for parkour.
//!
//! This module provides layered configuration with support for:
//! - A YAML user configuration file
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//!
//! # Configuration Precedence
//!
//! Highest to lowest:
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`PARKOUR_*`)
//! 3. User config (`$PARKOUR_CONFIG_DIR/config.yaml` or
//!    `~/.config/parkour/config.yaml`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use parkour::config::ConfigBuilder;
//! use parkour::RootResolver;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! let resolver = RootResolver::from_config(&config);
//! println!("searching at most {} levels", resolver.max_depth());
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use parkour::config::{Config, ConfigBuilder};
//!
//! let custom = Config {
//!     stop_at_home: Some(false),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert!(!config.effective_stop_at_home());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, IndicatorConfig, IndicatorEntry, OutputFormat};
pub use validator::ConfigValidator;
