//! # CLI Configuration Module
//!
//! Loads the settings of the `groupsync` binaries from environment variables,
//! falling back to defaults where a variable is not set.
//!
//! ## Environment Variables
//!
//! - `GROUPSYNC_GROUP_SIZE`: Maximum number of students per group (default: 4)
//! - `GROUPSYNC_OUTPUT_TIMEZONE`: Timezone meeting times are reported in (default: "UTC")
//! - `GROUPSYNC_STRATEGY`: `greedy` or `hill-climbing` (default: "greedy")
//! - `GROUPSYNC_SEED`: Seed for hill climbing and random rosters (optional)
//! - `GROUPSYNC_INPUT`: File with one schedule code per line (default: stdin)
//! - `GROUPSYNC_RANDOM_COUNT`: Number of codes printed by `random-students` (default: 50)
//! - `LOG_LEVEL`: Logging level (default: "info")

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use eyre::{eyre, Result, WrapErr};
use groupsync_core::{GreedyOverlap, GroupingStrategy, HillClimbing};
use tracing::Level;

/// How students are split into groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    Greedy,
    HillClimbing,
}

impl Strategy {
    /// Instantiates the strategy. `seed` only matters for hill climbing and
    /// defaults to 0.
    pub fn build(self, seed: Option<u64>) -> Box<dyn GroupingStrategy> {
        match self {
            Self::Greedy => Box::new(GreedyOverlap),
            Self::HillClimbing => Box::new(HillClimbing::new(seed.unwrap_or_default())),
        }
    }
}

impl FromStr for Strategy {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy" => Ok(Self::Greedy),
            "hill-climbing" | "hill_climbing" | "hillclimbing" => Ok(Self::HillClimbing),
            other => Err(eyre!("Unknown grouping strategy: {other}")),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Greedy => f.write_str("greedy"),
            Self::HillClimbing => f.write_str("hill-climbing"),
        }
    }
}

/// Configuration shared by the `groupsync` and `random-students` binaries.
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use groupsync_cli::config::GroupsConfig;
///
/// fn example() -> Result<()> {
///     let config = GroupsConfig::from_env()?;
///     println!("Forming groups of {} in {}", config.group_size, config.output_timezone);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GroupsConfig {
    /// Maximum number of students per group
    pub group_size: usize,

    /// IANA name of the timezone suggested meeting times are expressed in
    pub output_timezone: String,

    pub strategy: Strategy,

    /// Seed for hill climbing and random rosters; random when unset
    pub seed: Option<u64>,

    /// File to read schedule codes from; stdin when unset
    pub input: Option<PathBuf>,

    /// Number of students generated by `random-students`
    pub random_count: usize,

    /// Log level for the application
    pub log_level: Level,
}

impl Default for GroupsConfig {
    fn default() -> Self {
        Self {
            group_size: 4,
            output_timezone: "UTC".to_string(),
            strategy: Strategy::Greedy,
            seed: None,
            input: None,
            random_count: 50,
            log_level: Level::INFO,
        }
    }
}

impl GroupsConfig {
    /// Creates a new GroupsConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `GROUPSYNC_GROUP_SIZE`, `GROUPSYNC_SEED` or `GROUPSYNC_RANDOM_COUNT`
    ///   cannot be parsed as a number
    /// - `GROUPSYNC_STRATEGY` names an unknown strategy
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`GroupsConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let group_size = match lookup("GROUPSYNC_GROUP_SIZE") {
            Some(value) => value.trim().parse().wrap_err("Invalid GROUPSYNC_GROUP_SIZE value")?,
            None => defaults.group_size,
        };

        let output_timezone = lookup("GROUPSYNC_OUTPUT_TIMEZONE")
            .map(|tz| tz.trim().to_string())
            .unwrap_or(defaults.output_timezone);

        let strategy = match lookup("GROUPSYNC_STRATEGY") {
            Some(value) => value.parse().wrap_err("Invalid GROUPSYNC_STRATEGY value")?,
            None => defaults.strategy,
        };

        let seed = lookup("GROUPSYNC_SEED")
            .map(|value| value.trim().parse())
            .transpose()
            .wrap_err("Invalid GROUPSYNC_SEED value")?;

        let input = lookup("GROUPSYNC_INPUT")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let random_count = match lookup("GROUPSYNC_RANDOM_COUNT") {
            Some(value) => value.trim().parse().wrap_err("Invalid GROUPSYNC_RANDOM_COUNT value")?,
            None => defaults.random_count,
        };

        // Logging settings
        let log_level = match lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        Ok(Self {
            group_size,
            output_timezone,
            strategy,
            seed,
            input,
            random_count,
            log_level,
        })
    }
}
