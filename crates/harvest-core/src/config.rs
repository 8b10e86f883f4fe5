//! Configuration loading and typed config structures for a Harvest session.
//!
//! The configuration lives in `harvest-config.yaml` in the working
//! directory. Every field has a default matching the built-in economy
//! table, so an empty or missing file yields the standard game.

use std::path::Path;

use serde::Deserialize;

use harvest_farm::economy::{
    EconomyRules, INITIAL_MONEY, MAX_ORDERS, ORDER_SPAWN_CHANCE_PCT, TICK_RATE_MS, WIN_GOAL,
};

/// Environment variable that overrides `session.seed`.
pub const SEED_ENV_VAR: &str = "HARVEST_SEED";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    Env {
        /// The variable name.
        var: &'static str,
        /// The raw value.
        value: String,
    },

    /// A value is out of its allowed range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level session configuration.
///
/// Mirrors the structure of `harvest-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HarvestConfig {
    /// Seed and pacing.
    #[serde(default)]
    pub session: SessionConfig,

    /// Economy table.
    #[serde(default)]
    pub economy: EconomyConfig,

    /// Session boundary parameters.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HarvestConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `HARVEST_SEED` overrides `session.seed` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, and
    /// [`ConfigError::Env`] or [`ConfigError::Invalid`] for bad values.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, and
    /// [`ConfigError::Env`] or [`ConfigError::Invalid`] for bad values.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml rejects an empty document; treat it as all defaults.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.session.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.economy.win_goal == 0 {
            return Err(ConfigError::Invalid {
                reason: "economy.win_goal must be at least 1".to_owned(),
            });
        }
        if self.economy.max_orders == 0 {
            return Err(ConfigError::Invalid {
                reason: "economy.max_orders must be at least 1".to_owned(),
            });
        }
        if self.economy.order_spawn_chance_pct > 100 {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "economy.order_spawn_chance_pct must be 0-100, got {}",
                    self.economy.order_spawn_chance_pct
                ),
            });
        }
        Ok(())
    }
}

/// Seed and pacing of a session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// Seed for order generation. A random seed is drawn when unset.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Real-time milliseconds per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl SessionConfig {
    /// Override the seed with `HARVEST_SEED` when it is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if the variable is not a valid `u64`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var(SEED_ENV_VAR) {
            let seed = val.trim().parse::<u64>().map_err(|_err| ConfigError::Env {
                var: SEED_ENV_VAR,
                value: val.clone(),
            })?;
            self.seed = Some(seed);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Economy table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EconomyConfig {
    /// Money at the start of a session.
    #[serde(default = "default_initial_money")]
    pub initial_money: u64,

    /// Money needed to win.
    #[serde(default = "default_win_goal")]
    pub win_goal: u64,

    /// Maximum outstanding orders.
    #[serde(default = "default_max_orders")]
    pub max_orders: usize,

    /// Per-tick order arrival chance in percent.
    #[serde(default = "default_order_spawn_chance_pct")]
    pub order_spawn_chance_pct: u32,
}

impl EconomyConfig {
    /// The rules a session runs with.
    pub const fn rules(&self) -> EconomyRules {
        EconomyRules {
            initial_money: self.initial_money,
            win_goal: self.win_goal,
            max_orders: self.max_orders,
            order_spawn_chance_pct: self.order_spawn_chance_pct,
        }
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            initial_money: default_initial_money(),
            win_goal: default_win_goal(),
            max_orders: default_max_orders(),
            order_spawn_chance_pct: default_order_spawn_chance_pct(),
        }
    }
}

/// Session boundary configuration.
///
/// A value of 0 for either field means unlimited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Maximum number of ticks before the session ends (0 = unlimited).
    #[serde(default)]
    pub max_ticks: u64,

    /// Maximum wall-clock seconds before the session ends (0 = unlimited).
    #[serde(default)]
    pub max_real_time_seconds: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is unset (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_tick_interval_ms() -> u64 {
    TICK_RATE_MS
}

const fn default_initial_money() -> u64 {
    INITIAL_MONEY
}

const fn default_win_goal() -> u64 {
    WIN_GOAL
}

const fn default_max_orders() -> usize {
    MAX_ORDERS
}

const fn default_order_spawn_chance_pct() -> u32 {
    ORDER_SPAWN_CHANCE_PCT
}

fn default_log_level() -> String {
    "info".to_owned()
}
