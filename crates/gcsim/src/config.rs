//! Configuration Module - Simulation Parameters
//!
//! Manages the parameters a session is built from: heap capacity, the size
//! used when a request does not name one, and how much history is kept.

use crate::logging::GcLoggerConfig;

/// Default heap capacity in memory units
pub const DEFAULT_CAPACITY: usize = 1024;

/// Size given to objects created without a positive size
pub const DEFAULT_OBJECT_SIZE: usize = 10;

/// Number of cycle records kept by `GcStats`
pub const DEFAULT_CYCLE_HISTORY: usize = 64;

/// Main configuration for a simulation session
///
/// # Examples
///
/// ```rust
/// use gcsim::SimConfig;
///
/// let config = SimConfig {
///     capacity: 100,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Total heap capacity in memory units
    ///
    /// Object creation is rejected once the sum of live sizes would exceed it.
    /// Default: 1024
    pub capacity: usize,

    /// Size used when a creation request has no positive size
    ///
    /// Default: 10
    pub default_object_size: usize,

    /// Number of per-cycle records retained in the statistics history
    ///
    /// Default: 64
    pub cycle_history: usize,

    /// Enable verbose logging
    ///
    /// Cycle summaries go to `log::info!` instead of `log::debug!`.
    /// Default: false
    pub verbose: bool,

    /// Event logger settings
    pub logger: GcLoggerConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            capacity: DEFAULT_CAPACITY,
            default_object_size: DEFAULT_OBJECT_SIZE,
            cycle_history: DEFAULT_CYCLE_HISTORY,
            verbose: false,
            logger: GcLoggerConfig::default(),
        }
    }
}

impl SimConfig {
    /// Configuration with the given capacity and defaults elsewhere
    pub fn with_capacity(capacity: usize) -> Self {
        SimConfig {
            capacity,
            ..Default::default()
        }
    }

    /// Validate configuration
    ///
    /// ```rust
    /// use gcsim::SimConfig;
    ///
    /// let config = SimConfig {
    ///     capacity: 0,  // Invalid!
    ///     ..Default::default()
    /// };
    ///
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::InvalidCapacity(
                "capacity must be > 0".to_string(),
            ));
        }

        if self.default_object_size == 0 {
            return Err(ConfigError::InvalidObjectSize(
                "default_object_size must be > 0".to_string(),
            ));
        }

        if self.cycle_history == 0 {
            return Err(ConfigError::InvalidHistory(
                "cycle_history must be > 0".to_string(),
            ));
        }

        if self.logger.max_events == 0 {
            return Err(ConfigError::InvalidHistory(
                "logger.max_events must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Build configuration from environment variables
    ///
    /// Overrides defaults with environment variables:
    /// - GCSIM_CAPACITY
    /// - GCSIM_DEFAULT_SIZE
    /// - GCSIM_CYCLE_HISTORY
    /// - GCSIM_VERBOSE
    /// - GCSIM_LOG_JSON
    ///
    /// Values that fail to parse are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("GCSIM_CAPACITY") {
            if let Ok(capacity) = val.parse::<usize>() {
                config.capacity = capacity;
            }
        }

        if let Ok(val) = std::env::var("GCSIM_DEFAULT_SIZE") {
            if let Ok(size) = val.parse::<usize>() {
                config.default_object_size = size;
            }
        }

        if let Ok(val) = std::env::var("GCSIM_CYCLE_HISTORY") {
            if let Ok(n) = val.parse::<usize>() {
                config.cycle_history = n;
            }
        }

        if let Ok(val) = std::env::var("GCSIM_VERBOSE") {
            config.verbose = env_flag(&val);
        }

        if let Ok(val) = std::env::var("GCSIM_LOG_JSON") {
            config.logger.json = env_flag(&val);
        }

        config
    }
}

fn env_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

/// Error types for configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid capacity: {0}")]
    InvalidCapacity(String),

    #[error("Invalid object size: {0}")]
    InvalidObjectSize(String),

    #[error("Invalid history length: {0}")]
    InvalidHistory(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.capacity, 1024);
        assert_eq!(config.default_object_size, 10);
    }

    #[test]
    fn test_invalid_capacity() {
        let config = SimConfig::with_capacity(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCapacity(_))
        ));
    }

    #[test]
    fn test_invalid_default_size() {
        let config = SimConfig {
            default_object_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidObjectSize(_))
        ));
    }

    #[test]
    fn test_env_flag() {
        assert!(env_flag("1"));
        assert!(env_flag("TRUE"));
        assert!(!env_flag("yes"));
    }
}
