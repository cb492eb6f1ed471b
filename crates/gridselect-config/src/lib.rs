//! Configuration system for gridselect.
//!
//! Load selection configuration from TOML or YAML files to control
//! rounding, diagnostics, extraction precision and time limits without
//! code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use gridselect_config::{SelectionConfig, TieBreak};
//! use std::time::Duration;
//!
//! let config = SelectionConfig::from_toml_str(r#"
//!     [rounding]
//!     cutoff = 0.6
//!     tie_break = "include"
//!
//!     [termination]
//!     seconds_spent_limit = 30
//! "#).unwrap();
//!
//! assert_eq!(config.rounding.cutoff, 0.6);
//! assert_eq!(config.rounding.tie_break, TieBreak::Include);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.extraction.precision, 3);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use gridselect_config::SelectionConfig;
//!
//! let config = SelectionConfig::load("gridselect.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use gridselect_core::SelectionError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default score above which a cell is selected.
pub const DEFAULT_CUTOFF: f64 = 0.5;

/// Default lower edge of the non-binary band.
pub const DEFAULT_NON_BINARY_LOWER: f64 = 0.0001;

/// Default upper edge of the non-binary band.
pub const DEFAULT_NON_BINARY_UPPER: f64 = 0.99;

/// Default number of decimals kept when normalizing scores.
pub const DEFAULT_PRECISION: u32 = 3;

/// Default constraint residual above which a backend result is inaccurate.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Largest supported extraction precision.
pub const MAX_PRECISION: u32 = 12;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for SelectionError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid(msg) => SelectionError::InvalidConfig(msg),
            other => SelectionError::InvalidConfig(other.to_string()),
        }
    }
}

/// Main selection configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SelectionConfig {
    /// Score thresholding.
    #[serde(default)]
    pub rounding: RoundingConfig,

    /// Non-binary position reporting.
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,

    /// Score normalization.
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Backend accuracy checks.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Time limit for the backend call.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,
}

impl SelectionConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or
    /// holds out-of-range values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cutoff = self.rounding.cutoff;
        if !(cutoff > 0.0 && cutoff < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "rounding.cutoff must lie in (0, 1), got {cutoff}"
            )));
        }

        let DiagnosticsConfig {
            non_binary_lower: lower,
            non_binary_upper: upper,
        } = self.diagnostics;
        if !(0.0..=1.0).contains(&lower) || !(0.0..=1.0).contains(&upper) || lower >= upper {
            return Err(ConfigError::Invalid(format!(
                "diagnostics band must satisfy 0 <= lower < upper <= 1, got ({lower}, {upper})"
            )));
        }

        if self.extraction.precision > MAX_PRECISION {
            return Err(ConfigError::Invalid(format!(
                "extraction.precision must be at most {MAX_PRECISION}, got {}",
                self.extraction.precision
            )));
        }

        let tolerance = self.backend.tolerance;
        if !(tolerance > 0.0 && tolerance.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "backend.tolerance must be positive and finite, got {tolerance}"
            )));
        }

        Ok(())
    }

    /// Sets the rounding cutoff.
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.rounding.cutoff = cutoff;
        self
    }

    /// Sets how a score exactly at the cutoff is rounded.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.rounding.tie_break = tie_break;
        self
    }

    /// Sets the open interval of scores reported as non-binary.
    pub fn with_non_binary_band(mut self, lower: f64, upper: f64) -> Self {
        self.diagnostics = DiagnosticsConfig {
            non_binary_lower: lower,
            non_binary_upper: upper,
        };
        self
    }

    /// Sets the number of decimals kept when normalizing scores.
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.extraction.precision = precision;
        self
    }

    /// Sets the termination time limit in seconds.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the termination time limit in milliseconds.
    pub fn with_termination_millis(mut self, millis: u64) -> Self {
        self.termination = Some(TerminationConfig {
            millis_spent_limit: Some(millis),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridselect_config::SelectionConfig;
    /// use std::time::Duration;
    ///
    /// let config = SelectionConfig::from_toml_str(r#"
    ///     [termination]
    ///     seconds_spent_limit = 2
    ///     millis_spent_limit = 500
    /// "#).unwrap();
    ///
    /// assert_eq!(config.time_limit(), Some(Duration::from_millis(2500)));
    /// ```
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }
}

/// How a score exactly equal to the cutoff is rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// `score == cutoff` rounds to 0 (strict `score > cutoff`).
    #[default]
    Exclude,

    /// `score == cutoff` rounds to 1.
    Include,
}

/// Rounding configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RoundingConfig {
    /// Scores above this value are selected.
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,

    /// Behavior at exactly the cutoff.
    #[serde(default)]
    pub tie_break: TieBreak,
}

impl Default for RoundingConfig {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            tie_break: TieBreak::default(),
        }
    }
}

/// Non-binary diagnostics configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DiagnosticsConfig {
    /// Scores must be strictly above this to be reported.
    #[serde(default = "default_non_binary_lower")]
    pub non_binary_lower: f64,

    /// Scores must be strictly below this to be reported.
    #[serde(default = "default_non_binary_upper")]
    pub non_binary_upper: f64,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            non_binary_lower: DEFAULT_NON_BINARY_LOWER,
            non_binary_upper: DEFAULT_NON_BINARY_UPPER,
        }
    }
}

/// Score extraction configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExtractionConfig {
    /// Decimals kept after truncating toward zero.
    #[serde(default = "default_precision")]
    pub precision: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

/// Backend accuracy configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BackendConfig {
    /// Largest tolerated constraint residual in a returned matrix.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to wait for the backend.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to wait for the backend, added to the seconds.
    pub millis_spent_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self
            .seconds_spent_limit
            .unwrap_or(0)
            .saturating_mul(1000)
            .saturating_add(self.millis_spent_limit.unwrap_or(0));
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }
}

fn default_cutoff() -> f64 {
    DEFAULT_CUTOFF
}

fn default_non_binary_lower() -> f64 {
    DEFAULT_NON_BINARY_LOWER
}

fn default_non_binary_upper() -> f64 {
    DEFAULT_NON_BINARY_UPPER
}

fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

#[cfg(test)]
mod tests;
