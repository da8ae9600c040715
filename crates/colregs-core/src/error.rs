//! Error types for configuration and per-tick data checks.

use crate::enums::{DataSource, EncounterMode, Submode};

/// Rejected configuration. The previous value is kept.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown parameter: {0}")]
    UnknownParam(String),
    #[error("invalid value for {param}: {value:?}")]
    InvalidValue { param: String, value: String },
    #[error("missing required parameter: {0}")]
    MissingParam(&'static str),
    #[error("collision distance {collision} exceeds all-clear distance {all_clear}")]
    InvertedDistances { collision: f64, all_clear: f64 },
    #[error("submode {submode} is not valid for mode {mode}")]
    InvalidModePair { mode: EncounterMode, submode: Submode },
}

impl ConfigError {
    pub fn invalid(param: &str, value: &str) -> Self {
        ConfigError::InvalidValue {
            param: param.to_string(),
            value: value.to_string(),
        }
    }
}

/// Kinematics too old to act on. The tick abstains.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{origin} data is stale: age {age:.2}s exceeds {max_age:.2}s")]
pub struct StaleDataError {
    pub origin: DataSource,
    pub age: f64,
    pub max_age: f64,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Parse a finite, non-negative number.
pub fn parse_non_negative(param: &str, value: &str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(ConfigError::invalid(param, value)),
    }
}

/// Parse a finite number strictly greater than zero.
pub fn parse_positive(param: &str, value: &str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(ConfigError::invalid(param, value)),
    }
}

/// Parse "true"/"false" (case-insensitive).
pub fn parse_bool(param: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::invalid(param, value)),
    }
}
