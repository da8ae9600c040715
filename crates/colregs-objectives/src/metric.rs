//! CPA distance to utility remapping shared by every rule.

use colregs_core::constants::MAX_UTILITY;
use colregs_core::error::{ConfigError, Result};

/// Piecewise-linear remap of a CPA distance.
///
/// Below `collision` the utility is 0. At `collision` it is `floor`, rising
/// linearly to 100 at `all_clear` and holding 100 beyond.
pub fn cpa_utility(dist: f64, collision: f64, all_clear: f64, floor: f64) -> f64 {
    if dist < collision {
        return 0.0;
    }
    if dist >= all_clear {
        return MAX_UTILITY;
    }
    let range = all_clear - collision;
    if range <= 0.0 {
        return MAX_UTILITY;
    }
    floor + (MAX_UTILITY - floor) * (dist - collision) / range
}

/// Distance thresholds and horizon common to all rule objectives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpaRemap {
    pub collision_distance: f64,
    pub all_clear_distance: f64,
    /// CPA projection horizon (seconds).
    pub tol: f64,
}

impl CpaRemap {
    pub fn new(collision_distance: f64, all_clear_distance: f64, tol: f64) -> Result<Self> {
        let remap = Self {
            collision_distance,
            all_clear_distance,
            tol,
        };
        remap.validate()?;
        Ok(remap)
    }

    /// Reject non-finite or negative distances, an inverted pair, or a
    /// non-positive horizon.
    pub fn validate(&self) -> Result<()> {
        for (param, v) in [
            ("collision_distance", self.collision_distance),
            ("all_clear_distance", self.all_clear_distance),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ConfigError::invalid(param, &v.to_string()));
            }
        }
        if self.collision_distance > self.all_clear_distance {
            return Err(ConfigError::InvertedDistances {
                collision: self.collision_distance,
                all_clear: self.all_clear_distance,
            });
        }
        if !self.tol.is_finite() || self.tol <= 0.0 {
            return Err(ConfigError::invalid("tol", &self.tol.to_string()));
        }
        Ok(())
    }

    pub fn utility(&self, dist: f64, floor: f64) -> f64 {
        cpa_utility(dist, self.collision_distance, self.all_clear_distance, floor)
    }
}
