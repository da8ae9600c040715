//! Behavior configuration and its textual key=value surface.
//!
//! Distance families keep their ordering by clamping the partner values of
//! whichever field was set last.

use colregs_core::constants::*;
use colregs_core::decision::DecisionSpace;
use colregs_core::enums::{EncounterMode, PwtGrade, Submode};
use colregs_core::error::{parse_bool, parse_non_negative, parse_positive, ConfigError, Result};
use colregs_core::events::{AlertRequest, ConfigReport};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorConfig {
    pwt_outer_dist: f64,
    pwt_inner_dist: f64,
    completed_dist: f64,
    min_util_cpa_dist: f64,
    max_util_cpa_dist: f64,
    turn_radius: f64,
    giveway_bow_dist: f64,
    overtaking_bng_range: f64,
    headon_abs_relbng_thresh: f64,
    time_on_leg: f64,
    memory_time: f64,
    max_data_age: f64,
    priority_weight: f64,
    pwt_grade: PwtGrade,
    contact_type_required: Option<String>,
    no_alert_request: bool,
    descriptor: String,
    update_var: String,
    decision_space: DecisionSpace,
    /// Manually requested mode and submode, applied on the next tick.
    mode_override: Option<(EncounterMode, Submode)>,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            pwt_outer_dist: DEFAULT_PWT_OUTER_DIST,
            pwt_inner_dist: DEFAULT_PWT_INNER_DIST,
            completed_dist: DEFAULT_COMPLETED_DIST,
            min_util_cpa_dist: DEFAULT_MIN_UTIL_CPA_DIST,
            max_util_cpa_dist: DEFAULT_MAX_UTIL_CPA_DIST,
            turn_radius: DEFAULT_TURN_RADIUS,
            giveway_bow_dist: DEFAULT_GIVEWAY_BOW_DIST,
            overtaking_bng_range: DEFAULT_OVERTAKING_BNG_RANGE,
            headon_abs_relbng_thresh: DEFAULT_HEADON_ABS_RELBNG_THRESH,
            time_on_leg: DEFAULT_TIME_ON_LEG,
            memory_time: DEFAULT_MEMORY_TIME,
            max_data_age: DEFAULT_MAX_DATA_AGE,
            priority_weight: DEFAULT_PRIORITY_WEIGHT,
            pwt_grade: PwtGrade::default(),
            contact_type_required: None,
            no_alert_request: false,
            descriptor: DEFAULT_DESCRIPTOR.to_string(),
            update_var: DEFAULT_UPDATE_VAR.to_string(),
            decision_space: DecisionSpace::default(),
            mode_override: None,
        }
    }
}

impl BehaviorConfig {
    /// Apply one parameter. On error nothing changes and a warning is logged.
    pub fn set_param(&mut self, param: &str, value: &str) -> Result<()> {
        let result = self.apply_param(param.trim(), value.trim());
        if let Err(err) = &result {
            warn!(param, value, %err, "rejected behavior parameter");
        }
        result
    }

    /// Apply comma- or newline-separated `key=value` pairs, reporting each.
    pub fn apply_config_text(&mut self, text: &str) -> Vec<ConfigReport> {
        text.split([',', '\n'])
            .map(str::trim)
            .filter(|pair| !pair.is_empty() && !pair.starts_with("//"))
            .map(|pair| {
                let (param, value) = pair.split_once('=').unwrap_or((pair, ""));
                let result = if pair.contains('=') {
                    self.set_param(param, value)
                } else {
                    let err = ConfigError::invalid(param.trim(), "");
                    warn!(pair, %err, "malformed configuration pair");
                    Err(err)
                };
                ConfigReport {
                    param: param.trim().to_string(),
                    value: value.trim().to_string(),
                    accepted: result.is_ok(),
                    message: result.err().map(|e| e.to_string()),
                }
            })
            .collect()
    }

    fn apply_param(&mut self, param: &str, value: &str) -> Result<()> {
        match param.to_lowercase().as_str() {
            "pwt_outer_dist" => {
                let v = parse_non_negative(param, value)?;
                self.pwt_outer_dist = v;
                self.pwt_inner_dist = self.pwt_inner_dist.min(v);
                self.completed_dist = self.completed_dist.max(v);
            }
            "pwt_inner_dist" => {
                let v = parse_non_negative(param, value)?;
                self.pwt_inner_dist = v;
                self.pwt_outer_dist = self.pwt_outer_dist.max(v);
                self.completed_dist = self.completed_dist.max(v);
            }
            "completed_dist" => {
                let v = parse_non_negative(param, value)?;
                self.completed_dist = v;
                self.pwt_outer_dist = self.pwt_outer_dist.min(v);
                self.pwt_inner_dist = self.pwt_inner_dist.min(v);
            }
            "min_util_cpa_dist" => {
                let v = parse_non_negative(param, value)?;
                self.min_util_cpa_dist = v;
                self.max_util_cpa_dist = self.max_util_cpa_dist.max(v);
            }
            "max_util_cpa_dist" => {
                let v = parse_non_negative(param, value)?;
                self.max_util_cpa_dist = v;
                self.min_util_cpa_dist = self.min_util_cpa_dist.min(v);
            }
            "turn_radius" => self.turn_radius = parse_non_negative(param, value)?,
            "giveway_bow_dist" => self.giveway_bow_dist = parse_non_negative(param, value)?,
            "overtaking_bng_range" => self.overtaking_bng_range = parse_bearing(param, value)?,
            "headon_abs_relbng_thresh" => {
                self.headon_abs_relbng_thresh = parse_bearing(param, value)?
            }
            "time_on_leg" | "tol" => self.time_on_leg = parse_positive(param, value)?,
            "memory_time" => self.memory_time = parse_non_negative(param, value)?,
            "max_data_age" => self.max_data_age = parse_positive(param, value)?,
            "priority_weight" | "pwt" => self.priority_weight = parse_non_negative(param, value)?,
            "pwt_grade" => self.pwt_grade = value.parse()?,
            "contact_type_required" => {
                if value.is_empty() {
                    return Err(ConfigError::invalid(param, value));
                }
                self.contact_type_required = Some(value.to_lowercase());
            }
            "no_alert_request" => self.no_alert_request = parse_bool(param, value)?,
            "descriptor" => self.descriptor = parse_name(param, value)?,
            "update_var" => self.update_var = parse_name(param, value)?,
            "course_divisions" => {
                let n = parse_count(param, value)?;
                self.decision_space = self.decision_space.with_course_divisions(n)?;
            }
            "speed_divisions" => {
                let n = parse_count(param, value)?;
                self.decision_space = self.decision_space.with_speed_divisions(n)?;
            }
            "max_speed" => {
                let v = parse_positive(param, value)?;
                self.decision_space = self.decision_space.with_max_speed(v)?;
            }
            "avoid_mode" => {
                let mode: EncounterMode = value.parse()?;
                if mode == EncounterMode::Complete {
                    return Err(ConfigError::invalid(param, value));
                }
                self.mode_override = Some((mode, Submode::None));
            }
            "avoid_submode" => {
                let submode: Submode = value.parse()?;
                let (mode, _) = self
                    .mode_override
                    .ok_or(ConfigError::MissingParam("avoid_mode"))?;
                if !mode.allows(submode) {
                    return Err(ConfigError::InvalidModePair { mode, submode });
                }
                self.mode_override = Some((mode, submode));
            }
            _ => return Err(ConfigError::UnknownParam(param.to_string())),
        }
        Ok(())
    }

    pub fn alert_request(&self) -> AlertRequest {
        let mut req = AlertRequest::new(
            &self.descriptor,
            &self.update_var,
            self.pwt_outer_dist,
            self.completed_dist,
        );
        req.contact_type = self.contact_type_required.clone();
        req
    }

    /// Take the pending manual mode request, if any.
    pub fn take_mode_override(&mut self) -> Option<(EncounterMode, Submode)> {
        self.mode_override.take()
    }

    pub fn pwt_outer_dist(&self) -> f64 {
        self.pwt_outer_dist
    }

    pub fn pwt_inner_dist(&self) -> f64 {
        self.pwt_inner_dist
    }

    pub fn completed_dist(&self) -> f64 {
        self.completed_dist
    }

    pub fn min_util_cpa_dist(&self) -> f64 {
        self.min_util_cpa_dist
    }

    pub fn max_util_cpa_dist(&self) -> f64 {
        self.max_util_cpa_dist
    }

    pub fn turn_radius(&self) -> f64 {
        self.turn_radius
    }

    pub fn giveway_bow_dist(&self) -> f64 {
        self.giveway_bow_dist
    }

    pub fn overtaking_bng_range(&self) -> f64 {
        self.overtaking_bng_range
    }

    pub fn headon_abs_relbng_thresh(&self) -> f64 {
        self.headon_abs_relbng_thresh
    }

    pub fn time_on_leg(&self) -> f64 {
        self.time_on_leg
    }

    pub fn memory_time(&self) -> f64 {
        self.memory_time
    }

    pub fn max_data_age(&self) -> f64 {
        self.max_data_age
    }

    pub fn priority_weight(&self) -> f64 {
        self.priority_weight
    }

    pub fn pwt_grade(&self) -> PwtGrade {
        self.pwt_grade
    }

    pub fn contact_type_required(&self) -> Option<&str> {
        self.contact_type_required.as_deref()
    }

    pub fn no_alert_request(&self) -> bool {
        self.no_alert_request
    }

    pub fn decision_space(&self) -> &DecisionSpace {
        &self.decision_space
    }
}

fn parse_bearing(param: &str, value: &str) -> Result<f64> {
    let v = parse_non_negative(param, value)?;
    if v > 180.0 {
        return Err(ConfigError::invalid(param, value));
    }
    Ok(v)
}

fn parse_count(param: &str, value: &str) -> Result<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| ConfigError::invalid(param, value))
}

fn parse_name(param: &str, value: &str) -> Result<String> {
    if value.is_empty() || value.contains(char::is_whitespace) {
        return Err(ConfigError::invalid(param, value));
    }
    Ok(value.to_string())
}
