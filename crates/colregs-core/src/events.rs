//! Events and outbound messages emitted by the avoidance core.

use serde::{Deserialize, Serialize};

use crate::constants::{ALERT_ID_PREFIX, ALERT_VALUE_TEMPLATE};
use crate::enums::*;

/// Lifecycle events of behavior instances, for status reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BehaviorEvent {
    /// A newly alerted contact got its own instance.
    Spawned { contact: String },
    /// Mode or submode changed at a checkpoint.
    ModeChanged {
        contact: String,
        from: EncounterMode,
        to: EncounterMode,
        submode: Submode,
        time: f64,
    },
    /// The instance skipped this tick without emitting a surface.
    Abstained { contact: String, reason: String },
    /// The objective for the active mode could not be built.
    ObjectiveFailed { contact: String, reason: String },
    /// The encounter ended and the instance was removed.
    Completed { contact: String },
}

/// Outcome of applying one configuration pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigReport {
    pub param: String,
    pub value: String,
    pub accepted: bool,
    /// Rejection reason, if any.
    pub message: Option<String>,
}

/// Request asking the contact manager to alert on a contact entering range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRequest {
    pub id: String,
    pub var: String,
    pub val: String,
    pub alert_range: f64,
    pub cpa_range: f64,
    pub contact_type: Option<String>,
}

impl AlertRequest {
    pub fn new(descriptor: &str, update_var: &str, alert_range: f64, cpa_range: f64) -> Self {
        Self {
            id: format!("{ALERT_ID_PREFIX}{descriptor}"),
            var: update_var.to_string(),
            val: ALERT_VALUE_TEMPLATE.to_string(),
            alert_range,
            cpa_range,
            contact_type: None,
        }
    }

    /// Single-line form posted on the transport.
    pub fn render(&self) -> String {
        let mut out = format!(
            "id={},var={},val={},alert_range={},cpa_range={}",
            self.id, self.var, self.val, self.alert_range, self.cpa_range
        );
        if let Some(kind) = &self.contact_type {
            out.push_str(&format!(",contact_type={kind}"));
        }
        out
    }
}
