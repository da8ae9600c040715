//! Per-tick outputs: utility surfaces, diagnostics, and the tick snapshot.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{AlertRequest, BehaviorEvent};

/// Utility over every decision-space cell for one contact, in cell order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilitySurface {
    pub contact: String,
    pub mode: EncounterMode,
    pub submode: Submode,
    /// relevance x priority weight.
    pub priority_weight: f64,
    /// One value in [0, 100] per cell.
    pub values: Vec<f64>,
}

impl UtilitySurface {
    /// Rescale values so the minimum maps to `lo` and the maximum to `hi`.
    /// A flat surface carries no preference and maps to `lo` everywhere.
    pub fn normalize(&mut self, lo: f64, hi: f64) {
        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;
        if !span.is_finite() || span <= f64::EPSILON {
            self.values.iter_mut().for_each(|v| *v = lo);
            return;
        }
        for v in self.values.iter_mut() {
            *v = lo + (*v - min) / span * (hi - lo);
        }
    }

    /// Index of the best cell. Ties resolve to the lowest index.
    pub fn best_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in self.values.iter().enumerate() {
            match best {
                Some((_, b)) if v <= b => {}
                _ => best = Some((i, v)),
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Diagnostic view of one behavior instance after a tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorStatus {
    pub contact: String,
    pub mode: EncounterMode,
    pub submode: Submode,
    /// "mode:submode", or just the mode when the submode is none.
    pub full_mode: String,
    pub mode_index: u32,
    pub mode_elapsed: f64,
    pub submode_elapsed: f64,
    pub relevance: f64,
    pub range: f64,
    pub debug: Vec<String>,
}

/// Numeric code for a mode/submode pair, for compact status reporting.
pub fn mode_index(mode: EncounterMode, submode: Submode) -> u32 {
    match (mode, submode) {
        (EncounterMode::None, _) => 0,
        (EncounterMode::Complete, _) => 3,
        (EncounterMode::HeadOn, _) => 10,
        (EncounterMode::GiveWay, Submode::Bow) => 22,
        (EncounterMode::GiveWay, _) => 20,
        (EncounterMode::StandOn, Submode::InExtremis) => 31,
        (EncounterMode::StandOn, Submode::Bow) => 32,
        (EncounterMode::StandOn, Submode::UnsureStern) => 34,
        (EncounterMode::StandOn, Submode::UnsureBow) => 36,
        (EncounterMode::StandOn, Submode::Unsure) => 38,
        (EncounterMode::StandOn, Submode::Neither) => 39,
        (EncounterMode::StandOn, _) => 30,
        (EncounterMode::StandOnOvertaken, _) => 40,
        (EncounterMode::Overtaking, Submode::Port) => 43,
        (EncounterMode::Overtaking, _) => 47,
        (EncounterMode::CpaOnly, _) => 50,
    }
}

/// "mode:submode", or just the mode when the submode is none.
pub fn full_mode(mode: EncounterMode, submode: Submode) -> String {
    if submode == Submode::None {
        mode.as_str().to_string()
    } else {
        format!("{}:{}", mode.as_str(), submode.as_str())
    }
}

/// Everything the avoidance core produced in one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvoidanceSnapshot {
    pub time: f64,
    pub surfaces: Vec<UtilitySurface>,
    pub statuses: Vec<BehaviorStatus>,
    pub events: Vec<BehaviorEvent>,
    pub alert_request: Option<AlertRequest>,
}
