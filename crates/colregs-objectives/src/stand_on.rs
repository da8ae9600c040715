//! Rule 17: stand-on vessel. Hold course and speed, or act in extremis.

use colregs_core::angles::angle180;
use colregs_core::constants::{HOLD_MAX_COURSE_DELTA, HOLD_MAX_SPEED_DELTA, MAX_UTILITY, RULE_FLOOR};
use colregs_core::decision::Cell;
use colregs_cpa::{turns_left, CpaEngine};

use crate::metric::CpaRemap;
use crate::objective::RuleObjective;

/// Which half of rule 17 applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StandOnAction {
    /// Keep the latched course and speed.
    Hold {
        original_course: f64,
        original_speed: f64,
    },
    /// Avoid by CPA, never turning to port for a contact on the port side.
    Avoid,
}

#[derive(Debug, Clone, Copy)]
pub struct StandOnObjective<'a> {
    engine: &'a CpaEngine,
    remap: CpaRemap,
    own_heading: f64,
    action: StandOnAction,
}

impl<'a> StandOnObjective<'a> {
    pub fn new(
        engine: &'a CpaEngine,
        remap: CpaRemap,
        own_heading: f64,
        action: StandOnAction,
    ) -> Self {
        Self {
            engine,
            remap,
            own_heading,
            action,
        }
    }

    pub fn action(&self) -> StandOnAction {
        self.action
    }

    pub fn in_extremis(&self) -> bool {
        self.action == StandOnAction::Avoid
    }

    fn utility_hold(course: f64, speed: f64, original_course: f64, original_speed: f64) -> f64 {
        let d_crs = angle180(course - original_course).abs();
        let d_spd = (speed - original_speed).abs();
        let crs_factor = ((HOLD_MAX_COURSE_DELTA - d_crs) / HOLD_MAX_COURSE_DELTA).max(0.0);
        let spd_factor = ((HOLD_MAX_SPEED_DELTA - d_spd) / HOLD_MAX_SPEED_DELTA).max(0.0);
        (2.0 * crs_factor + spd_factor) / 3.0 * MAX_UTILITY
    }

    fn utility_avoid(&self, course: f64, speed: f64) -> f64 {
        // 17(c): no turn to port for a contact on our own port side.
        let contact_to_port = self.engine.ownship_contact_rel_bearing(self.own_heading) > 180.0;
        if contact_to_port && turns_left(self.own_heading, course) {
            return 0.0;
        }
        let dist = self.engine.eval_cpa(course, speed, self.remap.tol);
        self.remap.utility(dist, RULE_FLOOR)
    }
}

impl RuleObjective for StandOnObjective<'_> {
    fn name(&self) -> &'static str {
        "standon"
    }

    fn evaluate(&self, cell: &Cell) -> f64 {
        match self.action {
            StandOnAction::Hold {
                original_course,
                original_speed,
            } => Self::utility_hold(cell.course, cell.speed, original_course, original_speed),
            StandOnAction::Avoid => self.utility_avoid(cell.course, cell.speed),
        }
    }
}
