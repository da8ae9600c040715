//! Rule 16: give-way vessel in a crossing, passing astern or ahead.

use colregs_core::constants::RULE_FLOOR;
use colregs_core::decision::Cell;
use colregs_core::enums::CrossingSide;
use colregs_cpa::{turns_right, CpaEngine};

use crate::metric::CpaRemap;
use crate::objective::RuleObjective;

#[derive(Debug, Clone, Copy)]
pub struct GiveWayObjective<'a> {
    engine: &'a CpaEngine,
    remap: CpaRemap,
    passing_side: CrossingSide,
    /// Current ownship heading, the reference for turn direction.
    own_heading: f64,
    /// Required bow-crossing margin when passing ahead. Zero disables it.
    ok_bow_cross_dist: f64,
}

impl<'a> GiveWayObjective<'a> {
    pub fn new(
        engine: &'a CpaEngine,
        remap: CpaRemap,
        passing_side: CrossingSide,
        own_heading: f64,
        ok_bow_cross_dist: f64,
    ) -> Self {
        Self {
            engine,
            remap,
            passing_side,
            own_heading,
            ok_bow_cross_dist,
        }
    }

    pub fn passing_side(&self) -> CrossingSide {
        self.passing_side
    }

    fn allowed(&self, course: f64, speed: f64) -> bool {
        let turning_right = turns_right(self.own_heading, course);
        match self.passing_side {
            CrossingSide::Stern => {
                if self.engine.crosses_bow(course, speed) {
                    return false;
                }
                turning_right || self.engine.crosses_stern(course, speed)
            }
            CrossingSide::Bow => {
                if !turning_right {
                    return true;
                }
                match self.engine.crosses_bow_dist(course, speed) {
                    None => false,
                    Some(d) => self.ok_bow_cross_dist <= 0.0 || d > self.ok_bow_cross_dist,
                }
            }
        }
    }
}

impl RuleObjective for GiveWayObjective<'_> {
    fn name(&self) -> &'static str {
        "giveway"
    }

    fn evaluate(&self, cell: &Cell) -> f64 {
        if !self.allowed(cell.course, cell.speed) {
            return 0.0;
        }
        let dist = self.engine.eval_cpa(cell.course, cell.speed, self.remap.tol);
        self.remap.utility(dist, RULE_FLOOR)
    }
}
