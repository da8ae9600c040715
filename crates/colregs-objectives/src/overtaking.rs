//! Rule 13: ownship overtaking a contact on an agreed side.

use colregs_core::constants::OVERTAKING_FLOOR;
use colregs_core::decision::Cell;
use colregs_core::enums::PassingSide;
use colregs_cpa::CpaEngine;

use crate::metric::CpaRemap;
use crate::objective::RuleObjective;

#[derive(Debug, Clone, Copy)]
pub struct OvertakingObjective<'a> {
    engine: &'a CpaEngine,
    remap: CpaRemap,
    passing_side: PassingSide,
}

impl<'a> OvertakingObjective<'a> {
    pub fn new(engine: &'a CpaEngine, remap: CpaRemap, passing_side: PassingSide) -> Self {
        Self {
            engine,
            remap,
            passing_side,
        }
    }

    pub fn passing_side(&self) -> PassingSide {
        self.passing_side
    }

    /// Clearance held on the agreed side, or `None` when the candidate
    /// passes on the other side.
    fn side_clearance(&self, course: f64, speed: f64) -> Option<f64> {
        match self.passing_side {
            PassingSide::Port => {
                if self.engine.passes_star(course, speed) {
                    return None;
                }
                Some(self.engine.passes_port_dist(course, speed).unwrap_or(f64::INFINITY))
            }
            PassingSide::Starboard => {
                if self.engine.passes_port(course, speed) {
                    return None;
                }
                Some(self.engine.passes_star_dist(course, speed).unwrap_or(f64::INFINITY))
            }
        }
    }
}

impl RuleObjective for OvertakingObjective<'_> {
    fn name(&self) -> &'static str {
        "overtaking"
    }

    fn evaluate(&self, cell: &Cell) -> f64 {
        let dist = self.engine.eval_cpa(cell.course, cell.speed, self.remap.tol);
        let utility = self.remap.utility(dist, OVERTAKING_FLOOR);
        if utility == 0.0 || cell.speed == 0.0 {
            return utility;
        }
        match self.side_clearance(cell.course, cell.speed) {
            Some(clear) if clear >= self.remap.collision_distance => utility,
            _ => 0.0,
        }
    }
}
