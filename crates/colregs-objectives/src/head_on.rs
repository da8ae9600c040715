//! Rule 14: head-on encounter, both vessels alter to starboard.

use colregs_core::angles::angle360;
use colregs_core::constants::{MAX_UTILITY, RULE_FLOOR};
use colregs_core::decision::Cell;
use colregs_cpa::CpaEngine;

use crate::metric::CpaRemap;
use crate::objective::RuleObjective;

#[derive(Debug, Clone, Copy)]
pub struct HeadOnObjective<'a> {
    engine: &'a CpaEngine,
    remap: CpaRemap,
    /// Bearing rate if both vessels turned square to starboard of the line
    /// of sight at the contact's speed. The best rate a starboard-to-starboard
    /// avoidance can hope for.
    initial_bearing_rate: f64,
}

impl<'a> HeadOnObjective<'a> {
    pub fn new(engine: &'a CpaEngine, remap: CpaRemap) -> Self {
        let los = engine.ownship_contact_bearing();
        let os_turn = angle360(los + 90.0);
        let cn_turn = angle360(los + 270.0);
        let speed = engine.contact_speed();
        let initial_bearing_rate = engine
            .with_contact_motion(cn_turn, speed)
            .bearing_rate(os_turn, speed);
        Self {
            engine,
            remap,
            initial_bearing_rate,
        }
    }

    pub fn initial_bearing_rate(&self) -> f64 {
        self.initial_bearing_rate
    }

    /// Reward for driving the bearing rate toward the port-to-port ideal.
    fn bearing_rate_utility(&self, course: f64, speed: f64) -> f64 {
        if self.initial_bearing_rate >= 0.0 {
            return 0.0;
        }
        let rate = self.engine.bearing_rate(course, speed);
        if rate >= 0.0 {
            return 0.0;
        }
        if rate <= self.initial_bearing_rate {
            return MAX_UTILITY;
        }
        rate / self.initial_bearing_rate * MAX_UTILITY
    }
}

impl RuleObjective for HeadOnObjective<'_> {
    fn name(&self) -> &'static str {
        "headon"
    }

    fn evaluate(&self, cell: &Cell) -> f64 {
        let engine = self.engine;
        if engine.on_contact() {
            return 0.0;
        }
        if engine.port_of_contact() && engine.crosses_bow(cell.course, cell.speed) {
            return 0.0;
        }
        if engine.passes_star(cell.course, cell.speed) {
            return 0.0;
        }
        let dist = engine.eval_cpa(cell.course, cell.speed, self.remap.tol);
        let utility = self.remap.utility(dist, RULE_FLOOR);
        if utility == 0.0 {
            return 0.0;
        }
        (utility + self.bearing_rate_utility(cell.course, cell.speed)).clamp(0.0, MAX_UTILITY)
    }
}
