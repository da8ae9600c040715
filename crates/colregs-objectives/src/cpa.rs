//! Generic CPA avoidance, no rule-specific constraints.

use colregs_core::constants::CPA_FLOOR;
use colregs_core::decision::Cell;
use colregs_cpa::CpaEngine;

use crate::metric::CpaRemap;
use crate::objective::RuleObjective;

#[derive(Debug, Clone, Copy)]
pub struct CpaObjective<'a> {
    engine: &'a CpaEngine,
    remap: CpaRemap,
}

impl<'a> CpaObjective<'a> {
    pub fn new(engine: &'a CpaEngine, remap: CpaRemap) -> Self {
        Self { engine, remap }
    }
}

impl RuleObjective for CpaObjective<'_> {
    fn name(&self) -> &'static str {
        "cpa"
    }

    fn evaluate(&self, cell: &Cell) -> f64 {
        let dist = self.engine.eval_cpa(cell.course, cell.speed, self.remap.tol);
        self.remap.utility(dist, CPA_FLOOR)
    }
}
