//! Rule objective functions for COLREGS avoidance.
//!
//! Each objective maps one decision-space cell to a utility in [0, 100],
//! reading the shared CPA snapshot of a single contact. Objectives are built
//! once per tick and queried once per cell without mutation.

pub mod cpa;
pub mod give_way;
pub mod head_on;
pub mod metric;
pub mod objective;
pub mod overtaking;
pub mod stand_on;

pub use colregs_core as core;
pub use objective::{ObjectiveBuilder, ObjectiveFunction, ObjectiveKind, RuleObjective};

#[cfg(test)]
mod tests;
