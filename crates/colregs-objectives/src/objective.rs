//! Shared objective contract, the variant enum, and its builder.

use colregs_core::constants::DEFAULT_TIME_ON_LEG;
use colregs_core::decision::{Cell, DecisionSpace};
use colregs_core::enums::{CrossingSide, PassingSide};
use colregs_core::error::{parse_bool, parse_non_negative, ConfigError, Result};
use colregs_cpa::CpaEngine;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cpa::CpaObjective;
use crate::give_way::GiveWayObjective;
use crate::head_on::HeadOnObjective;
use crate::metric::CpaRemap;
use crate::overtaking::OvertakingObjective;
use crate::stand_on::{StandOnAction, StandOnObjective};

/// A utility over candidate (course, speed) cells. Evaluation is pure.
pub trait RuleObjective {
    fn name(&self) -> &'static str;

    /// Utility in [0, 100] for one cell.
    fn evaluate(&self, cell: &Cell) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveKind {
    Cpa,
    Overtaking,
    HeadOn,
    CrossingGiveWay,
    CrossingStandOn,
}

/// One configured rule objective bound to a CPA snapshot.
#[derive(Debug, Clone, Copy)]
pub enum ObjectiveFunction<'a> {
    Cpa(CpaObjective<'a>),
    Overtaking(OvertakingObjective<'a>),
    HeadOn(HeadOnObjective<'a>),
    CrossingGiveWay(GiveWayObjective<'a>),
    CrossingStandOn(StandOnObjective<'a>),
}

impl ObjectiveFunction<'_> {
    pub fn kind(&self) -> ObjectiveKind {
        match self {
            ObjectiveFunction::Cpa(_) => ObjectiveKind::Cpa,
            ObjectiveFunction::Overtaking(_) => ObjectiveKind::Overtaking,
            ObjectiveFunction::HeadOn(_) => ObjectiveKind::HeadOn,
            ObjectiveFunction::CrossingGiveWay(_) => ObjectiveKind::CrossingGiveWay,
            ObjectiveFunction::CrossingStandOn(_) => ObjectiveKind::CrossingStandOn,
        }
    }

    /// Evaluate every cell of the space, in cell order.
    pub fn evaluate_space(&self, space: &DecisionSpace) -> Vec<f64> {
        space.cells().map(|cell| self.evaluate(&cell)).collect()
    }
}

impl RuleObjective for ObjectiveFunction<'_> {
    fn name(&self) -> &'static str {
        match self {
            ObjectiveFunction::Cpa(o) => o.name(),
            ObjectiveFunction::Overtaking(o) => o.name(),
            ObjectiveFunction::HeadOn(o) => o.name(),
            ObjectiveFunction::CrossingGiveWay(o) => o.name(),
            ObjectiveFunction::CrossingStandOn(o) => o.name(),
        }
    }

    fn evaluate(&self, cell: &Cell) -> f64 {
        match self {
            ObjectiveFunction::Cpa(o) => o.evaluate(cell),
            ObjectiveFunction::Overtaking(o) => o.evaluate(cell),
            ObjectiveFunction::HeadOn(o) => o.evaluate(cell),
            ObjectiveFunction::CrossingGiveWay(o) => o.evaluate(cell),
            ObjectiveFunction::CrossingStandOn(o) => o.evaluate(cell),
        }
    }
}

/// Collects objective parameters, then validates them in [`build`].
///
/// [`build`]: ObjectiveBuilder::build
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveBuilder {
    kind: ObjectiveKind,
    collision_distance: Option<f64>,
    all_clear_distance: Option<f64>,
    tol: f64,
    passing_side: Option<PassingSide>,
    crossing_side: Option<CrossingSide>,
    own_heading: Option<f64>,
    ok_bow_cross_dist: f64,
    in_extremis: bool,
    original_course: Option<f64>,
    original_speed: Option<f64>,
}

impl ObjectiveBuilder {
    pub fn new(kind: ObjectiveKind) -> Self {
        Self {
            kind,
            collision_distance: None,
            all_clear_distance: None,
            tol: DEFAULT_TIME_ON_LEG,
            passing_side: None,
            crossing_side: None,
            own_heading: None,
            ok_bow_cross_dist: 0.0,
            in_extremis: false,
            original_course: None,
            original_speed: None,
        }
    }

    pub fn kind(&self) -> ObjectiveKind {
        self.kind
    }

    pub fn collision_distance(mut self, dist: f64) -> Self {
        self.collision_distance = Some(dist);
        self
    }

    pub fn all_clear_distance(mut self, dist: f64) -> Self {
        self.all_clear_distance = Some(dist);
        self
    }

    pub fn tol(mut self, secs: f64) -> Self {
        self.tol = secs;
        self
    }

    pub fn passing_side(mut self, side: PassingSide) -> Self {
        self.passing_side = Some(side);
        self
    }

    pub fn crossing_side(mut self, side: CrossingSide) -> Self {
        self.crossing_side = Some(side);
        self
    }

    pub fn own_heading(mut self, heading: f64) -> Self {
        self.own_heading = Some(heading);
        self
    }

    pub fn ok_bow_cross_dist(mut self, dist: f64) -> Self {
        self.ok_bow_cross_dist = dist;
        self
    }

    pub fn in_extremis(mut self, in_extremis: bool) -> Self {
        self.in_extremis = in_extremis;
        self
    }

    pub fn original_course(mut self, course: f64) -> Self {
        self.original_course = Some(course);
        self
    }

    pub fn original_speed(mut self, speed: f64) -> Self {
        self.original_speed = Some(speed);
        self
    }

    /// Apply one textual parameter. Rejected values leave the builder as is.
    pub fn set_param(&mut self, param: &str, value: &str) -> Result<()> {
        let result = self.apply_param(param, value);
        if let Err(err) = &result {
            warn!(kind = ?self.kind, param, value, %err, "rejected objective parameter");
        }
        result
    }

    fn apply_param(&mut self, param: &str, value: &str) -> Result<()> {
        match param {
            "collision_distance" => {
                self.collision_distance = Some(parse_non_negative(param, value)?)
            }
            "all_clear_distance" => {
                self.all_clear_distance = Some(parse_non_negative(param, value)?)
            }
            "tol" => self.tol = parse_non_negative(param, value)?,
            "passing_side" => match self.kind {
                ObjectiveKind::Overtaking => self.passing_side = Some(value.parse()?),
                ObjectiveKind::CrossingGiveWay => self.crossing_side = Some(value.parse()?),
                _ => return Err(ConfigError::UnknownParam(param.to_string())),
            },
            "osh" => self.own_heading = Some(parse_non_negative(param, value)?),
            "ok_cn_bow_cross_dist" => self.ok_bow_cross_dist = parse_non_negative(param, value)?,
            "in_extremis" => self.in_extremis = parse_bool(param, value)?,
            "original_course" => self.original_course = Some(parse_non_negative(param, value)?),
            "original_speed" => self.original_speed = Some(parse_non_negative(param, value)?),
            _ => return Err(ConfigError::UnknownParam(param.to_string())),
        }
        Ok(())
    }

    /// Validate and bind to a CPA snapshot.
    pub fn build<'a>(&self, engine: &'a CpaEngine) -> Result<ObjectiveFunction<'a>> {
        let collision = self
            .collision_distance
            .ok_or(ConfigError::MissingParam("collision_distance"))?;
        let all_clear = self
            .all_clear_distance
            .ok_or(ConfigError::MissingParam("all_clear_distance"))?;
        let remap = CpaRemap::new(collision, all_clear, self.tol)?;

        let objective = match self.kind {
            ObjectiveKind::Cpa => ObjectiveFunction::Cpa(CpaObjective::new(engine, remap)),
            ObjectiveKind::Overtaking => {
                let side = self
                    .passing_side
                    .ok_or(ConfigError::MissingParam("passing_side"))?;
                ObjectiveFunction::Overtaking(OvertakingObjective::new(engine, remap, side))
            }
            ObjectiveKind::HeadOn => ObjectiveFunction::HeadOn(HeadOnObjective::new(engine, remap)),
            ObjectiveKind::CrossingGiveWay => {
                let side = self
                    .crossing_side
                    .ok_or(ConfigError::MissingParam("passing_side"))?;
                let osh = self.own_heading.ok_or(ConfigError::MissingParam("osh"))?;
                ObjectiveFunction::CrossingGiveWay(GiveWayObjective::new(
                    engine,
                    remap,
                    side,
                    osh,
                    self.ok_bow_cross_dist,
                ))
            }
            ObjectiveKind::CrossingStandOn => {
                let osh = self.own_heading.ok_or(ConfigError::MissingParam("osh"))?;
                let action = if self.in_extremis {
                    StandOnAction::Avoid
                } else {
                    StandOnAction::Hold {
                        original_course: self
                            .original_course
                            .ok_or(ConfigError::MissingParam("original_course"))?,
                        original_speed: self
                            .original_speed
                            .ok_or(ConfigError::MissingParam("original_speed"))?,
                    }
                };
                ObjectiveFunction::CrossingStandOn(StandOnObjective::new(engine, remap, osh, action))
            }
        };
        Ok(objective)
    }
}
