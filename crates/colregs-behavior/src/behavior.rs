//! One avoidance behavior instance, bound to a single contact.
//!
//! Each tick refreshes the encounter geometry, runs the mode machine, and,
//! while the contact is relevant, evaluates the active rule objective over
//! the whole decision space.

use colregs_core::constants::{HEADING_RATE_MIN_SECS, MAX_UTILITY};
use colregs_core::enums::{CrossingSide, DataSource, EncounterMode, PassingSide, Submode};
use colregs_core::error::{Result, StaleDataError};
use colregs_core::events::BehaviorEvent;
use colregs_core::state::{full_mode, mode_index, BehaviorStatus, UtilitySurface};
use colregs_core::types::{ContactReport, KinematicState};
use colregs_objectives::{ObjectiveBuilder, ObjectiveKind};
use tracing::{debug, error};

use crate::config::BehaviorConfig;
use crate::history::TimedHistory;
use crate::modes::{self, ModeContext, ModeTracker};
use crate::relevance::relevance;
use crate::situation::Situation;

/// Per-tick input for one instance.
pub struct TickInput<'a> {
    pub now: f64,
    pub own: &'a KinematicState,
    /// `None` when no report for this contact arrived.
    pub contact: Option<&'a ContactReport>,
    /// Externally raised in-extremis flag for stand-on avoidance.
    pub in_extremis: bool,
}

/// Everything one instance produced in a tick.
#[derive(Debug, Clone, Default)]
pub struct TickOutput {
    pub surface: Option<UtilitySurface>,
    pub status: BehaviorStatus,
    pub events: Vec<BehaviorEvent>,
    pub stale: Option<StaleDataError>,
}

pub struct AvoidanceBehavior {
    contact: String,
    config: BehaviorConfig,
    modes: ModeTracker,
    heading_history: TimedHistory,
    bearing_history: TimedHistory,
    prev_cn_port_of_os: Option<bool>,
    iterations: u64,
    relevance: f64,
    range: f64,
}

impl AvoidanceBehavior {
    pub fn new(contact: &str, config: BehaviorConfig, now: f64) -> Self {
        Self {
            contact: contact.to_string(),
            config,
            modes: ModeTracker::new(now),
            heading_history: TimedHistory::new(),
            bearing_history: TimedHistory::new(),
            prev_cn_port_of_os: None,
            iterations: 0,
            relevance: 0.0,
            range: 0.0,
        }
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub fn mode(&self) -> EncounterMode {
        self.modes.mode()
    }

    pub fn submode(&self) -> Submode {
        self.modes.submode()
    }

    pub fn is_complete(&self) -> bool {
        self.modes.mode() == EncounterMode::Complete
    }

    pub fn modes(&self) -> &ModeTracker {
        &self.modes
    }

    pub fn set_param(&mut self, param: &str, value: &str) -> Result<()> {
        self.config.set_param(param, value)
    }

    /// Contact turn rate in deg/s over the recent history.
    pub fn contact_heading_rate(&self) -> Option<f64> {
        self.heading_history.rate(HEADING_RATE_MIN_SECS)
    }

    /// Rate of the bearing from ownship to the contact in deg/s.
    pub fn relative_bearing_rate(&self) -> Option<f64> {
        self.bearing_history.rate(0.0)
    }

    pub fn on_tick(&mut self, input: &TickInput) -> TickOutput {
        let mut out = TickOutput::default();
        let mut debug_lines = Vec::new();

        if self.is_complete() {
            out.status = self.status(debug_lines);
            return out;
        }
        self.iterations += 1;

        if let Some(err) = self.check_freshness(input) {
            debug!(contact = %self.contact, %err, "abstaining on stale data");
            debug_lines.push(err.to_string());
            out.events.push(BehaviorEvent::Abstained {
                contact: self.contact.clone(),
                reason: err.to_string(),
            });
            out.stale = Some(err);
            out.status = self.status(debug_lines);
            return out;
        }
        let Some(report) = input.contact else {
            out.status = self.status(debug_lines);
            return out;
        };

        if let Some(required) = self.config.contact_type_required() {
            if !report.contact_type.eq_ignore_ascii_case(required) {
                let reason = format!(
                    "contact type {:?} does not match required {:?}",
                    report.contact_type, required
                );
                debug!(contact = %self.contact, %reason, "abstaining");
                debug_lines.push(reason.clone());
                out.events.push(BehaviorEvent::Abstained {
                    contact: self.contact.clone(),
                    reason,
                });
                out.status = self.status(debug_lines);
                return out;
            }
        }

        let sit = Situation::new(input.own, &report.state, self.config.time_on_leg());
        self.range = sit.range;
        debug_lines.push(sit.summary());

        let crossed = match self.prev_cn_port_of_os.replace(sit.cn_port_of_os) {
            Some(prev) if self.iterations > 1 => prev != sit.cn_port_of_os,
            _ => false,
        };

        let prev_mode = self.modes.mode();
        let prev_submode = self.modes.submode();

        if sit.range >= self.config.completed_dist() || report.retired {
            self.modes.apply(
                EncounterMode::Complete,
                Submode::None,
                input.now,
                sit.own_heading(),
                sit.own_speed(),
            );
            self.relevance = 0.0;
            self.push_mode_event(&mut out, prev_mode, input.now);
            out.events.push(BehaviorEvent::Completed {
                contact: self.contact.clone(),
            });
            out.status = self.status(debug_lines);
            return out;
        }

        let memory = self.config.memory_time();
        self.heading_history.push(input.now, report.state.heading, memory);
        self.bearing_history.push(input.now, sit.os_cn_rel_bng, memory);

        let (mode, submode) = match self.config.take_mode_override() {
            Some((mode, submode)) => (mode, submode),
            None => (prev_mode, prev_submode),
        };
        let update = modes::evaluate(&ModeContext {
            mode,
            submode,
            situation: &sit,
            config: &self.config,
            cn_crossed_os_port_star: crossed,
            contact_heading_rate: self.contact_heading_rate(),
        });
        let changed = self.modes.apply(
            update.mode,
            update.submode,
            input.now,
            sit.own_heading(),
            sit.own_speed(),
        );
        if changed {
            self.push_mode_event(&mut out, prev_mode, input.now);
        }

        self.relevance = relevance(
            sit.range,
            self.config.pwt_inner_dist(),
            self.config.pwt_outer_dist(),
            self.config.pwt_grade(),
        );
        if self.relevance > 0.0 {
            match self.build_surface(&sit, input.in_extremis) {
                Ok(surface) => out.surface = surface,
                Err(err) => {
                    error!(contact = %self.contact, %err, "objective construction failed");
                    debug_lines.push(format!("objective failed: {err}"));
                    out.events.push(BehaviorEvent::ObjectiveFailed {
                        contact: self.contact.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        out.status = self.status(debug_lines);
        out
    }

    fn check_freshness(&self, input: &TickInput) -> Option<StaleDataError> {
        let max_age = self.config.max_data_age();
        let own_age = input.own.age(input.now);
        if own_age > max_age {
            return Some(StaleDataError {
                origin: DataSource::Ownship,
                age: own_age,
                max_age,
            });
        }
        let contact_age = input
            .contact
            .map_or(f64::INFINITY, |report| report.state.age(input.now));
        if contact_age > max_age {
            return Some(StaleDataError {
                origin: DataSource::Contact,
                age: contact_age,
                max_age,
            });
        }
        None
    }

    fn build_surface(
        &self,
        sit: &Situation,
        in_extremis: bool,
    ) -> Result<Option<UtilitySurface>> {
        let mode = self.modes.mode();
        let submode = self.modes.submode();
        let builder = match mode {
            EncounterMode::Overtaking => {
                let side = if submode == Submode::Starboard {
                    PassingSide::Starboard
                } else {
                    PassingSide::Port
                };
                ObjectiveBuilder::new(ObjectiveKind::Overtaking).passing_side(side)
            }
            EncounterMode::HeadOn => ObjectiveBuilder::new(ObjectiveKind::HeadOn),
            EncounterMode::GiveWay => {
                let side = if submode == Submode::Bow {
                    CrossingSide::Bow
                } else {
                    CrossingSide::Stern
                };
                ObjectiveBuilder::new(ObjectiveKind::CrossingGiveWay)
                    .crossing_side(side)
                    .own_heading(sit.own_heading())
                    .ok_bow_cross_dist(self.config.giveway_bow_dist())
            }
            EncounterMode::StandOn | EncounterMode::StandOnOvertaken => {
                let (course, speed) = self
                    .modes
                    .latch()
                    .map_or((sit.own_heading(), sit.own_speed()), |l| (l.heading, l.speed));
                ObjectiveBuilder::new(ObjectiveKind::CrossingStandOn)
                    .own_heading(sit.own_heading())
                    .in_extremis(in_extremis || submode == Submode::InExtremis)
                    .original_course(course)
                    .original_speed(speed)
            }
            EncounterMode::CpaOnly => ObjectiveBuilder::new(ObjectiveKind::Cpa),
            EncounterMode::None | EncounterMode::Complete => return Ok(None),
        };

        let min_util = self.config.min_util_cpa_dist();
        let collision = if sit.range <= min_util {
            sit.range / 2.0
        } else {
            min_util
        };
        let objective = builder
            .collision_distance(collision)
            .all_clear_distance(self.config.max_util_cpa_dist())
            .tol(self.config.time_on_leg())
            .build(&sit.engine)?;

        let mut surface = UtilitySurface {
            contact: self.contact.clone(),
            mode,
            submode,
            priority_weight: self.relevance * self.config.priority_weight(),
            values: objective.evaluate_space(self.config.decision_space()),
        };
        surface.normalize(0.0, MAX_UTILITY);
        Ok(Some(surface))
    }

    fn push_mode_event(&self, out: &mut TickOutput, from: EncounterMode, now: f64) {
        debug!(
            contact = %self.contact,
            from = %from,
            to = %self.modes.mode(),
            submode = %self.modes.submode(),
            "mode change"
        );
        out.events.push(BehaviorEvent::ModeChanged {
            contact: self.contact.clone(),
            from,
            to: self.modes.mode(),
            submode: self.modes.submode(),
            time: now,
        });
    }

    fn status(&self, debug: Vec<String>) -> BehaviorStatus {
        let mode = self.modes.mode();
        let submode = self.modes.submode();
        BehaviorStatus {
            contact: self.contact.clone(),
            mode,
            submode,
            full_mode: full_mode(mode, submode),
            mode_index: mode_index(mode, submode),
            mode_elapsed: self.modes.mode_elapsed(),
            submode_elapsed: self.modes.submode_elapsed(),
            relevance: self.relevance,
            range: self.range,
            debug,
        }
    }
}
