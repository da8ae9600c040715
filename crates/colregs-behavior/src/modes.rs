//! Encounter mode state machine.
//!
//! Pure functions that reclassify one contact from its current mode and the
//! present geometry. The checks run in a fixed order and each one only acts
//! when the current mode is its own, none, or cpa, so an established
//! encounter can only be left through its own release criteria.

use colregs_core::angles::{project_point, speed_in_heading, turn_gap};
use colregs_core::constants::*;
use colregs_core::enums::{EncounterMode, Submode};
use glam::DVec2;

use crate::config::BehaviorConfig;
use crate::situation::Situation;

/// Input to the mode machine for one contact.
pub struct ModeContext<'a> {
    pub mode: EncounterMode,
    pub submode: Submode,
    pub situation: &'a Situation,
    pub config: &'a BehaviorConfig,
    /// Contact changed sides relative to ownship since the previous tick.
    pub cn_crossed_os_port_star: bool,
    /// Contact turn rate (deg/s), when enough history is held.
    pub contact_heading_rate: Option<f64>,
}

/// Output from the mode machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeUpdate {
    pub mode: EncounterMode,
    pub submode: Submode,
    pub mode_changed: bool,
    pub submode_changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Assignment {
    mode: EncounterMode,
    submode: Submode,
}

impl Assignment {
    fn set(&mut self, mode: EncounterMode, submode: Submode) {
        self.mode = mode;
        self.submode = submode;
    }

    fn reset(&mut self) {
        self.set(EncounterMode::None, Submode::None);
    }

    /// Current mode is `own`, none, or cpa.
    fn open_to(&self, own: EncounterMode) -> bool {
        self.mode == own || matches!(self.mode, EncounterMode::None | EncounterMode::CpaOnly)
    }
}

/// Evaluate the mode machine for one contact.
pub fn evaluate(ctx: &ModeContext) -> ModeUpdate {
    let mut a = Assignment {
        mode: ctx.mode,
        submode: ctx.submode,
    };

    // Complete is terminal.
    if ctx.mode != EncounterMode::Complete {
        check_overtaking(&mut a, ctx);
        check_head_on(&mut a, ctx);
        check_stand_on_overtaken(&mut a, ctx);
        check_give_way(&mut a, ctx);
        check_stand_on(&mut a, ctx);
        check_cpa(&mut a, ctx);
    }

    let mode_changed = a.mode != ctx.mode;
    ModeUpdate {
        mode: a.mode,
        submode: a.submode,
        mode_changed,
        submode_changed: mode_changed || a.submode != ctx.submode,
    }
}

fn check_overtaking(a: &mut Assignment, ctx: &ModeContext) {
    if !a.open_to(EncounterMode::Overtaking) {
        return;
    }
    let s = ctx.situation;
    if s.range >= ctx.config.pwt_outer_dist() || s.rate_of_closure < 0.0 {
        a.reset();
        return;
    }

    if a.mode == EncounterMode::Overtaking {
        // Contact back inside ownship's stern sector: pass complete.
        if s.cn_os_rel_bng > 360.0 - OVERTAKING_DONE_SECTOR
            || s.cn_os_rel_bng < OVERTAKING_DONE_SECTOR
        {
            a.set(EncounterMode::CpaOnly, Submode::None);
            return;
        }
        // Side hysteresis.
        if a.submode == Submode::Port {
            if s.os_cn_rel_bng > 180.0 && s.os_cn_rel_bng < 360.0 - OVERTAKING_SIDE_BUFFER {
                a.submode = Submode::Starboard;
            }
        } else if s.os_cn_rel_bng < OVERTAKING_SIDE_BUFFER {
            a.submode = Submode::Port;
        }
        return;
    }

    let range = ctx.config.overtaking_bng_range();
    if s.cn_os_rel_bng < 180.0 - range || s.cn_os_rel_bng > 180.0 + range {
        a.reset();
        return;
    }
    if !s.os_passes_cn {
        a.reset();
        return;
    }
    let submode = if s.cn_port_of_os {
        Submode::Starboard
    } else {
        Submode::Port
    };
    a.set(EncounterMode::Overtaking, submode);
}

fn check_head_on(a: &mut Assignment, ctx: &ModeContext) {
    if !a.open_to(EncounterMode::HeadOn) {
        return;
    }
    let s = ctx.situation;
    let cfg = ctx.config;
    let thresh = cfg.headon_abs_relbng_thresh();

    if a.mode == EncounterMode::HeadOn {
        let opening = s.range > cfg.min_util_cpa_dist() && s.rate_of_closure < 0.0;
        let mut release = opening || s.os_aft_of_cn;
        // Well established starboard-to-starboard passing.
        if s.os_starboard_of_cn && s.cn_starboard_of_os {
            let os_extra = s.os_cn_rel_bng - thresh;
            let cn_extra = s.cn_os_rel_bng - thresh;
            release |= os_extra > HEADON_RELEASE_EXTRA
                || cn_extra > HEADON_RELEASE_EXTRA
                || os_extra + cn_extra > HEADON_RELEASE_TOTAL_EXTRA;
        }
        if release {
            a.reset();
        }
        return;
    }

    if s.range >= 2.0 * cfg.pwt_outer_dist() {
        a.reset();
        return;
    }
    if s.os_cn_abs_rel_bng > thresh || s.cn_os_abs_rel_bng > thresh {
        a.reset();
        return;
    }
    if s.rate_of_closure <= 0.0 {
        a.reset();
        return;
    }
    a.set(EncounterMode::HeadOn, Submode::None);
}

fn check_stand_on_overtaken(a: &mut Assignment, ctx: &ModeContext) {
    if !a.open_to(EncounterMode::StandOnOvertaken) {
        return;
    }
    let s = ctx.situation;
    let cfg = ctx.config;
    if s.range >= cfg.pwt_outer_dist() {
        a.reset();
        return;
    }

    let previous = if a.mode == EncounterMode::StandOnOvertaken {
        if ctx.cn_crossed_os_port_star || s.rate_of_closure < 0.0 {
            a.reset();
            return;
        }
        a.submode
    } else {
        if s.os_cn_rel_bng < ABAFT_BEAM_BNG || s.os_cn_rel_bng > ABAFT_BEAM_BNG_PORT {
            a.reset();
            return;
        }
        if !s.cn_passes_os || s.os_curr_cpa > cfg.max_util_cpa_dist() {
            a.reset();
            return;
        }
        Submode::None
    };

    let submode = if previous == Submode::InExtremis
        || s.in_extremis(cfg.max_util_cpa_dist(), cfg.min_util_cpa_dist())
    {
        Submode::InExtremis
    } else if s.cn_port_of_os {
        Submode::Port
    } else {
        Submode::Starboard
    };
    a.set(EncounterMode::StandOnOvertaken, submode);
}

fn check_give_way(a: &mut Assignment, ctx: &ModeContext) {
    if !a.open_to(EncounterMode::GiveWay) {
        return;
    }
    let s = ctx.situation;
    let cfg = ctx.config;
    if s.range >= cfg.pwt_outer_dist() {
        a.reset();
        return;
    }

    if a.mode == EncounterMode::GiveWay {
        let opening = s.range > cfg.min_util_cpa_dist() && s.rate_of_closure < 0.0;
        if opening || s.os_starboard_of_cn {
            a.set(EncounterMode::CpaOnly, Submode::None);
        }
        return;
    }

    if s.cn_os_rel_bng < ABAFT_BEAM_BNG_PORT || s.os_cn_rel_bng > ABAFT_BEAM_BNG {
        a.reset();
        return;
    }

    let acceptable = (2.0 * cfg.max_util_cpa_dist() + cfg.min_util_cpa_dist()) / 3.0;
    let mut submode = Submode::Stern;
    if s.os_crosses_cn_bow {
        if s.os_crosses_cn_bow_dist.is_some_and(|d| d > acceptable) {
            submode = Submode::Bow;
        }
        // Gap left if ownship turned hard right now.
        let cn = s.contact.position();
        let (px, py) = project_point(s.contact.heading, 100.0, cn.x, cn.y);
        let gap = turn_gap(
            s.own.x,
            s.own.y,
            s.own_heading(),
            cfg.turn_radius(),
            cn,
            DVec2::new(px, py),
            true,
        );
        if gap < acceptable {
            submode = Submode::Bow;
        }
    }
    if !s.os_crosses_cn_bow_or_stern
        && speed_in_heading(s.own_heading(), s.own_speed(), s.contact.heading) > 0.0
    {
        submode = Submode::Bow;
    }
    a.set(EncounterMode::GiveWay, submode);
}

fn check_stand_on(a: &mut Assignment, ctx: &ModeContext) {
    if !a.open_to(EncounterMode::StandOn) {
        return;
    }
    let s = ctx.situation;
    let cfg = ctx.config;
    if s.range >= cfg.pwt_outer_dist() {
        a.reset();
        return;
    }

    let established = a.mode == EncounterMode::StandOn;
    if established {
        let opening = s.range > cfg.min_util_cpa_dist() && s.rate_of_closure < 0.0;
        if ctx.cn_crossed_os_port_star || opening {
            a.reset();
            return;
        }
    }

    // Entry geometry. Failing it leaves the mode as it is.
    if s.os_cn_rel_bng < ABAFT_BEAM_BNG_PORT || s.cn_os_rel_bng > ABAFT_BEAM_BNG {
        return;
    }
    if !s.cn_crosses_os_bow_or_stern || s.rate_of_closure < 0.0 {
        return;
    }

    let previous = if established { a.submode } else { Submode::None };
    // In extremis overrides every other submode. Bow and stern can only
    // give way to neither.
    let submode = match previous {
        Submode::InExtremis => previous,
        _ if s.in_extremis(cfg.max_util_cpa_dist(), cfg.min_util_cpa_dist()) => {
            Submode::InExtremis
        }
        Submode::Neither => previous,
        _ if s.os_port_of_cn => Submode::Neither,
        Submode::Bow | Submode::Stern => previous,
        _ => stand_on_submode(s, cfg, ctx.contact_heading_rate),
    };
    a.set(EncounterMode::StandOn, submode);
}

/// Guess how the give-way contact will cross, from where it sits on
/// ownship's port side, where it would cross ahead, and how it is turning.
fn stand_on_submode(s: &Situation, cfg: &BehaviorConfig, heading_rate: Option<f64>) -> Submode {
    let min = cfg.min_util_cpa_dist();
    let max = cfg.max_util_cpa_dist();
    let half = (max + min) / 2.0;
    // Negative when the contact is not crossing ahead.
    let bow_dist = s.cn_crosses_os_bow_dist.unwrap_or(-1.0);
    let turning_below = |limit: f64| heading_rate.is_some_and(|r| r < limit);
    let pick = |cond: bool, yes: Submode, no: Submode| if cond { yes } else { no };

    if s.os_cn_rel_bng > 350.0 {
        if bow_dist >= min {
            pick(turning_below(0.0), Submode::Bow, Submode::UnsureBow)
        } else if bow_dist > 0.0 {
            pick(turning_below(0.0), Submode::UnsureBow, Submode::Unsure)
        } else {
            Submode::UnsureStern
        }
    } else if s.os_cn_rel_bng > 315.0 {
        if bow_dist >= half {
            pick(turning_below(3.0), Submode::Bow, Submode::UnsureBow)
        } else if bow_dist >= min {
            pick(turning_below(0.1), Submode::Bow, Submode::UnsureBow)
        } else if bow_dist > 0.0 {
            pick(turning_below(0.0), Submode::UnsureBow, Submode::Unsure)
        } else {
            Submode::Stern
        }
    } else if s.os_cn_rel_bng >= 270.0 {
        if bow_dist >= max {
            Submode::Bow
        } else if bow_dist >= half {
            pick(turning_below(0.1), Submode::Bow, Submode::UnsureBow)
        } else if bow_dist > 0.0 {
            pick(turning_below(0.0), Submode::UnsureBow, Submode::Unsure)
        } else {
            Submode::Stern
        }
    } else if bow_dist >= half {
        pick(turning_below(0.1), Submode::UnsureBow, Submode::Unsure)
    } else if bow_dist > 0.0 {
        Submode::Unsure
    } else {
        Submode::Stern
    }
}

fn check_cpa(a: &mut Assignment, ctx: &ModeContext) {
    if !matches!(a.mode, EncounterMode::None | EncounterMode::CpaOnly) {
        return;
    }
    if ctx.situation.range > ctx.config.pwt_outer_dist() {
        a.reset();
    } else {
        a.set(EncounterMode::CpaOnly, Submode::None);
    }
}

/// Course and speed held when a stand-on encounter began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandOnLatch {
    pub heading: f64,
    pub speed: f64,
}

/// Mode bookkeeping that persists between ticks: timers and the stand-on
/// latch.
#[derive(Debug, Clone, Default)]
pub struct ModeTracker {
    mode: EncounterMode,
    submode: Submode,
    mode_start: f64,
    submode_start: f64,
    mode_elapsed: f64,
    submode_elapsed: f64,
    latch: Option<StandOnLatch>,
}

impl ModeTracker {
    pub fn new(now: f64) -> Self {
        Self {
            mode_start: now,
            submode_start: now,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> EncounterMode {
        self.mode
    }

    pub fn submode(&self) -> Submode {
        self.submode
    }

    pub fn mode_elapsed(&self) -> f64 {
        self.mode_elapsed
    }

    pub fn submode_elapsed(&self) -> f64 {
        self.submode_elapsed
    }

    pub fn latch(&self) -> Option<StandOnLatch> {
        self.latch
    }

    /// Record the outcome of a tick. `own_heading`/`own_speed` seed the
    /// latch when a stand-on encounter starts.
    pub fn apply(
        &mut self,
        mode: EncounterMode,
        submode: Submode,
        now: f64,
        own_heading: f64,
        own_speed: f64,
    ) -> bool {
        let mode_changed = mode != self.mode;
        if mode_changed {
            self.mode_start = now;
        }
        if mode_changed || submode != self.submode {
            self.submode_start = now;
        }

        if mode.is_stand_on() {
            if !self.mode.is_stand_on() || self.latch.is_none() {
                self.latch = Some(StandOnLatch {
                    heading: own_heading,
                    speed: own_speed,
                });
            }
        } else {
            self.latch = None;
        }

        let changed = mode_changed || submode != self.submode;
        self.mode = mode;
        self.submode = submode;
        self.mode_elapsed = now - self.mode_start;
        self.submode_elapsed = now - self.submode_start;
        changed
    }
}
