//! Present-tense encounter geometry derived once per tick.

use colregs_core::angles::angle180;
use colregs_core::types::KinematicState;
use colregs_cpa::CpaEngine;

/// Geometry flags for one ownship/contact pair, seen from both sides.
#[derive(Debug, Clone, Copy)]
pub struct Situation {
    pub own: KinematicState,
    pub contact: KinematicState,
    /// Contact held fixed, ownship maneuvering.
    pub engine: CpaEngine,
    /// Ownship held fixed, contact maneuvering.
    pub reverse: CpaEngine,
    pub range: f64,
    /// Positive when closing.
    pub rate_of_closure: f64,
    pub bearing_rate: f64,
    pub os_curr_cpa: f64,

    pub os_cn_rel_bng: f64,
    pub cn_os_rel_bng: f64,
    pub os_cn_abs_rel_bng: f64,
    pub cn_os_abs_rel_bng: f64,

    pub os_port_of_cn: bool,
    pub os_starboard_of_cn: bool,
    pub os_fore_of_cn: bool,
    pub os_aft_of_cn: bool,
    pub cn_port_of_os: bool,
    pub cn_starboard_of_os: bool,

    pub os_passes_cn: bool,
    pub cn_passes_os: bool,
    pub os_crosses_cn_bow: bool,
    pub os_crosses_cn_bow_or_stern: bool,
    pub os_crosses_cn_bow_dist: Option<f64>,
    pub cn_crosses_os_bow_or_stern: bool,
    pub cn_crosses_os_bow_dist: Option<f64>,
}

impl Situation {
    pub fn new(own: &KinematicState, contact: &KinematicState, tol: f64) -> Self {
        let engine = CpaEngine::from_states(own, contact);
        let reverse = CpaEngine::from_states(contact, own);
        let (osh, osv) = (own.heading, own.speed);
        let (cnh, cnv) = (contact.heading, contact.speed);

        let os_cn_rel_bng = engine.ownship_contact_rel_bearing(osh);
        let cn_os_rel_bng = engine.contact_ownship_rel_bearing();

        Self {
            own: *own,
            contact: *contact,
            engine,
            reverse,
            range: engine.range(),
            rate_of_closure: engine.rate_of_closure(osh, osv),
            bearing_rate: engine.bearing_rate(osh, osv),
            os_curr_cpa: engine.eval_cpa(osh, osv, tol),
            os_cn_rel_bng,
            cn_os_rel_bng,
            os_cn_abs_rel_bng: angle180(os_cn_rel_bng).abs(),
            cn_os_abs_rel_bng: angle180(cn_os_rel_bng).abs(),
            os_port_of_cn: engine.port_of_contact(),
            os_starboard_of_cn: engine.starboard_of_contact(),
            os_fore_of_cn: engine.fore_of_contact(),
            os_aft_of_cn: engine.aft_of_contact(),
            cn_port_of_os: reverse.port_of_contact(),
            cn_starboard_of_os: reverse.starboard_of_contact(),
            os_passes_cn: engine.passes_port_or_star(osh, osv),
            cn_passes_os: reverse.passes_port_or_star(cnh, cnv),
            os_crosses_cn_bow: engine.crosses_bow(osh, osv),
            os_crosses_cn_bow_or_stern: engine.crosses_bow_or_stern(osh, osv),
            os_crosses_cn_bow_dist: engine.crosses_bow_dist(osh, osv),
            cn_crosses_os_bow_or_stern: reverse.crosses_bow_or_stern(cnh, cnv),
            cn_crosses_os_bow_dist: reverse.crosses_bow_dist(cnh, cnv),
        }
    }

    pub fn own_heading(&self) -> f64 {
        self.own.heading
    }

    pub fn own_speed(&self) -> f64 {
        self.own.speed
    }

    /// Close enough, with a small enough projected CPA, that only an
    /// immediate maneuver can help.
    pub fn in_extremis(&self, max_util_cpa_dist: f64, min_util_cpa_dist: f64) -> bool {
        self.range <= max_util_cpa_dist && self.os_curr_cpa <= min_util_cpa_dist
    }

    /// One-line geometry summary for status debug output.
    pub fn summary(&self) -> String {
        format!(
            "range={:.1} roc={:.2} os_cn_rel_bng={:.1} cn_os_rel_bng={:.1} cpa={:.1}",
            self.range, self.rate_of_closure, self.os_cn_rel_bng, self.cn_os_rel_bng, self.os_curr_cpa
        )
    }
}
