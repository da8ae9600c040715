//! Immutable CPA snapshot of one contact relative to ownship.
//!
//! The contact is assumed to hold its last heading and speed. All queries take
//! a candidate ownship (course, speed) and are pure.

use colregs_core::angles::{angle360, heading_vector, rel_ang, rel_bearing};
use colregs_core::types::KinematicState;
use glam::DVec2;

/// Relative speed squared below which the vessels are treated as stationary
/// with respect to each other.
const MIN_REL_SPEED_SQ: f64 = 1e-12;

/// Relative geometry of one contact, frozen at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpaEngine {
    os: DVec2,
    cn: DVec2,
    cnh: f64,
    cnv: f64,
    cn_vel: DVec2,
    /// Unit vector along the contact's heading.
    bow: DVec2,
    /// Unit vector to the contact's starboard.
    starboard: DVec2,
    range: f64,
    /// Ownship offset along the contact's heading (+ ahead).
    along: f64,
    /// Ownship offset across the contact's heading (+ starboard).
    lateral: f64,
    abs_bng_os_cn: f64,
    rel_bng_cn_os: f64,
    on_contact: bool,
}

impl CpaEngine {
    /// Build from contact (x, y, heading, speed) and ownship position.
    pub fn new(cnx: f64, cny: f64, cnh: f64, cnv: f64, osx: f64, osy: f64) -> Self {
        let os = DVec2::new(osx, osy);
        let cn = DVec2::new(cnx, cny);
        let cnh = angle360(cnh);
        let bow = heading_vector(cnh);
        let starboard = heading_vector(cnh + 90.0);
        let offset = os - cn;
        Self {
            os,
            cn,
            cnh,
            cnv,
            cn_vel: bow * cnv,
            bow,
            starboard,
            range: offset.length(),
            along: offset.dot(bow),
            lateral: offset.dot(starboard),
            abs_bng_os_cn: rel_ang(osx, osy, cnx, cny),
            rel_bng_cn_os: rel_bearing(cnx, cny, cnh, osx, osy),
            on_contact: osx == cnx && osy == cny,
        }
    }

    /// Build from full kinematic states. Swap the arguments for the contact's
    /// view of ownship.
    pub fn from_states(own: &KinematicState, contact: &KinematicState) -> Self {
        Self::new(
            contact.x,
            contact.y,
            contact.heading,
            contact.speed,
            own.x,
            own.y,
        )
    }

    fn own_velocity(course: f64, speed: f64) -> DVec2 {
        heading_vector(course) * speed
    }

    /// Ownship velocity relative to the contact, split into the contact's
    /// (along, lateral) frame.
    fn relative_frame_velocity(&self, course: f64, speed: f64) -> (f64, f64) {
        let v = Self::own_velocity(course, speed);
        (v.dot(self.bow) - self.cnv, v.dot(self.starboard))
    }

    /// Unclamped time of closest approach, or `None` when not closing.
    fn time_of_min(&self, course: f64, speed: f64) -> Option<(DVec2, DVec2, f64)> {
        let r = self.os - self.cn;
        let w = Self::own_velocity(course, speed) - self.cn_vel;
        let a = w.length_squared();
        if a < MIN_REL_SPEED_SQ {
            return None;
        }
        let t = -r.dot(w) / a;
        if t <= 0.0 {
            return None;
        }
        Some((r, w, t))
    }

    /// Minimum separation over the next `tol` seconds.
    pub fn eval_cpa(&self, course: f64, speed: f64, tol: f64) -> f64 {
        match self.time_of_min(course, speed) {
            Some((r, w, t)) if tol > 0.0 => (r + w * t.min(tol)).length(),
            _ => self.range,
        }
    }

    /// Time of the minimum separation, clamped to [0, tol].
    pub fn eval_time_cpa(&self, course: f64, speed: f64, tol: f64) -> f64 {
        match self.time_of_min(course, speed) {
            Some((_, _, t)) if tol > 0.0 => t.min(tol),
            _ => 0.0,
        }
    }

    /// Rate at which range is shrinking (m/s). Negative when opening.
    pub fn rate_of_closure(&self, course: f64, speed: f64) -> f64 {
        if self.range == 0.0 {
            return 0.0;
        }
        let r = self.os - self.cn;
        let w = Self::own_velocity(course, speed) - self.cn_vel;
        -r.dot(w) / self.range
    }

    /// Rate of change of the bearing from ownship to the contact (deg/s).
    /// Positive means the contact is drawing right.
    pub fn bearing_rate(&self, course: f64, speed: f64) -> f64 {
        if self.range == 0.0 {
            return 0.0;
        }
        let d = self.cn - self.os;
        let w = self.cn_vel - Self::own_velocity(course, speed);
        let rad_per_sec = (d.y * w.x - d.x * w.y) / d.length_squared();
        rad_per_sec.to_degrees()
    }

    /// Where ownship meets the contact's heading line, as the along-track
    /// offset from the contact at that moment (+ ahead). `None` if never.
    /// Ownship sitting on the line counts as port side.
    fn line_crossing(&self, course: f64, speed: f64) -> Option<f64> {
        if self.on_contact || speed <= 0.0 {
            return None;
        }
        let (va, vl) = self.relative_frame_velocity(course, speed);
        let toward_line = if self.lateral <= 0.0 { vl > 0.0 } else { vl < 0.0 };
        if !toward_line {
            return None;
        }
        let t = -self.lateral / vl;
        Some(self.along + va * t)
    }

    /// Ownship offset across the contact's heading when it draws abeam
    /// (+ starboard). `None` if it never draws abeam.
    fn beam_passing(&self, course: f64, speed: f64) -> Option<f64> {
        if self.on_contact {
            return None;
        }
        let (va, vl) = self.relative_frame_velocity(course, speed);
        let t = if self.along == 0.0 {
            0.0
        } else if (self.along > 0.0 && va < 0.0) || (self.along < 0.0 && va > 0.0) {
            -self.along / va
        } else {
            return None;
        };
        Some(self.lateral + vl * t)
    }

    /// Ownship crosses the contact's heading line ahead of it.
    pub fn crosses_bow(&self, course: f64, speed: f64) -> bool {
        self.line_crossing(course, speed).is_some_and(|a| a >= 0.0)
    }

    /// Ownship crosses the contact's heading line behind it.
    pub fn crosses_stern(&self, course: f64, speed: f64) -> bool {
        self.line_crossing(course, speed).is_some_and(|a| a < 0.0)
    }

    pub fn crosses_bow_or_stern(&self, course: f64, speed: f64) -> bool {
        self.line_crossing(course, speed).is_some()
    }

    /// Distance ahead of the contact at which ownship crosses its bow.
    pub fn crosses_bow_dist(&self, course: f64, speed: f64) -> Option<f64> {
        self.line_crossing(course, speed).filter(|a| *a >= 0.0)
    }

    /// Distance behind the contact at which ownship crosses its stern.
    pub fn crosses_stern_dist(&self, course: f64, speed: f64) -> Option<f64> {
        self.line_crossing(course, speed)
            .filter(|a| *a < 0.0)
            .map(|a| -a)
    }

    /// Ownship draws abeam of the contact at some point.
    pub fn passes_port_or_star(&self, course: f64, speed: f64) -> bool {
        self.beam_passing(course, speed).is_some()
    }

    /// Ownship passes down the contact's port side.
    pub fn passes_port(&self, course: f64, speed: f64) -> bool {
        self.beam_passing(course, speed).is_some_and(|l| l < 0.0)
    }

    /// Ownship passes down the contact's starboard side.
    pub fn passes_star(&self, course: f64, speed: f64) -> bool {
        self.beam_passing(course, speed).is_some_and(|l| l > 0.0)
    }

    /// Lateral clearance when passing the contact's port side.
    pub fn passes_port_dist(&self, course: f64, speed: f64) -> Option<f64> {
        self.beam_passing(course, speed)
            .filter(|l| *l < 0.0)
            .map(|l| -l)
    }

    /// Lateral clearance when passing the contact's starboard side.
    pub fn passes_star_dist(&self, course: f64, speed: f64) -> Option<f64> {
        self.beam_passing(course, speed).filter(|l| *l > 0.0)
    }

    // --- Present geometry ---

    pub fn range(&self) -> f64 {
        self.range
    }

    pub fn on_contact(&self) -> bool {
        self.on_contact
    }

    /// Ownship is on the contact's port side, or on its heading line.
    pub fn port_of_contact(&self) -> bool {
        !self.on_contact && self.lateral <= 0.0
    }

    /// Ownship is on the contact's starboard side, or on its heading line.
    pub fn starboard_of_contact(&self) -> bool {
        !self.on_contact && self.lateral >= 0.0
    }

    pub fn fore_of_contact(&self) -> bool {
        !self.on_contact && self.along >= 0.0
    }

    pub fn aft_of_contact(&self) -> bool {
        !self.on_contact && self.along <= 0.0
    }

    pub fn on_beam(&self) -> bool {
        self.on_contact || self.along == 0.0
    }

    pub fn on_bowline(&self) -> bool {
        !self.on_contact && self.lateral == 0.0 && self.along > 0.0
    }

    pub fn on_sternline(&self) -> bool {
        !self.on_contact && self.lateral == 0.0 && self.along < 0.0
    }

    /// Perpendicular distance from ownship to the contact's heading line.
    pub fn range_gamma(&self) -> f64 {
        self.lateral.abs()
    }

    /// Distance from the contact to ownship's foot on its heading line.
    pub fn range_epsilon(&self) -> f64 {
        self.along.abs()
    }

    /// Bearing of ownship relative to the contact's bow, [0, 360).
    pub fn contact_ownship_rel_bearing(&self) -> f64 {
        self.rel_bng_cn_os
    }

    /// Bearing of the contact relative to ownship's bow, [0, 360).
    pub fn ownship_contact_rel_bearing(&self, own_heading: f64) -> f64 {
        angle360(self.abs_bng_os_cn - own_heading)
    }

    /// Absolute bearing from ownship to the contact, [0, 360).
    pub fn ownship_contact_bearing(&self) -> f64 {
        self.abs_bng_os_cn
    }

    /// Contact speed component toward ownship.
    pub fn contact_speed_toward_ownship(&self) -> f64 {
        if self.on_contact {
            return 0.0;
        }
        self.cn_vel.dot((self.os - self.cn) / self.range)
    }

    pub fn own_position(&self) -> DVec2 {
        self.os
    }

    pub fn contact_position(&self) -> DVec2 {
        self.cn
    }

    pub fn contact_heading(&self) -> f64 {
        self.cnh
    }

    pub fn contact_speed(&self) -> f64 {
        self.cnv
    }

    /// Same positions, the contact on a different heading and speed.
    pub fn with_contact_motion(&self, heading: f64, speed: f64) -> Self {
        Self::new(self.cn.x, self.cn.y, heading, speed, self.os.x, self.os.y)
    }

    pub fn turns_right(current_heading: f64, candidate_heading: f64) -> bool {
        turns_right(current_heading, candidate_heading)
    }

    pub fn turns_left(current_heading: f64, candidate_heading: f64) -> bool {
        turns_left(current_heading, candidate_heading)
    }
}

/// Candidate heading lies less than 180 degrees clockwise of the current one.
pub fn turns_right(current_heading: f64, candidate_heading: f64) -> bool {
    let delta = angle360(candidate_heading - current_heading);
    delta > 0.0 && delta < 180.0
}

/// Candidate heading lies less than 180 degrees counter-clockwise.
pub fn turns_left(current_heading: f64, candidate_heading: f64) -> bool {
    angle360(candidate_heading - current_heading) > 180.0
}
