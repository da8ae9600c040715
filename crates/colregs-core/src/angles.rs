//! Angle and planar geometry helpers.
//!
//! Headings are degrees clockwise from North (+y). Every bearing leaving this
//! module is normalized to [0, 360).

use glam::DVec2;

/// Normalize to [0, 360).
pub fn angle360(degrees: f64) -> f64 {
    let a = degrees.rem_euclid(360.0);
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Normalize to (-180, 180].
pub fn angle180(degrees: f64) -> f64 {
    let a = angle360(degrees);
    if a > 180.0 {
        a - 360.0
    } else {
        a
    }
}

/// Cosine of the angle between two headings.
/// Exact at multiples of 90 degrees so that beam geometry has no residue.
pub fn cos_delta(h1: f64, h2: f64) -> f64 {
    let d = angle180(h1 - h2).abs();
    if d == 0.0 {
        1.0
    } else if d == 90.0 {
        0.0
    } else if d == 180.0 {
        -1.0
    } else {
        d.to_radians().cos()
    }
}

/// Unit vector for a heading.
pub fn heading_vector(heading: f64) -> DVec2 {
    let h = angle360(heading);
    match h {
        h if h == 0.0 => DVec2::new(0.0, 1.0),
        h if h == 90.0 => DVec2::new(1.0, 0.0),
        h if h == 180.0 => DVec2::new(0.0, -1.0),
        h if h == 270.0 => DVec2::new(-1.0, 0.0),
        _ => {
            let (s, c) = h.to_radians().sin_cos();
            DVec2::new(s, c)
        }
    }
}

/// Absolute bearing of point B from point A. Zero if the points coincide.
pub fn rel_ang(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = bx - ax;
    let dy = by - ay;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    angle360(dx.atan2(dy).to_degrees())
}

/// Bearing of point B relative to the bow of vessel A.
pub fn rel_bearing(ax: f64, ay: f64, ah: f64, bx: f64, by: f64) -> f64 {
    angle360(rel_ang(ax, ay, bx, by) - ah)
}

/// Relative bearing folded to [0, 180]: how far off the bow B lies.
pub fn abs_rel_bearing(ax: f64, ay: f64, ah: f64, bx: f64, by: f64) -> f64 {
    angle180(rel_bearing(ax, ay, ah, bx, by)).abs()
}

/// Point reached by travelling `dist` along `heading` from (x, y).
pub fn project_point(heading: f64, dist: f64, x: f64, y: f64) -> (f64, f64) {
    let p = DVec2::new(x, y) + heading_vector(heading) * dist;
    (p.x, p.y)
}

/// Component of a velocity (heading, speed) along a target heading.
pub fn speed_in_heading(heading: f64, speed: f64, target_heading: f64) -> f64 {
    speed * cos_delta(heading, target_heading)
}

/// Distance from a point to the infinite line through `p1` and `p2`.
pub fn dist_point_to_line(p: DVec2, p1: DVec2, p2: DVec2) -> f64 {
    let dir = p2 - p1;
    let len = dir.length();
    if len == 0.0 {
        return p.distance(p1);
    }
    dir.perp_dot(p - p1).abs() / len
}

/// Gap between a line and the circle ownship would trace if it began a turn
/// of `radius` from its present pose. Zero when the circle meets the line.
pub fn turn_gap(
    osx: f64,
    osy: f64,
    osh: f64,
    radius: f64,
    p1: DVec2,
    p2: DVec2,
    turn_right: bool,
) -> f64 {
    let to_center = if turn_right { osh + 90.0 } else { osh - 90.0 };
    let (cx, cy) = project_point(to_center, radius, osx, osy);
    let dist = dist_point_to_line(DVec2::new(cx, cy), p1, p2);
    (dist - radius).max(0.0)
}
