//! Range-based relevance of a contact.

use colregs_core::enums::PwtGrade;

/// 1 inside `inner`, 0 at or beyond `outer`, graded in between.
/// A zero-width band switches straight from 1 to 0 at `outer`.
pub fn relevance(range: f64, inner: f64, outer: f64, grade: PwtGrade) -> f64 {
    if range >= outer {
        return 0.0;
    }
    if range <= inner {
        return 1.0;
    }
    let band = outer - inner;
    if band <= 0.0 {
        return 0.0;
    }
    grade.apply((outer - range) / band).clamp(0.0, 1.0)
}
