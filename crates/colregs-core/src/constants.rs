//! Default tuning parameters for the avoidance behavior and its objectives.

// --- Distance parameters ---

/// Range at which a contact first gains priority weight (meters).
pub const DEFAULT_PWT_OUTER_DIST: f64 = 100.0;

/// Range inside which a contact carries full priority weight (meters).
pub const DEFAULT_PWT_INNER_DIST: f64 = 90.0;

/// Range beyond which the encounter is considered complete (meters).
pub const DEFAULT_COMPLETED_DIST: f64 = 100.0;

/// CPA at or below which a maneuver scores as a collision (meters).
pub const DEFAULT_MIN_UTIL_CPA_DIST: f64 = 10.0;

/// CPA at or above which a maneuver scores as all-clear (meters).
pub const DEFAULT_MAX_UTIL_CPA_DIST: f64 = 75.0;

/// Ownship turning radius used for the give-way turn-gap test (meters).
pub const DEFAULT_TURN_RADIUS: f64 = 0.0;

/// Minimum bow-crossing clearance when giving way ahead of a contact.
/// Zero disables the requirement.
pub const DEFAULT_GIVEWAY_BOW_DIST: f64 = 0.0;

// --- Bearing thresholds ---

/// Half-width of the stern sector for overtaking (degrees).
pub const DEFAULT_OVERTAKING_BNG_RANGE: f64 = 67.5;

/// Maximum absolute relative bearing for a head-on encounter (degrees).
pub const DEFAULT_HEADON_ABS_RELBNG_THRESH: f64 = 12.0;

/// Relative bearing beyond which a vessel is abaft the beam (degrees).
pub const ABAFT_BEAM_BNG: f64 = 112.5;

/// Mirror of [`ABAFT_BEAM_BNG`] on the port side (degrees).
pub const ABAFT_BEAM_BNG_PORT: f64 = 247.5;

/// Sector around the contact's bow marking the end of an overtake (degrees).
pub const OVERTAKING_DONE_SECTOR: f64 = 22.5;

/// Hysteresis buffer for overtaking passing-side changes (degrees).
pub const OVERTAKING_SIDE_BUFFER: f64 = 5.0;

/// Per-vessel bearing excess that releases a head-on encounter (degrees).
pub const HEADON_RELEASE_EXTRA: f64 = 5.0;

/// Combined bearing excess that releases a head-on encounter (degrees).
pub const HEADON_RELEASE_TOTAL_EXTRA: f64 = 7.5;

// --- Timing ---

/// CPA projection horizon (seconds).
pub const DEFAULT_TIME_ON_LEG: f64 = 120.0;

/// Span of contact heading and bearing history (seconds).
pub const DEFAULT_MEMORY_TIME: f64 = 5.0;

/// Kinematics older than this are stale (seconds).
pub const DEFAULT_MAX_DATA_AGE: f64 = 10.0;

/// Minimum history span for a contact heading rate (seconds).
pub const HEADING_RATE_MIN_SECS: f64 = 4.0;

/// Hard cap on samples kept per history buffer.
pub const MAX_HISTORY_SAMPLES: usize = 256;

// --- Utility shaping ---

/// Utility scale upper bound.
pub const MAX_UTILITY: f64 = 100.0;

/// CPA utility floor for generic avoidance.
pub const CPA_FLOOR: f64 = 0.0;

/// CPA utility floor for rule 13 (overtaking).
pub const OVERTAKING_FLOOR: f64 = 15.0;

/// CPA utility floor for rules 14, 16, and 17 avoid.
pub const RULE_FLOOR: f64 = 25.0;

/// Course deviation at which rule 17 hold utility reaches zero (degrees).
pub const HOLD_MAX_COURSE_DELTA: f64 = 20.0;

/// Speed deviation at which rule 17 hold utility reaches zero (m/s).
pub const HOLD_MAX_SPEED_DELTA: f64 = 1.5;

/// Default behavior priority weight.
pub const DEFAULT_PRIORITY_WEIGHT: f64 = 100.0;

// --- Decision space ---

/// Reference course divisions.
pub const DEFAULT_COURSE_DIVISIONS: u32 = 9;

/// Reference speed divisions.
pub const DEFAULT_SPEED_DIVISIONS: u32 = 6;

/// Reference maximum speed (m/s).
pub const DEFAULT_MAX_SPEED: f64 = 5.0;

// --- Alerting ---

/// Default behavior descriptor, used in the alert request identifier.
pub const DEFAULT_DESCRIPTOR: &str = "colregs";

/// Default variable the contact manager posts alerts to.
pub const DEFAULT_UPDATE_VAR: &str = "CONTACT_INFO";

/// Value template the contact manager fills for each alerted contact.
pub const ALERT_VALUE_TEMPLATE: &str = "name=$[VNAME] # contact=$[VNAME]";

/// Prefix of the alert request identifier.
pub const ALERT_ID_PREFIX: &str = "avdcol_";
