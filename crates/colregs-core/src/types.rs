//! Fundamental kinematic types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::angles::{angle360, heading_vector, rel_ang};

/// Planar pose and motion of one vessel.
/// x = East, y = North (meters). Heading is degrees clockwise from North.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KinematicState {
    pub x: f64,
    pub y: f64,
    /// Degrees, [0, 360).
    pub heading: f64,
    /// Meters per second.
    pub speed: f64,
    /// Seconds, same clock as the tick time.
    pub timestamp: f64,
}

impl KinematicState {
    pub fn new(x: f64, y: f64, heading: f64, speed: f64, timestamp: f64) -> Self {
        Self {
            x,
            y,
            heading: angle360(heading),
            speed,
            timestamp,
        }
    }

    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Velocity vector (m/s).
    pub fn velocity(&self) -> DVec2 {
        heading_vector(self.heading) * self.speed
    }

    /// Range to another vessel in meters.
    pub fn range_to(&self, other: &KinematicState) -> f64 {
        self.position().distance(other.position())
    }

    /// Absolute bearing to another vessel (degrees, 0 = North).
    pub fn bearing_to(&self, other: &KinematicState) -> f64 {
        rel_ang(self.x, self.y, other.x, other.y)
    }

    /// Seconds since the state was observed.
    pub fn age(&self, now: f64) -> f64 {
        now - self.timestamp
    }

    /// Straight-line dead reckoning by `dt` seconds.
    pub fn advanced(&self, dt: f64) -> Self {
        let p = self.position() + self.velocity() * dt;
        Self {
            x: p.x,
            y: p.y,
            heading: self.heading,
            speed: self.speed,
            timestamp: self.timestamp + dt,
        }
    }
}

/// One contact as reported by the external contact tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactReport {
    pub name: String,
    /// Lowercase vessel type, e.g. "kayak" or "ship". Empty if unknown.
    #[serde(default)]
    pub contact_type: String,
    pub state: KinematicState,
    /// Set once the tracker has dropped the contact.
    #[serde(default)]
    pub retired: bool,
}

impl ContactReport {
    pub fn new(name: &str, state: KinematicState) -> Self {
        Self {
            name: name.to_string(),
            contact_type: String::new(),
            state,
            retired: false,
        }
    }

    pub fn with_type(mut self, contact_type: &str) -> Self {
        self.contact_type = contact_type.to_lowercase();
        self
    }
}
