//! Discretized course x speed decision space.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_COURSE_DIVISIONS, DEFAULT_MAX_SPEED, DEFAULT_SPEED_DIVISIONS};
use crate::error::{ConfigError, Result};

/// One candidate (course, speed) hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub course_ix: u32,
    pub speed_ix: u32,
    /// Degrees, [0, 360).
    pub course: f64,
    /// Meters per second, [0, max_speed].
    pub speed: f64,
}

impl Cell {
    /// A free-standing cell, for evaluating a single hypothesis.
    pub fn at(course: f64, speed: f64) -> Self {
        Self {
            course_ix: 0,
            speed_ix: 0,
            course,
            speed,
        }
    }
}

/// Ordered grid of cells, course-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionSpace {
    course_divisions: u32,
    speed_divisions: u32,
    max_speed: f64,
}

impl Default for DecisionSpace {
    fn default() -> Self {
        Self {
            course_divisions: DEFAULT_COURSE_DIVISIONS,
            speed_divisions: DEFAULT_SPEED_DIVISIONS,
            max_speed: DEFAULT_MAX_SPEED,
        }
    }
}

impl DecisionSpace {
    pub fn new(course_divisions: u32, speed_divisions: u32, max_speed: f64) -> Result<Self> {
        if course_divisions == 0 {
            return Err(ConfigError::invalid("course_divisions", "0"));
        }
        if speed_divisions == 0 {
            return Err(ConfigError::invalid("speed_divisions", "0"));
        }
        if !max_speed.is_finite() || max_speed <= 0.0 {
            return Err(ConfigError::invalid("max_speed", &max_speed.to_string()));
        }
        Ok(Self {
            course_divisions,
            speed_divisions,
            max_speed,
        })
    }

    pub fn course_divisions(&self) -> u32 {
        self.course_divisions
    }

    pub fn speed_divisions(&self) -> u32 {
        self.speed_divisions
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn len(&self) -> usize {
        self.course_divisions as usize * self.speed_divisions as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn course_at(&self, ix: u32) -> f64 {
        ix as f64 * 360.0 / self.course_divisions as f64
    }

    /// A single speed division sits at max speed.
    pub fn speed_at(&self, ix: u32) -> f64 {
        if self.speed_divisions == 1 {
            return self.max_speed;
        }
        ix as f64 * self.max_speed / (self.speed_divisions - 1) as f64
    }

    /// Position of a cell in the ordered set.
    pub fn index_of(&self, cell: &Cell) -> usize {
        cell.course_ix as usize * self.speed_divisions as usize + cell.speed_ix as usize
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.course_divisions).flat_map(move |ci| {
            (0..self.speed_divisions).map(move |si| Cell {
                course_ix: ci,
                speed_ix: si,
                course: self.course_at(ci),
                speed: self.speed_at(si),
            })
        })
    }

    pub fn with_course_divisions(&self, divisions: u32) -> Result<Self> {
        Self::new(divisions, self.speed_divisions, self.max_speed)
    }

    pub fn with_speed_divisions(&self, divisions: u32) -> Result<Self> {
        Self::new(self.course_divisions, divisions, self.max_speed)
    }

    pub fn with_max_speed(&self, max_speed: f64) -> Result<Self> {
        Self::new(self.course_divisions, self.speed_divisions, max_speed)
    }
}
