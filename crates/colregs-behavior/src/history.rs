//! Short rolling history of an angular quantity, used for turn rates.

use std::collections::VecDeque;

use colregs_core::angles::angle180;
use colregs_core::constants::MAX_HISTORY_SAMPLES;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    time: f64,
    value: f64,
}

/// Samples no older than `memory_time`, oldest first.
#[derive(Debug, Clone, Default)]
pub struct TimedHistory {
    samples: VecDeque<Sample>,
}

impl TimedHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, time: f64, value: f64, memory_time: f64) {
        self.samples.push_back(Sample { time, value });
        while let Some(front) = self.samples.front() {
            if time - front.time >= memory_time && self.samples.len() > 1 {
                self.samples.pop_front();
            } else {
                break;
            }
        }
        if self.samples.len() > MAX_HISTORY_SAMPLES {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Time covered from oldest to newest sample.
    pub fn span(&self) -> f64 {
        match (self.samples.front(), self.samples.back()) {
            (Some(a), Some(b)) => b.time - a.time,
            _ => 0.0,
        }
    }

    /// Mean angular rate in deg/s across the window, wrap-aware. `None`
    /// until at least `min_secs` of samples are held.
    pub fn rate(&self, min_secs: f64) -> Option<f64> {
        if self.samples.len() < 2 {
            return None;
        }
        let span = self.span();
        if span <= 0.0 || span < min_secs {
            return None;
        }
        let total: f64 = self
            .samples
            .iter()
            .zip(self.samples.iter().skip(1))
            .map(|(a, b)| angle180(b.value - a.value))
            .sum();
        Some(total / span)
    }
}
