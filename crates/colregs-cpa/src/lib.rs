//! Closest-point-of-approach engine.
//!
//! Answers kinematic questions about one (ownship, contact) pair for any
//! candidate ownship course and speed: predicted miss distance, bearing rate,
//! and bow/stern crossing and passing-side geometry.

pub mod engine;

pub use engine::{turns_left, turns_right, CpaEngine};
