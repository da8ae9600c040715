//! Per-contact COLREGS avoidance behavior.
//!
//! Each alerted contact gets an `AvoidanceBehavior` that classifies the
//! encounter every tick and emits a weighted utility surface over the
//! ownship decision space. `AvoidanceManager` owns the instances.

pub mod behavior;
pub mod config;
pub mod history;
pub mod manager;
pub mod modes;
pub mod relevance;
pub mod situation;

pub use behavior::{AvoidanceBehavior, TickInput, TickOutput};
pub use config::BehaviorConfig;
pub use manager::AvoidanceManager;
