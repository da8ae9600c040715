//! Core types and definitions for the COLREGS avoidance core.
//!
//! This crate defines the vocabulary shared across all other crates:
//! kinematic states, angle helpers, the decision space, encounter modes,
//! events, status views, errors, and tuning constants.
//! It has no dependency on any transport or runtime framework.

pub mod angles;
pub mod constants;
pub mod decision;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
