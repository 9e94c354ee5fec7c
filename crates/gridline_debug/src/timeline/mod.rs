//! Turn history and snapshot comparison.
//!
//! # Features
//!
//! - **History**: Ring buffer of past worlds, one per turn
//! - **Diff**: Compare two worlds, typically consecutive turns
//! - **Rewind**: Return to an earlier turn and continue from there

pub mod diff;
pub mod history;

pub use diff::{HealthChange, Move, WorldDiff};
pub use history::{TurnHistory, TurnSnapshot, TurnSummary};
