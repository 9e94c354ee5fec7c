//! Turn history, world diffs, and deterministic replay for Gridline.
//!
//! This crate provides:
//! - [`TurnHistory`] - Bounded history of turn snapshots with rewind
//! - [`WorldDiff`] - What changed between two snapshots
//! - [`ReplayLog`] / [`replay`] - Record a run and check it reproduces

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod replay;
pub mod timeline;

pub use replay::{Divergence, ReplayLog, ReplayOutcome, ReplayRecorder, replay};
pub use timeline::{HealthChange, Move, TurnHistory, TurnSnapshot, TurnSummary, WorldDiff};
