//! Gridline - Deterministic turn-based gridworld simulation
//!
//! This crate re-exports all layers of the Gridline system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: gridline_debug      — Turn history, diffs, replay
//! Layer 2: gridline_engine     — Turn reducer, rules, interaction systems
//! Layer 1: gridline_storage    — Component tables, world snapshots, spatial queries
//! Layer 0: gridline_foundation — Core types (EntityId, Position, Action, Error)
//! ```

pub use gridline_debug as debug;
pub use gridline_engine as engine;
pub use gridline_foundation as foundation;
pub use gridline_storage as storage;
