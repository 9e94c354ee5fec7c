//! Turn reducer, movement rules, objectives, and interaction systems for Gridline.
//!
//! This crate provides:
//! - [`advance`] - The turn reducer: one action in, one snapshot out
//! - [`moves`] / [`objective`] - Built-in rules and their name registries
//! - [`SimConfig`] - Named configuration resolved into a [`WorldBuilder`]
//! - One module per system: movers, pursuers, portals, damage, effects, and
//!   the reachability collector
//!
//! Every system is a plain function from one [`World`] to the next. Systems
//! never fail; an entity whose references no longer resolve is skipped for
//! the turn.
//!
//! [`WorldBuilder`]: gridline_storage::WorldBuilder
//! [`World`]: gridline_storage::World

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collect;
pub mod config;
pub mod damage;
pub mod effects;
pub mod gc;
pub mod movement;
pub mod moves;
pub mod moving;
pub mod objective;
pub mod pathfinding;
pub mod portal;
pub mod step;
pub mod terminal;
pub mod tile;
pub mod trail;
pub mod unlock;

pub use config::SimConfig;
pub use movement::MoveOutcome;
pub use moves::{MOVEMENT_RULES, movement_rule, turn_rng};
pub use objective::{OBJECTIVES, objective};
pub use step::{advance, advance_first_agent, run};
