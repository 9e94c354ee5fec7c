//! Component tables, world snapshots, and spatial queries for Gridline.
//!
//! This crate provides:
//! - [`Components`] - One ordered table per component kind
//! - [`World`] - Immutable turn snapshot with structural sharing
//! - [`WorldBuilder`] - Validated construction of an initial world
//! - [`MovementRule`] / [`Objective`] - Pluggable rule capabilities
//! - Spatial helpers on [`World`]: bounds, blocking, push destinations

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builder;
pub mod component;
pub mod rules;
mod spatial;
pub mod world;

#[cfg(test)]
pub(crate) mod testing;

pub use builder::{EntityBuilder, WorldBuilder};
pub use component::{
    Appearance, AppearanceName, ComponentTable, Components, Cost, Damage, EffectKind, Health,
    Inventory, Key, Locked, Moving, PathStrategy, Pathfinding, Portal, Rewardable, Speed, Status,
    TimeLimit, UsageLimit,
};
pub use rules::{MovementRule, Objective, TileRewardPolicy};
pub use world::{TurnLedger, World};
