//! Integration tests for Layer 2: Engine
//!
//! Tests for the turn reducer and the interaction systems it drives.

mod effects;
mod logging;
mod scenarios;

use gridline_engine::SimConfig;
use gridline_foundation::{EntityId, Position};
use gridline_storage::{World, WorldBuilder};

pub fn p(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

/// A builder for a `width` x `height` grid with default rules.
pub fn builder(width: i32, height: i32) -> WorldBuilder {
    SimConfig::default()
        .with_size(width, height)
        .builder()
        .unwrap()
}

pub fn health(world: &World, entity: EntityId) -> u32 {
    world.components().health.get(&entity).unwrap().current
}
