//! Minimal rules for unit tests in this crate.

use gridline_foundation::{Action, EntityId, Position};

use crate::rules::{MovementRule, Objective};
use crate::world::World;

/// One tile in the action's direction.
#[derive(Debug)]
pub struct Step;

impl MovementRule for Step {
    fn propose(&self, world: &World, entity: EntityId, action: Action) -> Vec<Position> {
        match (world.position(entity), action.direction()) {
            (Some(p), Some(d)) => vec![p.step(d)],
            _ => Vec::new(),
        }
    }

    fn name(&self) -> &str {
        "step"
    }
}

/// Agent stands on an exit.
#[derive(Debug)]
pub struct Exit;

impl Objective for Exit {
    fn is_met(&self, world: &World, agent: EntityId) -> bool {
        world
            .position(agent)
            .is_some_and(|p| !world.entities_with_component_at(p, &world.components().exit).is_empty())
    }

    fn name(&self) -> &str {
        "exit"
    }
}
