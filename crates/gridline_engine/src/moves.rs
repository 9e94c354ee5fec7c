//! Built-in movement rules and the name registry.
//!
//! A rule only proposes positions. The turn reducer tries each proposal in
//! order and stops at the first one that fails, so a rule that returns a
//! sliding path gets every tile checked individually.

use std::sync::Arc;

use gridline_foundation::{Action, Direction, EntityId, Error, ErrorContext, Position, Result};
use gridline_storage::{MovementRule, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Registered rule names, in registry order.
pub const MOVEMENT_RULES: [&str; 6] = ["default", "wrap", "mirror", "slippery", "windy", "gravity"];

/// Chance that wind adds a second tile.
pub const WIND_CHANCE: f64 = 0.3;

/// Resolves a movement rule by name.
///
/// # Errors
///
/// Returns [`ErrorKind::UnknownMovementRule`](gridline_foundation::ErrorKind::UnknownMovementRule)
/// for a name that is not registered.
pub fn movement_rule(name: &str) -> Result<Arc<dyn MovementRule>> {
    let rule: Arc<dyn MovementRule> = match name {
        "default" => Arc::new(DefaultMove),
        "wrap" => Arc::new(WrapMove),
        "mirror" => Arc::new(MirrorMove),
        "slippery" => Arc::new(SlipperyMove),
        "windy" => Arc::new(WindyMove),
        "gravity" => Arc::new(GravityMove),
        _ => {
            return Err(Error::unknown_movement_rule(name).with_context(
                ErrorContext::new()
                    .with_operation("resolve movement rule")
                    .with_note(format!("registered: {}", MOVEMENT_RULES.join(", "))),
            ));
        }
    };
    Ok(rule)
}

/// Deterministic generator for one turn.
///
/// Depends only on the world's seed and turn number, never on ambient state,
/// so replaying the same actions from the same seed draws the same numbers.
#[must_use]
pub fn turn_rng(seed: Option<u64>, turn: u64) -> ChaCha8Rng {
    // splitmix64 finaliser over the pair
    let mut z = seed
        .unwrap_or(0)
        .wrapping_add(turn.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    ChaCha8Rng::seed_from_u64(z ^ (z >> 31))
}

fn start_and_direction(world: &World, entity: EntityId, action: Action) -> Option<(Position, Direction)> {
    Some((world.position(entity)?, action.direction()?))
}

fn has_blocking(world: &World, position: Position) -> bool {
    !world
        .entities_with_component_at(position, &world.components().blocking)
        .is_empty()
}

/// One tile in the action's direction.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultMove;

impl MovementRule for DefaultMove {
    fn propose(&self, world: &World, entity: EntityId, action: Action) -> Vec<Position> {
        start_and_direction(world, entity, action)
            .map(|(p, d)| vec![p.step(d)])
            .unwrap_or_default()
    }

    fn name(&self) -> &str {
        "default"
    }
}

/// One tile, with opposite edges joined.
#[derive(Copy, Clone, Debug, Default)]
pub struct WrapMove;

impl MovementRule for WrapMove {
    fn propose(&self, world: &World, entity: EntityId, action: Action) -> Vec<Position> {
        start_and_direction(world, entity, action)
            .map(|(p, d)| vec![world.wrap_position(p.step(d))])
            .unwrap_or_default()
    }

    fn name(&self) -> &str {
        "wrap"
    }

    fn wraps(&self) -> bool {
        true
    }
}

/// Left and right swapped.
#[derive(Copy, Clone, Debug, Default)]
pub struct MirrorMove;

impl MovementRule for MirrorMove {
    fn propose(&self, world: &World, entity: EntityId, action: Action) -> Vec<Position> {
        let mirrored = match action {
            Action::Left => Action::Right,
            Action::Right => Action::Left,
            other => other,
        };
        DefaultMove.propose(world, entity, mirrored)
    }

    fn name(&self) -> &str {
        "mirror"
    }
}

/// Slides until the edge or a blocking tile.
#[derive(Copy, Clone, Debug, Default)]
pub struct SlipperyMove;

impl MovementRule for SlipperyMove {
    fn propose(&self, world: &World, entity: EntityId, action: Action) -> Vec<Position> {
        let Some((start, direction)) = start_and_direction(world, entity, action) else {
            return Vec::new();
        };
        let mut path = Vec::new();
        let mut next = start.step(direction);
        while world.in_bounds(next) && !has_blocking(world, next) {
            path.push(next);
            next = next.step(direction);
        }
        if path.is_empty() {
            path.push(start);
        }
        path
    }

    fn name(&self) -> &str {
        "slippery"
    }
}

/// One tile, sometimes followed by a gust in a random direction.
#[derive(Copy, Clone, Debug, Default)]
pub struct WindyMove;

impl MovementRule for WindyMove {
    fn propose(&self, world: &World, entity: EntityId, action: Action) -> Vec<Position> {
        let Some((start, direction)) = start_and_direction(world, entity, action) else {
            return Vec::new();
        };
        let first = start.step(direction);
        if !world.in_bounds(first) {
            return vec![start];
        }
        let mut path = vec![first];
        let mut rng = turn_rng(world.seed(), world.turn());
        if rng.gen_bool(WIND_CHANCE) {
            let gust = Action::MOVES[rng.gen_range(0..Action::MOVES.len())];
            if let Some(gust) = gust.direction() {
                let second = first.step(gust);
                if world.in_bounds(second) {
                    path.push(second);
                }
            }
        }
        path
    }

    fn name(&self) -> &str {
        "windy"
    }
}

/// One tile, then falls down until something stops it.
#[derive(Copy, Clone, Debug, Default)]
pub struct GravityMove;

impl MovementRule for GravityMove {
    fn propose(&self, world: &World, entity: EntityId, action: Action) -> Vec<Position> {
        let Some((start, direction)) = start_and_direction(world, entity, action) else {
            return Vec::new();
        };
        let open = |p: Position| world.in_bounds(p) && !has_blocking(world, p);
        let first = start.step(direction);
        if !open(first) {
            return vec![start];
        }
        let mut path = vec![first];
        let mut below = first.step(Direction::Down);
        while open(below) {
            path.push(below);
            below = below.step(Direction::Down);
        }
        path
    }

    fn name(&self) -> &str {
        "gravity"
    }
}
