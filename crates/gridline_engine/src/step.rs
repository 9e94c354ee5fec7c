//! The turn reducer.
//!
//! [`advance`] applies one action to a snapshot and returns the next one. The
//! input is never modified; the output shares structure with it.
//!
//! # Turn order
//!
//! ```text
//! guard ─▶ pre-turn ─▶ action ─▶ post-turn
//!            movers      move      expire effects
//!            pursuers    use key   tile cost
//!            tick        pick up   win / lose
//!            trail       wait      turn += 1
//!                                  collect garbage
//! ```
//!
//! After every move attempt, and once for the other actions, the interaction
//! suite runs: portals, then damage, then floor rewards, then win/lose.

use gridline_foundation::{Action, EntityId, Position};
use gridline_storage::{EffectKind, World};

use crate::collect::collect_system;
use crate::damage::damage_system;
use crate::effects::{expire_effects, tick_time_limits, use_effect};
use crate::gc::collect_garbage;
use crate::movement::try_move;
use crate::moving::moving_system;
use crate::pathfinding::pathfinding_system;
use crate::portal::portal_system;
use crate::terminal;
use crate::tile::{tile_cost_system, tile_reward_system};
use crate::trail::trail_system;
use crate::unlock::unlock_system;

// =============================================================================
// Entry points
// =============================================================================

/// Applies `action` by `agent` and returns the next snapshot.
///
/// A missing, unplaced, or dead agent, or a world that has already been won
/// or lost, yields an unchanged copy of `world`.
#[must_use]
pub fn advance(world: &World, action: Action, agent: EntityId) -> World {
    if !is_playable(world, agent) {
        tracing::debug!(agent = ?agent, action = %action, "turn skipped");
        return world.clone();
    }

    let start_score = world.score();
    let world = pre_turn(world.clone());
    let world = match action {
        Action::Up | Action::Down | Action::Left | Action::Right => move_action(world, action, agent),
        Action::UseKey => after_substep(unlock_system(world, agent), agent),
        Action::PickUp => after_substep(collect_system(world, agent), agent),
        Action::Wait => after_substep(world, agent),
    };
    let world = post_turn(world, agent);

    tracing::debug!(
        turn = world.turn(),
        action = %action,
        score = world.score(),
        delta = world.score() - start_score,
        win = world.win(),
        lose = world.lose(),
        "turn"
    );
    world
}

/// [`advance`] for the lowest-id agent. Unchanged if there is none.
#[must_use]
pub fn advance_first_agent(world: &World, action: Action) -> World {
    match world.first_agent() {
        Some(agent) => advance(world, action, agent),
        None => world.clone(),
    }
}

/// Applies each action in turn, stopping early once the world is terminal.
#[must_use]
pub fn run(world: &World, agent: EntityId, actions: &[Action]) -> World {
    let mut current = world.clone();
    for &action in actions {
        if current.is_terminal() {
            break;
        }
        current = advance(&current, action, agent);
    }
    current
}

fn is_playable(world: &World, agent: EntityId) -> bool {
    world.components().agent.contains(&agent)
        && world.position(agent).is_some()
        && !world.components().dead.contains(&agent)
        && !world.is_terminal()
}

// =============================================================================
// Phases
// =============================================================================

fn pre_turn(mut world: World) -> World {
    world.begin_turn();
    let world = moving_system(world);
    let world = pathfinding_system(world);
    let world = tick_time_limits(world);
    trail_system(world)
}

/// Portals, damage, floor rewards, then terminal evaluation.
fn after_substep(world: World, agent: EntityId) -> World {
    let world = portal_system(world);
    let world = damage_system(world);
    let world = tile_reward_system(world, agent);
    terminal::evaluate(world, agent)
}

fn move_action(mut world: World, action: Action, agent: EntityId) -> World {
    let substeps = match use_effect(&mut world, agent, &[EffectKind::Speed]) {
        Some(effect) => world
            .components()
            .speed
            .get(&effect)
            .map_or(1, |s| s.multiplier.max(1)),
        None => 1,
    };

    for _ in 0..substeps {
        let proposals: Vec<Position> = world.movement().propose(&world, agent, action);
        for target in proposals {
            let (next, outcome) = try_move(world, agent, target);
            world = after_substep(next, agent);
            if !outcome.moved()
                || world.is_terminal()
                || world.components().dead.contains(&agent)
            {
                return world;
            }
        }
    }
    world
}

fn post_turn(world: World, agent: EntityId) -> World {
    let world = expire_effects(world);
    let world = tile_cost_system(world, agent);
    let mut world = terminal::evaluate(world, agent);
    world.increment_turn();
    collect_garbage(world)
}
