//! Win and lose evaluation.

use gridline_foundation::EntityId;
use gridline_storage::World;

/// Message recorded when the objective is met.
pub const WIN_MESSAGE: &str = "objective complete";

/// Message recorded when the agent dies.
pub const LOSE_MESSAGE: &str = "agent died";

/// Marks the world won if the live agent meets the objective.
#[must_use]
pub fn win_system(mut world: World, agent: EntityId) -> World {
    if world.is_terminal()
        || !world.contains(agent)
        || world.components().dead.contains(&agent)
    {
        return world;
    }
    if world.objective().is_met(&world, agent) {
        tracing::debug!(agent = ?agent, turn = world.turn(), score = world.score(), "win");
        world.set_win(WIN_MESSAGE);
    }
    world
}

/// Marks the world lost if the agent is dead.
#[must_use]
pub fn lose_system(mut world: World, agent: EntityId) -> World {
    if world.components().dead.contains(&agent) && !world.lose() {
        tracing::debug!(agent = ?agent, turn = world.turn(), score = world.score(), "lose");
        world.set_lose(LOSE_MESSAGE);
    }
    world
}

/// Win check, then lose check.
#[must_use]
pub fn evaluate(world: World, agent: EntityId) -> World {
    lose_system(win_system(world, agent), agent)
}
