//! Floor rewards and floor costs.
//!
//! Only entities that are not collectible count: an item lying on the floor is
//! picked up for its reward, it does not pay out by being stood on.

use gridline_foundation::{EntityId, Position};
use gridline_storage::{ComponentTable, TileRewardPolicy, World};

fn floor_entities<T>(world: &World, at: Position, table: &T) -> Vec<EntityId>
where
    T: ComponentTable + ?Sized,
{
    world
        .entities_with_component_at(at, table)
        .into_iter()
        .filter(|e| !world.components().collectible.contains(e))
        .collect()
}

fn agent_tile(world: &World, agent: EntityId) -> Option<Position> {
    if world.lose() || world.components().dead.contains(&agent) {
        return None;
    }
    world.position(agent)
}

/// Adds the reward of every floor bonus under the agent.
///
/// Under [`TileRewardPolicy::PerSubStep`] a bonus pays each time this runs;
/// under [`TileRewardPolicy::PerTurn`] it pays at most once per turn.
#[must_use]
pub fn tile_reward_system(mut world: World, agent: EntityId) -> World {
    let Some(at) = agent_tile(&world, agent) else {
        return world;
    };
    let per_turn = world.reward_policy() == TileRewardPolicy::PerTurn;
    for bonus in floor_entities(&world, at, &world.components().rewardable) {
        if per_turn && !world.ledger_mut().rewarded.insert_mut(bonus) {
            continue;
        }
        let amount = world
            .components()
            .rewardable
            .get(&bonus)
            .map_or(0, |r| r.amount);
        tracing::trace!(agent = ?agent, bonus = ?bonus, amount, "floor reward");
        world.add_score(amount);
    }
    world
}

/// Subtracts the cost of every floor tile under the agent.
///
/// Runs once per action, however many sub-steps the action took.
#[must_use]
pub fn tile_cost_system(mut world: World, agent: EntityId) -> World {
    let Some(at) = agent_tile(&world, agent) else {
        return world;
    };
    let total: i64 = floor_entities(&world, at, &world.components().cost)
        .iter()
        .filter_map(|e| world.components().cost.get(e))
        .map(|c| c.amount)
        .sum();
    if total != 0 {
        tracing::trace!(agent = ?agent, total, "floor cost");
        world.add_score(-total);
    }
    world
}
