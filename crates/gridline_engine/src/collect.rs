//! Picking up items and power-ups.

use gridline_foundation::EntityId;
use gridline_storage::World;

/// Collects everything collectible on the agent's tile.
///
/// Valid effects go to the agent's status, plain items to its inventory, each
/// only if the agent has one. A rewardable collectible pays its reward even
/// when there is nowhere to put it. Anything collected leaves the grid; the
/// rest stays where it lies.
#[must_use]
pub fn collect_system(mut world: World, agent: EntityId) -> World {
    let Some(at) = world.position(agent) else {
        return world;
    };
    let candidates = world.entities_with_component_at(at, &world.components().collectible);
    if candidates.is_empty() {
        return world;
    }

    let c = world.components();
    let mut status = c.status.get(&agent).cloned();
    let mut inventory = c.inventory.get(&agent).cloned();
    let mut reward = 0i64;
    let mut collected = Vec::new();

    for item in candidates {
        let is_effect = c.is_effect(item);
        let mut taken = false;
        if let Some(status) = status.as_mut().filter(|_| is_effect && c.is_effect_valid(item)) {
            status.effects.insert_mut(item);
            taken = true;
        } else if let Some(inventory) = inventory.as_mut().filter(|_| !is_effect) {
            inventory.items.insert_mut(item);
            taken = true;
        }
        if let Some(r) = c.rewardable.get(&item) {
            reward = reward.saturating_add(r.amount);
            taken = true;
        }
        if taken {
            collected.push(item);
        }
    }

    let c = world.components_mut();
    for item in &collected {
        c.position.remove_mut(item);
        c.collectible.remove_mut(item);
        tracing::trace!(agent = ?agent, item = ?item, "picked up");
    }
    if let Some(status) = status {
        c.status.insert_mut(agent, status);
    }
    if let Some(inventory) = inventory {
        c.inventory.insert_mut(agent, inventory);
    }
    world.add_score(reward);
    world
}
