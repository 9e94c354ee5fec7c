//! Entity reachability collector.
//!
//! Roots are agents and every entity with a position. From there the collector
//! follows inventory items, status effects, portal pairs, and pursuit targets
//! until nothing new turns up. Everything else is deleted.

use gridline_foundation::{EntityId, GlSet};
use gridline_storage::World;

/// Every entity reachable from the roots.
#[must_use]
pub fn reachable(world: &World) -> GlSet<EntityId> {
    let c = world.components();
    let mut live: GlSet<EntityId> = c.position.key_set();
    live.extend(c.agent.iter().copied());

    let mut frontier: Vec<EntityId> = live.iter().copied().collect();
    while let Some(e) = frontier.pop() {
        let mut edges = Vec::new();
        if let Some(inventory) = c.inventory.get(&e) {
            edges.extend(inventory.items.iter().copied());
        }
        if let Some(status) = c.status.get(&e) {
            edges.extend(status.effects.iter().copied());
        }
        if let Some(portal) = c.portal.get(&e) {
            edges.push(portal.pair);
        }
        if let Some(target) = c.pathfinding.get(&e).and_then(|p| p.target) {
            edges.push(target);
        }
        for next in edges {
            if world.contains(next) && live.insert_mut(next) {
                frontier.push(next);
            }
        }
    }
    live
}

/// Deletes every unreachable entity and its rows.
#[must_use]
pub fn collect_garbage(mut world: World) -> World {
    let live = reachable(&world);
    let removed = world.retain_entities(&live);
    if removed > 0 {
        tracing::trace!(removed, remaining = world.entity_count(), "garbage collected");
    }
    world
}
