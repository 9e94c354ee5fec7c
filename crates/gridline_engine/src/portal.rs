//! Portal teleport.

use gridline_foundation::{EntityId, Position};
use gridline_storage::World;

/// Collidable entities that entered `tile` this turn under their own power.
fn entrants(world: &World, tile: Position) -> Vec<EntityId> {
    world
        .entities_with_component_at(tile, &world.components().collidable)
        .into_iter()
        .filter(|&e| world.previous_position(e) != Some(tile) && !world.ledger().arrived_at(e, tile))
        .collect()
}

/// Sends every new entrant of a portal to its pair.
///
/// Entrants stay put when the pair's tile is blocked. Teleported entities are
/// recorded in the turn ledger so the pair does not send them straight back.
#[must_use]
pub fn portal_system(mut world: World) -> World {
    let portals: Vec<(EntityId, EntityId)> = world
        .components()
        .portal
        .iter()
        .map(|(&e, p)| (e, p.pair))
        .collect();

    for (portal, pair) in portals {
        let Some(tile) = world.position(portal) else {
            continue;
        };
        let Some(exit) = world.position(pair) else {
            tracing::warn!(portal = ?portal, pair = ?pair, "portal pair has no position, skipping");
            continue;
        };
        if world.is_blocked(exit, false) {
            continue;
        }
        for entity in entrants(&world, tile) {
            tracing::trace!(entity = ?entity, from = ?tile, to = ?exit, "teleport");
            world.set_position(entity, exit);
            world.mark_trail(exit, entity);
            world.ledger_mut().arrivals.insert_mut(entity, exit);
        }
    }
    world
}
