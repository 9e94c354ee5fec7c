//! Unlocking adjacent locks with keys from the inventory.

use gridline_foundation::{EntityId, Position};
use gridline_storage::World;

/// A key in `holder`'s inventory that opens `key_id`, lowest id first.
fn matching_key(world: &World, holder: EntityId, key_id: &str) -> Option<EntityId> {
    let c = world.components();
    c.inventory
        .get(&holder)?
        .items
        .iter()
        .copied()
        .find(|item| c.key.get(item).is_some_and(|k| k.key_id == key_id))
}

fn unlock_tile(world: &mut World, agent: EntityId, tile: Position) {
    for lock in world.entities_with_component_at(tile, &world.components().locked) {
        let Some(key_id) = world.components().locked.get(&lock).map(|l| l.key_id.clone()) else {
            continue;
        };
        let Some(key) = matching_key(world, agent, &key_id) else {
            continue;
        };
        let c = world.components_mut();
        c.locked.remove_mut(&lock);
        c.blocking.remove_mut(&lock);
        c.key.remove_mut(&key);
        if let Some(inventory) = c.inventory.get_mut(&agent) {
            inventory.items.remove_mut(&key);
        }
        tracing::trace!(agent = ?agent, lock = ?lock, key = ?key, "unlocked");
    }
}

/// Opens every lock orthogonally adjacent to `agent` for which it holds a
/// matching key. Each opened lock uses up one key.
#[must_use]
pub fn unlock_system(mut world: World, agent: EntityId) -> World {
    let Some(at) = world.position(agent) else {
        return world;
    };
    if !world.components().inventory.contains_key(&agent) {
        return world;
    }
    for tile in at.neighbors() {
        unlock_tile(&mut world, agent, tile);
    }
    world
}
