//! Autonomous movers.

use gridline_foundation::EntityId;
use gridline_storage::{Moving, World};

/// Advances every mover up to `speed` unit steps along its axis.
///
/// A step is blocked by the grid edge or by anything [`World::is_blocked`]
/// reports; blocking movers also treat collidable entities as obstacles. A
/// blocked bouncing mover reverses its heading and stops for the turn.
#[must_use]
pub fn moving_system(mut world: World) -> World {
    let movers: Vec<(EntityId, Moving)> = world
        .components()
        .moving
        .iter()
        .map(|(&e, m)| (e, m.clone()))
        .collect();

    for (entity, mut moving) in movers {
        let Some(mut pos) = world.position(entity) else {
            continue;
        };
        let solid = world.components().blocking.contains(&entity);
        let (dx, dy) = moving.axis.delta(moving.heading);
        let mut reversed = false;

        for _ in 0..moving.speed {
            let next = pos.offset(dx, dy);
            if !world.in_bounds(next) || world.is_blocked(next, solid) {
                if moving.bounce {
                    moving.heading = moving.heading.reversed();
                    reversed = true;
                }
                break;
            }
            pos = next;
            world.set_position(entity, pos);
        }

        if reversed {
            tracing::trace!(entity = ?entity, heading = ?moving.heading, "mover bounced");
            world.components_mut().moving.insert_mut(entity, moving);
        }
    }
    world
}
