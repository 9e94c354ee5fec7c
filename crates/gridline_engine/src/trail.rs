//! Trail bookkeeping and contact queries.
//!
//! The trail maps each tile to the entities that passed over it this turn.
//! Entities moved by the pre-turn systems get their whole path reconstructed
//! here; agent moves and teleports mark single tiles as they happen.

use gridline_foundation::{EntityId, GlMap, GlSet, Position};
use gridline_storage::World;

/// Axis-decomposed path from `from` to `to`: along `x` first, then `y`.
///
/// Excludes `from`, includes `to`. Empty when the two are equal.
#[must_use]
pub fn axis_path(from: Position, to: Position) -> Vec<Position> {
    let mut path = Vec::with_capacity(from.manhattan(to) as usize);
    let mut cur = from;
    let sx = (to.x - from.x).signum();
    while cur.x != to.x {
        cur = cur.offset(sx, 0);
        path.push(cur);
    }
    let sy = (to.y - from.y).signum();
    while cur.y != to.y {
        cur = cur.offset(0, sy);
        path.push(cur);
    }
    path
}

/// Records the path of every entity that has moved since the turn began.
#[must_use]
pub fn trail_system(mut world: World) -> World {
    let moved: Vec<(EntityId, Position, Position)> = world
        .components()
        .position
        .iter()
        .filter_map(|(&e, &cur)| {
            let prev = world.previous_position(e)?;
            (prev != cur).then_some((e, prev, cur))
        })
        .collect();
    for (entity, prev, cur) in moved {
        for tile in axis_path(prev, cur) {
            world.mark_trail(tile, entity);
        }
    }
    world
}

/// Every tile each entity touched this turn: its trail plus where it stands.
#[must_use]
pub fn footprints(world: &World) -> GlMap<EntityId, GlSet<Position>> {
    let mut out: GlMap<EntityId, GlSet<Position>> = world
        .components()
        .position
        .iter()
        .map(|(&e, &p)| (e, GlSet::unit(p)))
        .collect();
    for (&tile, visitors) in world.trail().iter() {
        for &e in visitors.iter() {
            let tiles = out.get(&e).cloned().unwrap_or_default();
            out.insert_mut(e, tiles.insert(tile));
        }
    }
    out
}

/// True if `a` and `b` traded places this turn.
#[must_use]
pub fn swapped(world: &World, a: EntityId, b: EntityId) -> bool {
    match (
        world.position(a),
        world.position(b),
        world.previous_position(a),
        world.previous_position(b),
    ) {
        (Some(pa), Some(pb), Some(prev_a), Some(prev_b)) => prev_a == pb && prev_b == pa,
        _ => false,
    }
}

/// True if the footprints of `a` and `b` share a tile other than `b`'s
/// starting tile.
#[must_use]
pub fn crossed(
    footprints: &GlMap<EntityId, GlSet<Position>>,
    a: EntityId,
    b: EntityId,
    b_start: Option<Position>,
) -> bool {
    let (Some(fa), Some(fb)) = (footprints.get(&a), footprints.get(&b)) else {
        return false;
    };
    fa.intersection(fb).iter().any(|t| Some(*t) != b_start)
}
