//! Pursuers: one step per turn towards a target entity.
//!
//! Both strategies enumerate neighbours in [`Direction::NEIGHBOR_ORDER`].
//! Greedy ties go to the earliest neighbour in that order. A* ties are broken
//! by the frontier key `(f, insertion order)`, so among equally short paths
//! the heuristic decides, the same way every run.
//!
//! [`Direction::NEIGHBOR_ORDER`]: gridline_foundation::Direction::NEIGHBOR_ORDER

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use gridline_foundation::{EntityId, GlSet, Position};
use gridline_storage::{EffectKind, PathStrategy, Pathfinding, World};

use crate::effects::select_effect;

/// Tiles that stop a pursuer: anything blocking or pushable.
fn obstacles(world: &World) -> GlSet<Position> {
    let c = world.components();
    c.position
        .iter()
        .filter(|(e, _)| c.blocking.contains(e) || c.pushable.contains(e))
        .map(|(_, p)| *p)
        .collect()
}

/// The open neighbour that most reduces Manhattan distance to `goal`.
///
/// Returns `None` when no open neighbour is strictly closer.
#[must_use]
pub fn greedy_step(world: &World, start: Position, goal: Position) -> Option<Position> {
    let blocked = obstacles(world);
    let mut best = start.manhattan(goal);
    let mut choice = None;
    for next in start.neighbors() {
        if !world.in_bounds(next) || blocked.contains(&next) {
            continue;
        }
        let d = next.manhattan(goal);
        if d < best {
            best = d;
            choice = Some(next);
        }
    }
    choice
}

/// A shortest path from `start` to `goal`, excluding `start`.
///
/// Unit-cost A* with a Manhattan heuristic. The goal tile itself is always
/// enterable. Returns `None` when the goal is unreachable.
#[must_use]
pub fn shortest_path(world: &World, start: Position, goal: Position) -> Option<Vec<Position>> {
    if start == goal {
        return Some(Vec::new());
    }
    let blocked = obstacles(world);
    let passable = |p: Position| world.in_bounds(p) && (p == goal || !blocked.contains(&p));

    let mut frontier = BinaryHeap::new();
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut cost: HashMap<Position, u32> = HashMap::new();
    let mut seq = 0u64;

    cost.insert(start, 0);
    frontier.push(Reverse((start.manhattan(goal), seq, start)));

    while let Some(Reverse((_, _, current))) = frontier.pop() {
        if current == goal {
            break;
        }
        let next_cost = cost.get(&current).copied().unwrap_or(u32::MAX).saturating_add(1);
        for next in current.neighbors() {
            if !passable(next) {
                continue;
            }
            if cost.get(&next).is_none_or(|&c| next_cost < c) {
                cost.insert(next, next_cost);
                came_from.insert(next, current);
                seq += 1;
                frontier.push(Reverse((next_cost + next.manhattan(goal), seq, next)));
            }
        }
    }

    if !came_from.contains_key(&goal) {
        return None;
    }
    let mut path = vec![goal];
    let mut cur = goal;
    while let Some(&prev) = came_from.get(&cur) {
        if prev == start {
            break;
        }
        path.push(prev);
        cur = prev;
    }
    path.reverse();
    Some(path)
}

/// First step of a shortest path, if one exists.
#[must_use]
pub fn astar_step(world: &World, start: Position, goal: Position) -> Option<Position> {
    shortest_path(world, start, goal)?.first().copied()
}

/// Moves every pursuer one step towards its target.
///
/// Pursuers hold still while their target is out of phase. A target that no
/// longer exists is skipped with a warning.
#[must_use]
pub fn pathfinding_system(mut world: World) -> World {
    let pursuers: Vec<(EntityId, Pathfinding)> = world
        .components()
        .pathfinding
        .iter()
        .map(|(&e, p)| (e, p.clone()))
        .collect();

    for (entity, pursuit) in pursuers {
        let Some(start) = world.position(entity) else {
            continue;
        };
        let Some(target) = pursuit.target else {
            continue;
        };
        let Some(goal) = world.position(target) else {
            tracing::warn!(entity = ?entity, target = ?target, "pursuit target has no position, skipping");
            continue;
        };
        if select_effect(&world, target, &[EffectKind::Phasing]).is_some() {
            tracing::trace!(entity = ?entity, target = ?target, "target out of phase");
            continue;
        }

        let next = match pursuit.strategy {
            PathStrategy::Greedy => greedy_step(&world, start, goal),
            PathStrategy::AStar => astar_step(&world, start, goal),
        };
        if let Some(next) = next {
            if world.in_bounds(next) && !world.is_blocked(next, false) {
                world.set_position(entity, next);
            }
        }
    }
    world
}
