//! Status effect lifecycle: tick, select, consume, expire.
//!
//! Effects are entities referenced from a holder's status set. An effect may
//! carry a time limit (decremented once per turn) and a usage limit
//! (decremented each time the effect does something). Either reaching zero
//! expires it.

use gridline_foundation::{EntityId, GlSet};
use gridline_storage::{EffectKind, World};

/// Every effect referenced by any status set.
fn held_effects(world: &World) -> GlSet<EntityId> {
    world
        .components()
        .status
        .values()
        .flat_map(|s| s.effects.iter().copied())
        .collect()
}

/// Decrements the time limit of every held effect by one.
#[must_use]
pub fn tick_time_limits(mut world: World) -> World {
    let timed: Vec<EntityId> = held_effects(&world)
        .iter()
        .copied()
        .filter(|e| world.components().time_limit.contains_key(e))
        .collect();
    if timed.is_empty() {
        return world;
    }
    let c = world.components_mut();
    for effect in timed {
        if let Some(limit) = c.time_limit.get_mut(&effect) {
            limit.remaining = limit.remaining.saturating_sub(1);
        }
    }
    world
}

/// Picks the holder's effect of one of `kinds` to use next.
///
/// Only valid effects qualify. Effects without a usage limit are preferred, so
/// limited uses are spent only when nothing else applies. Ties go to the lowest
/// id.
#[must_use]
pub fn select_effect(world: &World, holder: EntityId, kinds: &[EffectKind]) -> Option<EntityId> {
    let c = world.components();
    let status = c.status.get(&holder)?;
    let mut limited = None;
    for &effect in status.effects.iter() {
        if !kinds.iter().any(|&k| c.has_effect(k, effect)) || !c.is_effect_valid(effect) {
            continue;
        }
        if !c.usage_limit.contains_key(&effect) {
            return Some(effect);
        }
        limited.get_or_insert(effect);
    }
    limited
}

/// Spends one use of the effect, if it is usage-limited.
pub fn consume_effect(world: &mut World, effect: EntityId) {
    if !world.components().usage_limit.contains_key(&effect) {
        return;
    }
    if let Some(limit) = world.components_mut().usage_limit.get_mut(&effect) {
        limit.remaining = limit.remaining.saturating_sub(1);
        tracing::trace!(effect = ?effect, remaining = limit.remaining, "effect used");
    }
}

/// Selects and consumes an effect in one go.
pub fn use_effect(world: &mut World, holder: EntityId, kinds: &[EffectKind]) -> Option<EntityId> {
    let effect = select_effect(world, holder, kinds)?;
    consume_effect(world, effect);
    Some(effect)
}

/// Removes expired and dangling effects from every status set.
///
/// An effect is dropped when its time or usage limit is at or below zero, or
/// when it no longer carries any effect component. Dropped effects are
/// deleted from the world.
#[must_use]
pub fn expire_effects(mut world: World) -> World {
    let c = world.components();
    let doomed: GlSet<EntityId> = held_effects(&world)
        .iter()
        .copied()
        .filter(|&e| !c.is_effect(e) || !c.is_effect_valid(e))
        .collect();
    if doomed.is_empty() {
        return world;
    }

    let holders: Vec<EntityId> = c
        .status
        .iter()
        .filter(|(_, s)| s.effects.intersects(&doomed))
        .map(|(h, _)| *h)
        .collect();
    let c = world.components_mut();
    for holder in holders {
        if let Some(status) = c.status.get_mut(&holder) {
            status.effects.retain(|e| !doomed.contains(e));
        }
    }
    for &effect in doomed.iter() {
        tracing::trace!(effect = ?effect, "effect expired");
        world.remove_entity(effect);
    }
    world
}
