//! Damage and lethal contact.
//!
//! A victim is anything with health. A damager is anything with a damage or
//! lethal-damage row. Contact means sharing a tile, trading places, or paths
//! crossing this turn; each damager lands at most one hit on a given victim
//! per turn no matter how often this pass runs.

use gridline_foundation::{EntityId, GlMap, GlSet, Position};
use gridline_storage::{EffectKind, World};

use crate::effects::use_effect;
use crate::trail::{crossed, footprints, swapped};

fn damagers(world: &World) -> Vec<EntityId> {
    let c = world.components();
    let mut out: GlSet<EntityId> = c.damage.key_set();
    out.extend(c.lethal_damage.iter().copied());
    out.iter()
        .copied()
        .filter(|e| c.position.contains_key(e))
        .collect()
}

fn in_contact(
    world: &World,
    prints: &GlMap<EntityId, GlSet<Position>>,
    victim: EntityId,
    damager: EntityId,
) -> bool {
    world.position(victim) == world.position(damager)
        || swapped(world, victim, damager)
        || crossed(prints, victim, damager, world.previous_position(damager))
}

/// Applies one hit from `damager` to `victim`. Returns true if it killed.
fn hit(world: &mut World, victim: EntityId, damager: EntityId) -> bool {
    let shields: Vec<EffectKind> = EffectKind::ALL
        .into_iter()
        .filter(|k| k.negates_damage())
        .collect();
    if let Some(effect) = use_effect(world, victim, &shields) {
        tracing::trace!(victim = ?victim, damager = ?damager, effect = ?effect, "damage negated");
        return false;
    }

    let lethal = world.components().lethal_damage.contains(&damager);
    let amount = world
        .components()
        .damage
        .get(&damager)
        .map_or(0, |d| d.amount);
    let c = world.components_mut();
    let Some(health) = c.health.get_mut(&victim) else {
        return false;
    };
    if lethal {
        health.current = 0;
    } else {
        health.current = health.current.saturating_sub(amount);
    }
    let killed = health.current == 0;
    tracing::trace!(victim = ?victim, damager = ?damager, lethal, health = health.current, "damage");
    if killed {
        c.dead.insert_mut(victim);
    }
    killed
}

/// Resolves contact between every victim and every damager.
#[must_use]
pub fn damage_system(mut world: World) -> World {
    let damagers = damagers(&world);
    if damagers.is_empty() {
        return world;
    }
    let prints = footprints(&world);
    let victims: Vec<EntityId> = world
        .components()
        .health
        .keys()
        .copied()
        .filter(|e| world.components().position.contains_key(e))
        .collect();

    for victim in victims {
        for &damager in &damagers {
            if damager == victim || world.components().dead.contains(&victim) {
                continue;
            }
            if world.ledger().damage_hits.contains(&(victim, damager)) {
                continue;
            }
            if !in_contact(&world, &prints, victim, damager) {
                continue;
            }
            world.ledger_mut().damage_hits.insert_mut((victim, damager));
            if hit(&mut world, victim, damager) {
                break;
            }
        }
    }
    world
}
