//! Agent-directed moves: push, plain step, phase.

use gridline_foundation::{EntityId, Position};
use gridline_storage::{EffectKind, World};

use crate::effects::use_effect;

/// What a single move attempt did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The agent stepped in and shoved a pushable one tile further.
    Pushed {
        /// The entity that was pushed.
        pushed: EntityId,
        /// Where it landed.
        to: Position,
    },
    /// The agent moved on a phasing effect, ignoring any block.
    Phased {
        /// The effect that was used.
        effect: EntityId,
    },
    /// An ordinary step onto an open tile.
    Moved,
    /// Nothing moved.
    Blocked,
}

impl MoveOutcome {
    /// Returns true if the agent changed tile.
    #[must_use]
    pub fn moved(self) -> bool {
        !matches!(self, Self::Blocked)
    }
}

/// Where a push of the first pushable on `target` would send it, if open.
fn push_landing(world: &World, from: Position, target: Position) -> Option<(EntityId, Position)> {
    let pushed = *world
        .entities_with_component_at(target, &world.components().pushable)
        .first()?;
    let wraps = world.movement().wraps();
    let to = world.destination(from, target, wraps);
    if !world.in_bounds(to) || world.is_blocked(to, true) {
        return None;
    }
    Some((pushed, to))
}

/// Attempts to move `agent` onto `target`.
///
/// Tried in order: a push when a pushable stands on `target`; a phasing step
/// that ignores blocking; a plain step onto an open tile. Once a push has
/// failed or there was nothing to push, any in-bounds move made while a
/// phasing effect is active spends one use of it, blocked or not.
/// Targets off the grid, and the agent's own tile, never move anything.
///
/// Every successful attempt marks the agent's new tile on the trail and
/// clears any teleport arrival, so the agent counts as a fresh entrant.
#[must_use]
pub fn try_move(mut world: World, agent: EntityId, target: Position) -> (World, MoveOutcome) {
    let Some(from) = world.position(agent) else {
        return (world, MoveOutcome::Blocked);
    };
    if from == target || !world.in_bounds(target) {
        return (world, MoveOutcome::Blocked);
    }

    let outcome = if let Some((pushed, to)) = push_landing(&world, from, target) {
        world.set_position(pushed, to);
        world.mark_trail(to, pushed);
        tracing::trace!(agent = ?agent, pushed = ?pushed, to = ?to, "push");
        MoveOutcome::Pushed { pushed, to }
    } else if let Some(effect) = use_effect(&mut world, agent, &[EffectKind::Phasing]) {
        tracing::trace!(agent = ?agent, effect = ?effect, "phased");
        MoveOutcome::Phased { effect }
    } else if world.is_blocked(target, false) {
        MoveOutcome::Blocked
    } else {
        MoveOutcome::Moved
    };

    if outcome.moved() {
        world.set_position(agent, target);
        world.mark_trail(target, agent);
        world.ledger_mut().arrivals.remove_mut(&agent);
    }
    (world, outcome)
}
