//! World diff functionality.
//!
//! Compares two snapshots, usually consecutive turns, and reports what moved,
//! what appeared or vanished, and how health and the scalars changed.

use std::fmt;

use gridline_foundation::{EntityId, Position};
use gridline_storage::World;

// =============================================================================
// Diff Types
// =============================================================================

/// A change of position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    /// The entity that moved.
    pub entity: EntityId,
    /// Where it was (None if it had no position).
    pub from: Option<Position>,
    /// Where it is (None if it lost its position).
    pub to: Option<Position>,
}

/// A change of health.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HealthChange {
    /// The entity whose health changed.
    pub entity: EntityId,
    /// Health before.
    pub old: u32,
    /// Health after.
    pub new: u32,
    /// Whether the entity died in between.
    pub died: bool,
}

/// Differences between two world states.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldDiff {
    /// Entities only in the new world.
    pub added: Vec<EntityId>,
    /// Entities only in the old world.
    pub removed: Vec<EntityId>,
    /// Entities present in both whose position changed.
    pub moves: Vec<Move>,
    /// Entities present in both whose health changed.
    pub health: Vec<HealthChange>,
    /// Score difference (new minus old).
    pub score_delta: i64,
    /// Turns elapsed (new minus old).
    pub turns: u64,
    /// True if the world became won.
    pub won: bool,
    /// True if the world became lost.
    pub lost: bool,
}

impl WorldDiff {
    /// Computes the diff from `old` to `new`.
    #[must_use]
    pub fn between(old: &World, new: &World) -> Self {
        let added = new
            .entities()
            .iter()
            .copied()
            .filter(|e| !old.contains(*e))
            .collect();
        let removed = old
            .entities()
            .iter()
            .copied()
            .filter(|e| !new.contains(*e))
            .collect();

        let survivors: Vec<EntityId> = old
            .entities()
            .iter()
            .copied()
            .filter(|e| new.contains(*e))
            .collect();

        let moves = survivors
            .iter()
            .filter_map(|&entity| {
                let (from, to) = (old.position(entity), new.position(entity));
                (from != to).then_some(Move { entity, from, to })
            })
            .collect();

        let health = survivors
            .iter()
            .filter_map(|&entity| {
                let old_hp = old.components().health.get(&entity)?.current;
                let new_hp = new.components().health.get(&entity)?.current;
                let died = !old.components().dead.contains(&entity)
                    && new.components().dead.contains(&entity);
                (old_hp != new_hp || died).then_some(HealthChange {
                    entity,
                    old: old_hp,
                    new: new_hp,
                    died,
                })
            })
            .collect();

        Self {
            added,
            removed,
            moves,
            health,
            score_delta: new.score() - old.score(),
            turns: new.turn().saturating_sub(old.turn()),
            won: !old.win() && new.win(),
            lost: !old.lose() && new.lose(),
        }
    }

    /// Returns true if nothing observable changed apart from the clock.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.moves.is_empty()
            && self.health.is_empty()
            && self.score_delta == 0
            && !self.won
            && !self.lost
    }

    /// Returns the number of entities affected.
    #[must_use]
    pub fn affected_count(&self) -> usize {
        self.added.len() + self.removed.len() + self.moves.len() + self.health.len()
    }

    /// The move recorded for `entity`, if it moved.
    #[must_use]
    pub fn move_of(&self, entity: EntityId) -> Option<&Move> {
        self.moves.iter().find(|m| m.entity == entity)
    }
}

fn fmt_pos(p: Option<Position>) -> String {
    p.map_or_else(|| "-".to_string(), |p| p.to_string())
}

impl fmt::Display for WorldDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "No differences");
        }
        let mut lines = Vec::new();
        if !self.removed.is_empty() {
            lines.push(format!("--- Removed ({})", self.removed.len()));
        }
        if !self.added.is_empty() {
            lines.push(format!("+++ Added ({})", self.added.len()));
        }
        for m in &self.moves {
            lines.push(format!("  {} {} -> {}", m.entity, fmt_pos(m.from), fmt_pos(m.to)));
        }
        for h in &self.health {
            let tail = if h.died { " (died)" } else { "" };
            lines.push(format!("  {} hp {} -> {}{tail}", h.entity, h.old, h.new));
        }
        if self.score_delta != 0 {
            lines.push(format!("score {:+}", self.score_delta));
        }
        if self.won {
            lines.push("WIN".to_string());
        }
        if self.lost {
            lines.push("LOSE".to_string());
        }
        write!(f, "{}", lines.join("\n"))
    }
}

// =============================================================================
// Tests
// =============================================================================
