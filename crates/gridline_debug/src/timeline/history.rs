//! History buffer for storing turn snapshots.
//!
//! A bounded ring buffer of worlds, keyed by turn, for stepping backwards
//! through a run.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use gridline_foundation::Action;
use gridline_storage::World;

// =============================================================================
// Turn Snapshot
// =============================================================================

/// The world as it stood after a particular turn.
#[derive(Clone, Debug)]
pub struct TurnSnapshot {
    /// The turn number.
    turn: u64,
    /// The world state (shared via Arc).
    world: Arc<World>,
    /// Summary of what the turn did.
    summary: TurnSummary,
}

impl TurnSnapshot {
    /// Creates a new turn snapshot.
    #[must_use]
    pub fn new(turn: u64, world: World, summary: TurnSummary) -> Self {
        Self {
            turn,
            world: Arc::new(world),
            summary,
        }
    }

    /// Returns the turn number.
    #[must_use]
    pub const fn turn(&self) -> u64 {
        self.turn
    }

    /// Returns a reference to the world state.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Returns a clone of the Arc-wrapped world.
    #[must_use]
    pub fn world_arc(&self) -> Arc<World> {
        Arc::clone(&self.world)
    }

    /// Returns the turn summary.
    #[must_use]
    pub fn summary(&self) -> &TurnSummary {
        &self.summary
    }
}

// =============================================================================
// Turn Summary
// =============================================================================

/// What happened during one turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnSummary {
    /// The action taken, if any (the initial snapshot has none).
    pub action: Option<Action>,
    /// Score gained (or lost) this turn.
    pub score_delta: i64,
    /// Entities that disappeared this turn.
    pub entities_removed: usize,
    /// Whether the world was won by the end of the turn.
    pub win: bool,
    /// Whether the world was lost by the end of the turn.
    pub lose: bool,
}

impl TurnSummary {
    /// Summary for an initial world, before any action.
    #[must_use]
    pub fn initial(world: &World) -> Self {
        Self {
            win: world.win(),
            lose: world.lose(),
            ..Self::default()
        }
    }

    /// Summarises the turn that took `before` to `after`.
    #[must_use]
    pub fn between(action: Action, before: &World, after: &World) -> Self {
        let removed = before
            .entities()
            .iter()
            .filter(|e| !after.contains(**e))
            .count();
        Self {
            action: Some(action),
            score_delta: after.score() - before.score(),
            entities_removed: removed,
            win: after.win(),
            lose: after.lose(),
        }
    }

    /// Returns true if the turn ended the game.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.win || self.lose
    }
}

impl fmt::Display for TurnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            Some(action) => write!(f, "{action}")?,
            None => write!(f, "start")?,
        }
        write!(f, ": score {:+}, {} removed", self.score_delta, self.entities_removed)?;
        if self.win {
            write!(f, ", WIN")?;
        }
        if self.lose {
            write!(f, ", LOSE")?;
        }
        Ok(())
    }
}

// =============================================================================
// Turn History
// =============================================================================

/// Ring buffer of turn snapshots.
#[derive(Clone, Debug)]
pub struct TurnHistory {
    /// The snapshots in chronological order.
    snapshots: VecDeque<TurnSnapshot>,
    /// Maximum number of snapshots to retain.
    capacity: usize,
}

impl TurnHistory {
    /// Creates a new history with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Creates a history seeded with an initial world.
    #[must_use]
    pub fn starting_from(world: World, capacity: usize) -> Self {
        let mut history = Self::new(capacity);
        let summary = TurnSummary::initial(&world);
        history.push(TurnSnapshot::new(world.turn(), world, summary));
        history
    }

    /// Returns the capacity of the buffer.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of snapshots held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns true if no snapshots are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Pushes a snapshot, evicting the oldest if at capacity.
    pub fn push(&mut self, snapshot: TurnSnapshot) {
        if self.capacity == 0 {
            return;
        }
        if self.snapshots.len() >= self.capacity {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    /// Records the turn that took `before` to `after`.
    pub fn record(&mut self, action: Action, before: &World, after: World) {
        let summary = TurnSummary::between(action, before, &after);
        self.push(TurnSnapshot::new(after.turn(), after, summary));
    }

    /// Gets the snapshot for a specific turn.
    #[must_use]
    pub fn get(&self, turn: u64) -> Option<&TurnSnapshot> {
        self.snapshots.iter().find(|s| s.turn == turn)
    }

    /// Gets the most recent snapshot.
    #[must_use]
    pub fn latest(&self) -> Option<&TurnSnapshot> {
        self.snapshots.back()
    }

    /// Gets the oldest snapshot still held.
    #[must_use]
    pub fn oldest(&self) -> Option<&TurnSnapshot> {
        self.snapshots.front()
    }

    /// Returns an iterator over snapshots from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &TurnSnapshot> {
        self.snapshots.iter()
    }

    /// Returns the range of turns available.
    #[must_use]
    pub fn turn_range(&self) -> Option<(u64, u64)> {
        match (self.snapshots.front(), self.snapshots.back()) {
            (Some(first), Some(last)) => Some((first.turn, last.turn)),
            _ => None,
        }
    }

    /// Gets the N most recent snapshots.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &TurnSnapshot> {
        let skip = self.snapshots.len().saturating_sub(count);
        self.snapshots.iter().skip(skip)
    }

    /// Drops every snapshot after `turn` and returns the world at `turn`.
    ///
    /// Returns `None`, leaving the history untouched, if `turn` is not held.
    pub fn rewind(&mut self, turn: u64) -> Option<World> {
        let world = self.get(turn)?.world().clone();
        while self.snapshots.back().is_some_and(|s| s.turn > turn) {
            self.snapshots.pop_back();
        }
        Some(world)
    }

    /// Clears all snapshots.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// Returns summaries of all snapshots.
    #[must_use]
    pub fn summaries(&self) -> Vec<(u64, &TurnSummary)> {
        self.snapshots
            .iter()
            .map(|s| (s.turn, &s.summary))
            .collect()
    }
}

impl Default for TurnHistory {
    fn default() -> Self {
        Self::new(100)
    }
}

// =============================================================================
// Tests
// =============================================================================
