//! Action logs and deterministic replay.
//!
//! A [`ReplayLog`] is an initial world plus the actions applied to it, with an
//! optional fingerprint of the world after every turn. Replaying the log from
//! the same world must land on the same fingerprints; the first turn where it
//! does not is reported as a [`Divergence`].

use gridline_engine::advance;
use gridline_foundation::{Action, EntityId};
use gridline_storage::World;

// =============================================================================
// Log
// =============================================================================

/// Everything needed to reproduce a run.
#[derive(Clone, Debug)]
pub struct ReplayLog {
    /// The world before the first action.
    pub initial: World,
    /// The acting agent. `None` means the lowest-id agent.
    pub agent: Option<EntityId>,
    /// Actions in the order they were applied.
    pub actions: Vec<Action>,
    /// Fingerprint after each action. May be empty, or shorter than `actions`.
    pub checkpoints: Vec<u64>,
}

impl ReplayLog {
    /// A log with no recorded fingerprints.
    #[must_use]
    pub fn new(initial: World, actions: Vec<Action>) -> Self {
        Self {
            initial,
            agent: None,
            actions,
            checkpoints: Vec::new(),
        }
    }

    /// Builder method to set the acting agent.
    #[must_use]
    pub fn with_agent(mut self, agent: EntityId) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Number of recorded actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if no actions were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    fn acting_agent(&self) -> Option<EntityId> {
        self.agent.or_else(|| self.initial.first_agent())
    }
}

// =============================================================================
// Recorder
// =============================================================================

/// Drives a world forward and logs what it did.
#[derive(Clone, Debug)]
pub struct ReplayRecorder {
    log: ReplayLog,
    current: World,
}

impl ReplayRecorder {
    /// Starts recording from `initial`, acting as its lowest-id agent.
    #[must_use]
    pub fn new(initial: World) -> Self {
        Self {
            current: initial.clone(),
            log: ReplayLog::new(initial, Vec::new()),
        }
    }

    /// Builder method to set the acting agent.
    #[must_use]
    pub fn with_agent(mut self, agent: EntityId) -> Self {
        self.log.agent = Some(agent);
        self
    }

    /// Applies `action`, records it with the resulting fingerprint, and
    /// returns the new world.
    pub fn record(&mut self, action: Action) -> &World {
        if let Some(agent) = self.log.acting_agent() {
            self.current = advance(&self.current, action, agent);
        }
        self.log.actions.push(action);
        self.log.checkpoints.push(self.current.fingerprint());
        &self.current
    }

    /// The world after the last recorded action.
    #[must_use]
    pub fn current(&self) -> &World {
        &self.current
    }

    /// Stops recording and returns the log.
    #[must_use]
    pub fn finish(self) -> ReplayLog {
        self.log
    }
}

// =============================================================================
// Replay
// =============================================================================

/// The first turn whose fingerprint did not match the log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Divergence {
    /// Index into the log's actions.
    pub index: usize,
    /// Fingerprint the log recorded.
    pub expected: u64,
    /// Fingerprint the replay produced.
    pub actual: u64,
}

/// Result of replaying a log.
#[derive(Clone, Debug)]
pub struct ReplayOutcome {
    /// The world after the last replayed action.
    pub world: World,
    /// Actions replayed (stops at the first divergence).
    pub replayed: usize,
    /// The first divergence, if any.
    pub divergence: Option<Divergence>,
}

impl ReplayOutcome {
    /// Returns true if every checkpoint matched.
    #[must_use]
    pub fn is_faithful(&self) -> bool {
        self.divergence.is_none()
    }
}

/// Replays `log` from its initial world, checking every recorded fingerprint.
#[must_use]
pub fn replay(log: &ReplayLog) -> ReplayOutcome {
    let mut world = log.initial.clone();
    let Some(agent) = log.acting_agent() else {
        return ReplayOutcome {
            world,
            replayed: log.actions.len(),
            divergence: None,
        };
    };

    for (index, &action) in log.actions.iter().enumerate() {
        world = advance(&world, action, agent);
        let Some(&expected) = log.checkpoints.get(index) else {
            continue;
        };
        let actual = world.fingerprint();
        if actual != expected {
            tracing::warn!(index, %action, expected, actual, "replay diverged");
            return ReplayOutcome {
                world,
                replayed: index + 1,
                divergence: Some(Divergence {
                    index,
                    expected,
                    actual,
                }),
            };
        }
    }

    ReplayOutcome {
        world,
        replayed: log.actions.len(),
        divergence: None,
    }
}

// =============================================================================
// Tests
// =============================================================================
