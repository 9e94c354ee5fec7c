//! Pluggable rule capabilities carried by a world.

use std::fmt;

use gridline_foundation::{Action, EntityId, Position};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::world::World;

/// Proposes where an action would take an entity.
///
/// The returned positions are only a proposal. The engine tries them in
/// order and enforces bounds and blocking itself, so a rule may freely return
/// tiles off the grid or behind walls.
pub trait MovementRule: fmt::Debug + Send + Sync {
    /// Ordered candidate positions for `entity` performing `action`.
    fn propose(&self, world: &World, entity: EntityId, action: Action) -> Vec<Position>;

    /// Registry name.
    fn name(&self) -> &str;

    /// True if the rule treats the grid as a torus. Pushes then land modulo the
    /// grid size.
    fn wraps(&self) -> bool {
        false
    }
}

/// Decides whether an agent has won.
pub trait Objective: fmt::Debug + Send + Sync {
    /// Read-only win predicate.
    fn is_met(&self, world: &World, agent: EntityId) -> bool;

    /// Registry name.
    fn name(&self) -> &str;
}

/// When a floor reward is granted to an agent standing on it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TileRewardPolicy {
    /// Every sub-step that observes the agent on the tile.
    #[default]
    PerSubStep,
    /// At most once per turn for each reward entity.
    PerTurn,
}
