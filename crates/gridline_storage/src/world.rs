//! World state with immutable snapshots.
//!
//! A `World` is one turn's complete state. Clone is cheap: every table is a
//! persistent collection and the component store sits behind an `Arc`, so a
//! system that takes a `World` by value and edits it leaves earlier snapshots
//! untouched.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use gridline_foundation::{EntityId, GlMap, GlSet, Position};

use crate::builder::WorldBuilder;
use crate::component::Components;
use crate::rules::{MovementRule, Objective, TileRewardPolicy};

/// Bookkeeping that lives for exactly one turn.
///
/// Reset when a turn begins. It lets interaction passes run several times per
/// turn without applying the same effect twice.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TurnLedger {
    /// `(victim, damager)` contacts already resolved this turn.
    pub damage_hits: GlSet<(EntityId, EntityId)>,
    /// Tile each teleported entity arrived on this turn.
    pub arrivals: GlMap<EntityId, Position>,
    /// Floor rewards already granted this turn under [`TileRewardPolicy::PerTurn`].
    pub rewarded: GlSet<EntityId>,
}

impl TurnLedger {
    /// Returns true if the arrival ledger places `entity` on `tile`.
    #[must_use]
    pub fn arrived_at(&self, entity: EntityId, tile: Position) -> bool {
        self.arrivals.get(&entity) == Some(&tile)
    }
}

/// Immutable snapshot of simulation state.
///
/// Clone is O(1) due to structural sharing.
#[derive(Clone)]
pub struct World {
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) movement: Arc<dyn MovementRule>,
    pub(crate) objective: Arc<dyn Objective>,
    pub(crate) reward_policy: TileRewardPolicy,
    pub(crate) entities: GlSet<EntityId>,
    pub(crate) components: Arc<Components>,
    pub(crate) prev_position: GlMap<EntityId, Position>,
    pub(crate) trail: GlMap<Position, GlSet<EntityId>>,
    pub(crate) ledger: TurnLedger,
    pub(crate) turn: u64,
    pub(crate) score: i64,
    pub(crate) win: bool,
    pub(crate) lose: bool,
    pub(crate) message: Option<String>,
    pub(crate) seed: Option<u64>,
}

impl World {
    /// Starts building a world with the given grid size.
    #[must_use]
    pub fn builder(width: i32, height: i32) -> WorldBuilder {
        WorldBuilder::new(width, height)
    }

    // --- Grid & configuration ---

    /// Grid width in tiles.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in tiles.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The configured movement rule.
    #[must_use]
    pub fn movement(&self) -> &dyn MovementRule {
        self.movement.as_ref()
    }

    /// The configured objective.
    #[must_use]
    pub fn objective(&self) -> &dyn Objective {
        self.objective.as_ref()
    }

    /// When floor rewards are granted.
    #[must_use]
    pub fn reward_policy(&self) -> TileRewardPolicy {
        self.reward_policy
    }

    /// Seed for per-turn randomness, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    // --- Entities & components ---

    /// Every live entity.
    #[must_use]
    pub fn entities(&self) -> &GlSet<EntityId> {
        &self.entities
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the entity is live.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.entities.contains(&entity)
    }

    /// The component tables.
    #[must_use]
    pub fn components(&self) -> &Components {
        &self.components
    }

    /// Mutable access to the component tables, copying them if shared.
    pub fn components_mut(&mut self) -> &mut Components {
        Arc::make_mut(&mut self.components)
    }

    /// Current position of an entity.
    #[must_use]
    pub fn position(&self, entity: EntityId) -> Option<Position> {
        self.components.position.get(&entity).copied()
    }

    /// Moves an entity.
    pub fn set_position(&mut self, entity: EntityId, position: Position) {
        self.components_mut().position.insert_mut(entity, position);
    }

    /// The lowest-id agent, if any.
    #[must_use]
    pub fn first_agent(&self) -> Option<EntityId> {
        self.components.agent.first().copied()
    }

    /// Deletes an entity and all of its rows.
    pub fn remove_entity(&mut self, entity: EntityId) {
        self.entities.remove_mut(&entity);
        self.prev_position.remove_mut(&entity);
        self.components_mut().remove_entity(entity);
    }

    /// Deletes every entity not in `keep`. Returns how many were removed.
    pub fn retain_entities(&mut self, keep: &GlSet<EntityId>) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| keep.contains(e));
        self.prev_position.retain(|e, _| keep.contains(e));
        if self.components.row_count() > 0 {
            self.components_mut().retain(keep);
        }
        before - self.entities.len()
    }

    // --- Per-turn bookkeeping ---

    /// Positions as of the start of the current turn.
    #[must_use]
    pub fn prev_position(&self) -> &GlMap<EntityId, Position> {
        &self.prev_position
    }

    /// Position of an entity at the start of the current turn.
    #[must_use]
    pub fn previous_position(&self, entity: EntityId) -> Option<Position> {
        self.prev_position.get(&entity).copied()
    }

    /// Tiles traversed this turn, and by whom.
    #[must_use]
    pub fn trail(&self) -> &GlMap<Position, GlSet<EntityId>> {
        &self.trail
    }

    /// Records that `entity` passed over `tile` this turn.
    pub fn mark_trail(&mut self, tile: Position, entity: EntityId) {
        let visitors = self.trail.get(&tile).cloned().unwrap_or_default();
        self.trail.insert_mut(tile, visitors.insert(entity));
    }

    /// This turn's ledger.
    #[must_use]
    pub fn ledger(&self) -> &TurnLedger {
        &self.ledger
    }

    /// Mutable access to this turn's ledger.
    pub fn ledger_mut(&mut self) -> &mut TurnLedger {
        &mut self.ledger
    }

    /// Opens a new turn: snapshots positions and clears the trail and ledger.
    pub fn begin_turn(&mut self) {
        self.prev_position = self.components.position.clone();
        self.trail = GlMap::new();
        self.ledger = TurnLedger::default();
    }

    // --- Scalars ---

    /// Turns completed so far.
    #[must_use]
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Advances the turn counter.
    pub fn increment_turn(&mut self) {
        self.turn = self.turn.saturating_add(1);
    }

    /// Accumulated score.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Adds `delta` (possibly negative) to the score.
    pub fn add_score(&mut self, delta: i64) {
        self.score = self.score.saturating_add(delta);
    }

    /// True once the objective has been met.
    #[must_use]
    pub fn win(&self) -> bool {
        self.win
    }

    /// True once the agent has died.
    #[must_use]
    pub fn lose(&self) -> bool {
        self.lose
    }

    /// True if the simulation has ended.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.win || self.lose
    }

    /// Message recorded on the last terminal transition.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Marks the world won.
    pub fn set_win(&mut self, message: impl Into<String>) {
        self.win = true;
        self.message = Some(message.into());
    }

    /// Marks the world lost.
    pub fn set_lose(&mut self, message: impl Into<String>) {
        self.lose = true;
        self.message = Some(message.into());
    }

    /// Stable digest of the whole snapshot.
    ///
    /// Rules contribute their names only. Two worlds with equal fingerprints
    /// are, for replay purposes, the same state.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl Hash for World {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width.hash(state);
        self.height.hash(state);
        self.movement.name().hash(state);
        self.objective.name().hash(state);
        self.reward_policy.hash(state);
        self.entities.hash(state);
        self.components.hash(state);
        self.prev_position.hash(state);
        self.trail.hash(state);
        self.ledger.hash(state);
        self.turn.hash(state);
        self.score.hash(state);
        self.win.hash(state);
        self.lose.hash(state);
        self.message.hash(state);
        self.seed.hash(state);
    }
}

impl PartialEq for World {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.movement.name() == other.movement.name()
            && self.objective.name() == other.objective.name()
            && self.reward_policy == other.reward_policy
            && self.turn == other.turn
            && self.score == other.score
            && self.win == other.win
            && self.lose == other.lose
            && self.message == other.message
            && self.seed == other.seed
            && self.entities == other.entities
            && (Arc::ptr_eq(&self.components, &other.components)
                || self.components == other.components)
            && self.prev_position == other.prev_position
            && self.trail == other.trail
            && self.ledger == other.ledger
    }
}

impl Eq for World {}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("movement", &self.movement.name())
            .field("objective", &self.objective.name())
            .field("turn", &self.turn)
            .field("score", &self.score)
            .field("win", &self.win)
            .field("lose", &self.lose)
            .field("message", &self.message)
            .field("entities", &self.entities.len())
            .finish_non_exhaustive()
    }
}
