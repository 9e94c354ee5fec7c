//! Component kinds and the table-per-kind store.
//!
//! Every component kind gets its own table keyed by [`EntityId`]. Marker kinds
//! (an entity either is blocking or it is not) are sets; valued kinds are maps.
//! All tables are ordered persistent collections, so cloning [`Components`] is
//! cheap and iteration order is the id order.

use gridline_foundation::{Axis, EntityId, GlMap, GlSet, Heading, Position};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Valued components
// =============================================================================

/// Autonomous back-and-forth movement along one axis.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Moving {
    /// Axis of travel.
    pub axis: Axis,
    /// Current sense of travel along the axis.
    pub heading: Heading,
    /// Reverse the heading when blocked.
    pub bounce: bool,
    /// Unit steps attempted per turn.
    pub speed: u32,
}

impl Moving {
    /// A bouncing mover with speed 1.
    #[must_use]
    pub const fn new(axis: Axis, heading: Heading) -> Self {
        Self {
            axis,
            heading,
            bounce: true,
            speed: 1,
        }
    }

    /// Sets whether the mover bounces.
    #[must_use]
    pub const fn with_bounce(mut self, bounce: bool) -> Self {
        self.bounce = bounce;
        self
    }

    /// Sets the number of unit steps per turn.
    #[must_use]
    pub const fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }
}

/// How a pursuer chooses its next step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PathStrategy {
    /// Step to the open neighbour that most reduces Manhattan distance.
    Greedy,
    /// Follow the first step of a shortest path.
    #[default]
    AStar,
}

/// Pursuit of another entity, one step per turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pathfinding {
    /// The entity being pursued.
    pub target: Option<EntityId>,
    /// Step selection strategy.
    pub strategy: PathStrategy,
}

/// One end of a portal pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Portal {
    /// The other end.
    pub pair: EntityId,
}

/// A lock opened by a key with the same id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Locked {
    /// Required key id.
    pub key_id: String,
}

/// A key that opens locks with the same id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Key {
    /// Key id.
    pub key_id: String,
}

/// Non-lethal damage dealt on contact.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Damage {
    /// Health removed per contact.
    pub amount: u32,
}

/// Hit points.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Health {
    /// Current hit points, never above `max`.
    pub current: u32,
    /// Maximum hit points.
    pub max: u32,
}

impl Health {
    /// Full health.
    #[must_use]
    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }
}

/// Score subtracted once per action while the agent stands here.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cost {
    /// Amount subtracted.
    pub amount: i64,
}

/// Score granted by collecting the entity, or by standing on it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rewardable {
    /// Amount added.
    pub amount: i64,
}

/// Items carried by an entity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Inventory {
    /// Carried item entities.
    pub items: GlSet<EntityId>,
}

/// Effects active on an entity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Status {
    /// Active effect entities.
    pub effects: GlSet<EntityId>,
}

/// Built-in appearance categories.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(missing_docs)]
pub enum AppearanceName {
    #[default]
    None,
    Boots,
    Box,
    Coin,
    Core,
    Door,
    Exit,
    Floor,
    Gem,
    Ghost,
    Human,
    Key,
    Lava,
    Lock,
    Monster,
    Portal,
    Shield,
    Spike,
    Wall,
}

/// Rendering metadata. The engine carries it through untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Appearance {
    /// Appearance category.
    pub name: AppearanceName,
    /// Layering priority.
    pub priority: i32,
    /// Rendered as a corner icon.
    pub icon: bool,
    /// Candidate for the background layer.
    pub background: bool,
}

/// Multiplies the agent's sub-steps per move action.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Speed {
    /// Sub-step multiplier, at least 1.
    pub multiplier: u32,
}

/// Turns remaining before an effect expires.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeLimit {
    /// Remaining turns. Expired at zero or below.
    pub remaining: i32,
}

/// Uses remaining before an effect expires.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UsageLimit {
    /// Remaining uses. Expired at zero or below.
    pub remaining: i32,
}

/// The kinds of status effect.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EffectKind {
    /// Negates damage.
    Immunity,
    /// Passes through blocking tiles and negates damage.
    Phasing,
    /// Multiplies sub-steps.
    Speed,
}

impl EffectKind {
    /// Every effect kind.
    pub const ALL: [Self; 3] = [Self::Immunity, Self::Phasing, Self::Speed];

    /// Whether an active effect of this kind cancels an incoming hit.
    #[must_use]
    pub const fn negates_damage(self) -> bool {
        matches!(self, Self::Immunity | Self::Phasing)
    }
}

// =============================================================================
// ComponentTable
// =============================================================================

/// A table keyed by entity id, independent of what it stores.
pub trait ComponentTable {
    /// Returns true if the entity has a row in this table.
    fn contains_entity(&self, entity: EntityId) -> bool;

    /// Drops the entity's row, if any.
    fn remove_entity(&mut self, entity: EntityId);

    /// Drops every row whose entity is not in `keep`.
    fn retain_entities(&mut self, keep: &GlSet<EntityId>);

    /// Number of rows.
    fn row_count(&self) -> usize;
}

impl ComponentTable for GlSet<EntityId> {
    fn contains_entity(&self, entity: EntityId) -> bool {
        self.contains(&entity)
    }

    fn remove_entity(&mut self, entity: EntityId) {
        self.remove_mut(&entity);
    }

    fn retain_entities(&mut self, keep: &GlSet<EntityId>) {
        self.retain(|e| keep.contains(e));
    }

    fn row_count(&self) -> usize {
        self.len()
    }
}

impl<V: Clone> ComponentTable for GlMap<EntityId, V> {
    fn contains_entity(&self, entity: EntityId) -> bool {
        self.contains_key(&entity)
    }

    fn remove_entity(&mut self, entity: EntityId) {
        self.remove_mut(&entity);
    }

    fn retain_entities(&mut self, keep: &GlSet<EntityId>) {
        self.retain(|e, _| keep.contains(e));
    }

    fn row_count(&self) -> usize {
        self.len()
    }
}

// =============================================================================
// Components
// =============================================================================

/// Every component table of a world.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(missing_docs)]
pub struct Components {
    pub position: GlMap<EntityId, Position>,
    pub blocking: GlSet<EntityId>,
    pub collidable: GlSet<EntityId>,
    pub pushable: GlSet<EntityId>,
    pub moving: GlMap<EntityId, Moving>,
    pub pathfinding: GlMap<EntityId, Pathfinding>,
    pub portal: GlMap<EntityId, Portal>,
    pub locked: GlMap<EntityId, Locked>,
    pub key: GlMap<EntityId, Key>,
    pub damage: GlMap<EntityId, Damage>,
    pub lethal_damage: GlSet<EntityId>,
    pub health: GlMap<EntityId, Health>,
    pub dead: GlSet<EntityId>,
    pub cost: GlMap<EntityId, Cost>,
    pub rewardable: GlMap<EntityId, Rewardable>,
    pub collectible: GlSet<EntityId>,
    pub required: GlSet<EntityId>,
    pub exit: GlSet<EntityId>,
    pub inventory: GlMap<EntityId, Inventory>,
    pub status: GlMap<EntityId, Status>,
    pub agent: GlSet<EntityId>,
    pub appearance: GlMap<EntityId, Appearance>,
    pub immunity: GlSet<EntityId>,
    pub phasing: GlSet<EntityId>,
    pub speed: GlMap<EntityId, Speed>,
    pub time_limit: GlMap<EntityId, TimeLimit>,
    pub usage_limit: GlMap<EntityId, UsageLimit>,
}

impl Components {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn tables_mut(&mut self) -> [&mut dyn ComponentTable; 27] {
        [
            &mut self.position,
            &mut self.blocking,
            &mut self.collidable,
            &mut self.pushable,
            &mut self.moving,
            &mut self.pathfinding,
            &mut self.portal,
            &mut self.locked,
            &mut self.key,
            &mut self.damage,
            &mut self.lethal_damage,
            &mut self.health,
            &mut self.dead,
            &mut self.cost,
            &mut self.rewardable,
            &mut self.collectible,
            &mut self.required,
            &mut self.exit,
            &mut self.inventory,
            &mut self.status,
            &mut self.agent,
            &mut self.appearance,
            &mut self.immunity,
            &mut self.phasing,
            &mut self.speed,
            &mut self.time_limit,
            &mut self.usage_limit,
        ]
    }

    fn tables(&self) -> [&dyn ComponentTable; 27] {
        [
            &self.position,
            &self.blocking,
            &self.collidable,
            &self.pushable,
            &self.moving,
            &self.pathfinding,
            &self.portal,
            &self.locked,
            &self.key,
            &self.damage,
            &self.lethal_damage,
            &self.health,
            &self.dead,
            &self.cost,
            &self.rewardable,
            &self.collectible,
            &self.required,
            &self.exit,
            &self.inventory,
            &self.status,
            &self.agent,
            &self.appearance,
            &self.immunity,
            &self.phasing,
            &self.speed,
            &self.time_limit,
            &self.usage_limit,
        ]
    }

    /// Drops every row belonging to the entity.
    pub fn remove_entity(&mut self, entity: EntityId) {
        for table in self.tables_mut() {
            table.remove_entity(entity);
        }
    }

    /// Drops every row whose entity is not in `keep`.
    pub fn retain(&mut self, keep: &GlSet<EntityId>) {
        for table in self.tables_mut() {
            table.retain_entities(keep);
        }
    }

    /// Returns true if any table has a row for the entity.
    #[must_use]
    pub fn has_any(&self, entity: EntityId) -> bool {
        self.tables().iter().any(|t| t.contains_entity(entity))
    }

    /// Total rows across all tables.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.tables().iter().map(|t| t.row_count()).sum()
    }

    /// Returns true if the entity carries the given effect component.
    #[must_use]
    pub fn has_effect(&self, kind: EffectKind, entity: EntityId) -> bool {
        match kind {
            EffectKind::Immunity => self.immunity.contains(&entity),
            EffectKind::Phasing => self.phasing.contains(&entity),
            EffectKind::Speed => self.speed.contains_key(&entity),
        }
    }

    /// Returns true if the entity carries any effect component.
    #[must_use]
    pub fn is_effect(&self, entity: EntityId) -> bool {
        EffectKind::ALL.iter().any(|&k| self.has_effect(k, entity))
    }

    /// Returns true if the effect's time and usage limits, where present, are
    /// both positive.
    #[must_use]
    pub fn is_effect_valid(&self, effect: EntityId) -> bool {
        self.time_limit.get(&effect).is_none_or(|t| t.remaining > 0)
            && self.usage_limit.get(&effect).is_none_or(|u| u.remaining > 0)
    }
}
