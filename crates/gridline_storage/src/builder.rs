//! Typed construction of an initial world.
//!
//! [`WorldBuilder::build`] is the single gate between configuration and
//! simulation: every structural invariant the engine relies on is checked
//! here, so stepping a built world never has to fail.

use std::sync::Arc;

use gridline_foundation::{EntityId, Error, ErrorContext, GlMap, GlSet, Position, Result};

use crate::component::{
    Appearance, Components, Cost, Damage, Health, Inventory, Key, Locked, Moving, PathStrategy,
    Pathfinding, Portal, Rewardable, Speed, Status, TimeLimit, UsageLimit,
};
use crate::rules::{MovementRule, Objective, TileRewardPolicy};
use crate::world::{TurnLedger, World};

/// Builder for a [`World`].
///
/// ```
/// use std::sync::Arc;
/// # use gridline_foundation::{Action, EntityId, Position};
/// # use gridline_storage::{MovementRule, Objective, World, WorldBuilder};
/// # #[derive(Debug)] struct Stay;
/// # impl MovementRule for Stay {
/// #     fn propose(&self, w: &World, e: EntityId, _: Action) -> Vec<Position> {
/// #         w.position(e).into_iter().collect()
/// #     }
/// #     fn name(&self) -> &str { "stay" }
/// # }
/// # #[derive(Debug)] struct Never;
/// # impl Objective for Never {
/// #     fn is_met(&self, _: &World, _: EntityId) -> bool { false }
/// #     fn name(&self) -> &str { "never" }
/// # }
/// let mut builder = WorldBuilder::new(5, 5)
///     .movement(Arc::new(Stay))
///     .objective(Arc::new(Never));
/// let agent = builder.spawn().at(1, 1).agent().health(5, 5).finish();
/// let world = builder.build().unwrap();
/// assert_eq!(world.position(agent), Some(Position::new(1, 1)));
/// ```
#[derive(Debug)]
pub struct WorldBuilder {
    width: i32,
    height: i32,
    movement: Option<Arc<dyn MovementRule>>,
    objective: Option<Arc<dyn Objective>>,
    reward_policy: TileRewardPolicy,
    seed: Option<u64>,
    entities: GlSet<EntityId>,
    components: Components,
    next_id: EntityId,
}

impl WorldBuilder {
    /// Creates a builder for a `width` x `height` grid.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            movement: None,
            objective: None,
            reward_policy: TileRewardPolicy::default(),
            seed: None,
            entities: GlSet::new(),
            components: Components::new(),
            next_id: EntityId::new(1),
        }
    }

    /// Sets the movement rule.
    #[must_use]
    pub fn movement(mut self, rule: Arc<dyn MovementRule>) -> Self {
        self.movement = Some(rule);
        self
    }

    /// Sets the objective.
    #[must_use]
    pub fn objective(mut self, objective: Arc<dyn Objective>) -> Self {
        self.objective = Some(objective);
        self
    }

    /// Sets the floor reward policy.
    #[must_use]
    pub fn reward_policy(mut self, policy: TileRewardPolicy) -> Self {
        self.reward_policy = policy;
        self
    }

    /// Sets the randomness seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Allocates a new entity and returns a builder for its components.
    pub fn spawn(&mut self) -> EntityBuilder<'_> {
        let id = self.next_id;
        self.next_id = id.next();
        self.entities.insert_mut(id);
        EntityBuilder { builder: self, id }
    }

    /// Raw access to the component tables being built.
    pub fn components_mut(&mut self) -> &mut Components {
        &mut self.components
    }

    /// Pairs two portals with each other.
    pub fn link_portals(&mut self, a: EntityId, b: EntityId) -> &mut Self {
        self.components.portal.insert_mut(a, Portal { pair: b });
        self.components.portal.insert_mut(b, Portal { pair: a });
        self
    }

    /// Makes `hunter` pursue `target`.
    pub fn pursue(&mut self, hunter: EntityId, target: EntityId, strategy: PathStrategy) -> &mut Self {
        self.components.pathfinding.insert_mut(
            hunter,
            Pathfinding {
                target: Some(target),
                strategy,
            },
        );
        self
    }

    /// Puts `item` in `holder`'s inventory, creating the inventory if needed.
    pub fn give_item(&mut self, holder: EntityId, item: EntityId) -> &mut Self {
        let mut inventory = self.components.inventory.get(&holder).cloned().unwrap_or_default();
        inventory.items.insert_mut(item);
        self.components.inventory.insert_mut(holder, inventory);
        self
    }

    /// Puts `effect` in `holder`'s status, creating the status if needed.
    pub fn give_effect(&mut self, holder: EntityId, effect: EntityId) -> &mut Self {
        let mut status = self.components.status.get(&holder).cloned().unwrap_or_default();
        status.effects.insert_mut(effect);
        self.components.status.insert_mut(holder, status);
        self
    }

    /// Validates the configuration and produces the initial world.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid size or rules are unusable, if an entity
    /// is placed off the grid, if a reference points at a missing entity, or
    /// if a component value is out of range.
    pub fn build(self) -> Result<World> {
        let movement = self
            .movement
            .ok_or_else(|| Error::invalid_config("no movement rule configured"))?;
        let objective = self
            .objective
            .ok_or_else(|| Error::invalid_config("no objective configured"))?;

        if self.width <= 0 || self.height <= 0 {
            let reason = if movement.wraps() {
                format!(
                    "movement rule `{}` wraps and needs positive grid dimensions, got {}x{}",
                    movement.name(),
                    self.width,
                    self.height
                )
            } else {
                format!(
                    "grid dimensions must be positive, got {}x{}",
                    self.width, self.height
                )
            };
            return Err(Error::invalid_config(reason));
        }

        validate(&self.components, &self.entities, self.width, self.height)
            .map_err(|e| e.with_context(ErrorContext::new().with_operation("build")))?;

        tracing::debug!(
            width = self.width,
            height = self.height,
            entities = self.entities.len(),
            movement = movement.name(),
            objective = objective.name(),
            "world built"
        );

        Ok(World {
            width: self.width,
            height: self.height,
            movement,
            objective,
            reward_policy: self.reward_policy,
            entities: self.entities,
            components: Arc::new(self.components),
            prev_position: GlMap::new(),
            trail: GlMap::new(),
            ledger: TurnLedger::default(),
            turn: 0,
            score: 0,
            win: false,
            lose: false,
            message: None,
            seed: self.seed,
        })
    }
}

fn validate(c: &Components, entities: &GlSet<EntityId>, width: i32, height: i32) -> Result<()> {
    let in_bounds = |p: &Position| (0..width).contains(&p.x) && (0..height).contains(&p.y);
    let exists = |holder: EntityId, target: EntityId, relation: &'static str| {
        if entities.contains(&target) {
            Ok(())
        } else {
            Err(Error::dangling_reference(holder, target, relation))
        }
    };

    for (&e, p) in c.position.iter() {
        if !in_bounds(p) {
            return Err(Error::out_of_bounds(e, *p, width, height));
        }
    }
    for (&holder, inventory) in c.inventory.iter() {
        for &item in inventory.items.iter() {
            exists(holder, item, "inventory")?;
        }
    }
    for (&holder, status) in c.status.iter() {
        for &effect in status.effects.iter() {
            exists(holder, effect, "status")?;
        }
    }
    for (&portal, link) in c.portal.iter() {
        exists(portal, link.pair, "portal pair")?;
        if !c.position.contains_key(&link.pair) {
            return Err(Error::invalid_component(
                portal,
                "portal",
                format!("paired {} has no position", link.pair),
            ));
        }
    }
    for (&hunter, pursuit) in c.pathfinding.iter() {
        if let Some(target) = pursuit.target {
            exists(hunter, target, "pathfinding target")?;
        }
    }
    for (&e, speed) in c.speed.iter() {
        if speed.multiplier == 0 {
            return Err(Error::invalid_component(e, "speed", "multiplier must be at least 1"));
        }
    }
    for (&e, health) in c.health.iter() {
        if health.current > health.max {
            return Err(Error::invalid_component(
                e,
                "health",
                format!("current {} exceeds max {}", health.current, health.max),
            ));
        }
    }
    Ok(())
}

/// Chained component setters for one freshly spawned entity.
pub struct EntityBuilder<'a> {
    builder: &'a mut WorldBuilder,
    id: EntityId,
}

impl EntityBuilder<'_> {
    fn c(&mut self) -> &mut Components {
        &mut self.builder.components
    }

    fn mark(mut self, table: fn(&mut Components) -> &mut GlSet<EntityId>) -> Self {
        let id = self.id;
        table(self.c()).insert_mut(id);
        self
    }

    /// The id being built.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Places the entity at `(x, y)`.
    #[must_use]
    pub fn at(self, x: i32, y: i32) -> Self {
        self.position(Position::new(x, y))
    }

    /// Places the entity.
    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        let id = self.id;
        self.c().position.insert_mut(id, position);
        self
    }

    /// Stops movement onto its tile.
    #[must_use]
    pub fn blocking(self) -> Self {
        self.mark(|c| &mut c.blocking)
    }

    /// Takes part in portals and blocks non-movement checks.
    #[must_use]
    pub fn collidable(self) -> Self {
        self.mark(|c| &mut c.collidable)
    }

    /// Can be pushed.
    #[must_use]
    pub fn pushable(self) -> Self {
        self.mark(|c| &mut c.pushable)
    }

    /// Moves autonomously.
    #[must_use]
    pub fn moving(mut self, moving: Moving) -> Self {
        let id = self.id;
        self.c().moving.insert_mut(id, moving);
        self
    }

    /// Locked, opened by keys with `key_id`.
    #[must_use]
    pub fn locked(mut self, key_id: impl Into<String>) -> Self {
        let id = self.id;
        self.c().locked.insert_mut(
            id,
            Locked {
                key_id: key_id.into(),
            },
        );
        self
    }

    /// A key with `key_id`.
    #[must_use]
    pub fn key(mut self, key_id: impl Into<String>) -> Self {
        let id = self.id;
        self.c().key.insert_mut(
            id,
            Key {
                key_id: key_id.into(),
            },
        );
        self
    }

    /// Deals `amount` damage on contact.
    #[must_use]
    pub fn damage(mut self, amount: u32) -> Self {
        let id = self.id;
        self.c().damage.insert_mut(id, Damage { amount });
        self
    }

    /// Kills on contact.
    #[must_use]
    pub fn lethal(self) -> Self {
        self.mark(|c| &mut c.lethal_damage)
    }

    /// Has hit points.
    #[must_use]
    pub fn health(mut self, current: u32, max: u32) -> Self {
        let id = self.id;
        self.c().health.insert_mut(id, Health { current, max });
        self
    }

    /// Already dead.
    #[must_use]
    pub fn dead(self) -> Self {
        self.mark(|c| &mut c.dead)
    }

    /// Costs `amount` score per action while stood on.
    #[must_use]
    pub fn cost(mut self, amount: i64) -> Self {
        let id = self.id;
        self.c().cost.insert_mut(id, Cost { amount });
        self
    }

    /// Grants `amount` score.
    #[must_use]
    pub fn reward(mut self, amount: i64) -> Self {
        let id = self.id;
        self.c().rewardable.insert_mut(id, Rewardable { amount });
        self
    }

    /// Can be picked up.
    #[must_use]
    pub fn collectible(self) -> Self {
        self.mark(|c| &mut c.collectible)
    }

    /// Must be collected to win.
    #[must_use]
    pub fn required(self) -> Self {
        self.mark(|c| &mut c.required)
    }

    /// An exit tile.
    #[must_use]
    pub fn exit(self) -> Self {
        self.mark(|c| &mut c.exit)
    }

    /// An agent.
    #[must_use]
    pub fn agent(self) -> Self {
        self.mark(|c| &mut c.agent)
    }

    /// Gives the entity an empty inventory.
    #[must_use]
    pub fn inventory(mut self) -> Self {
        let id = self.id;
        if !self.c().inventory.contains_key(&id) {
            self.c().inventory.insert_mut(id, Inventory::default());
        }
        self
    }

    /// Gives the entity an empty status.
    #[must_use]
    pub fn status(mut self) -> Self {
        let id = self.id;
        if !self.c().status.contains_key(&id) {
            self.c().status.insert_mut(id, Status::default());
        }
        self
    }

    /// Sets rendering metadata.
    #[must_use]
    pub fn appearance(mut self, appearance: Appearance) -> Self {
        let id = self.id;
        self.c().appearance.insert_mut(id, appearance);
        self
    }

    /// An immunity effect.
    #[must_use]
    pub fn immunity(self) -> Self {
        self.mark(|c| &mut c.immunity)
    }

    /// A phasing effect.
    #[must_use]
    pub fn phasing(self) -> Self {
        self.mark(|c| &mut c.phasing)
    }

    /// A speed effect.
    #[must_use]
    pub fn speed(mut self, multiplier: u32) -> Self {
        let id = self.id;
        self.c().speed.insert_mut(id, Speed { multiplier });
        self
    }

    /// Expires after `turns` turns.
    #[must_use]
    pub fn time_limit(mut self, turns: i32) -> Self {
        let id = self.id;
        self.c().time_limit.insert_mut(id, TimeLimit { remaining: turns });
        self
    }

    /// Expires after `uses` uses.
    #[must_use]
    pub fn usage_limit(mut self, uses: i32) -> Self {
        let id = self.id;
        self.c().usage_limit.insert_mut(id, UsageLimit { remaining: uses });
        self
    }

    /// Finishes the entity and returns its id.
    pub fn finish(self) -> EntityId {
        self.id
    }
}
