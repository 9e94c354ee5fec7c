//! Built-in objectives and the name registry.

use std::sync::Arc;

use gridline_foundation::{EntityId, Error, ErrorContext, Result};
use gridline_storage::{Objective, World};

/// Registered objective names, in registry order.
pub const OBJECTIVES: [&str; 5] = ["default", "exit", "collect", "unlock", "push"];

/// Resolves an objective by name.
///
/// # Errors
///
/// Returns [`ErrorKind::UnknownObjective`](gridline_foundation::ErrorKind::UnknownObjective)
/// for a name that is not registered.
pub fn objective(name: &str) -> Result<Arc<dyn Objective>> {
    let objective: Arc<dyn Objective> = match name {
        "default" => Arc::new(DefaultObjective),
        "exit" => Arc::new(ExitObjective),
        "collect" => Arc::new(CollectObjective),
        "unlock" => Arc::new(UnlockObjective),
        "push" => Arc::new(PushObjective),
        _ => {
            return Err(Error::unknown_objective(name).with_context(
                ErrorContext::new()
                    .with_operation("resolve objective")
                    .with_note(format!("registered: {}", OBJECTIVES.join(", "))),
            ));
        }
    };
    Ok(objective)
}

fn on_exit(world: &World, entity: EntityId) -> bool {
    world.position(entity).is_some_and(|p| {
        !world
            .entities_with_component_at(p, &world.components().exit)
            .is_empty()
    })
}

/// Every required item collected, then reach an exit.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultObjective;

impl Objective for DefaultObjective {
    fn is_met(&self, world: &World, agent: EntityId) -> bool {
        CollectObjective.is_met(world, agent) && ExitObjective.is_met(world, agent)
    }

    fn name(&self) -> &str {
        "default"
    }
}

/// Agent stands on an exit.
#[derive(Copy, Clone, Debug, Default)]
pub struct ExitObjective;

impl Objective for ExitObjective {
    fn is_met(&self, world: &World, agent: EntityId) -> bool {
        on_exit(world, agent)
    }

    fn name(&self) -> &str {
        "exit"
    }
}

/// No required entity is still waiting to be collected.
#[derive(Copy, Clone, Debug, Default)]
pub struct CollectObjective;

impl Objective for CollectObjective {
    fn is_met(&self, world: &World, _agent: EntityId) -> bool {
        let c = world.components();
        c.required.iter().all(|e| !c.collectible.contains(e))
    }

    fn name(&self) -> &str {
        "collect"
    }
}

/// Nothing is locked.
#[derive(Copy, Clone, Debug, Default)]
pub struct UnlockObjective;

impl Objective for UnlockObjective {
    fn is_met(&self, world: &World, _agent: EntityId) -> bool {
        world.components().locked.is_empty()
    }

    fn name(&self) -> &str {
        "unlock"
    }
}

/// Every pushable stands on an exit.
#[derive(Copy, Clone, Debug, Default)]
pub struct PushObjective;

impl Objective for PushObjective {
    fn is_met(&self, world: &World, _agent: EntityId) -> bool {
        world.components().pushable.iter().all(|&e| on_exit(world, e))
    }

    fn name(&self) -> &str {
        "push"
    }
}
