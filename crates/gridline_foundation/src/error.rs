//! Error types for Gridline.
//!
//! Errors only arise at configuration time: building a world, resolving a
//! rule by name, or parsing an action. Stepping a valid world never fails.

use std::fmt;

use thiserror::Error;

use crate::entity::EntityId;
use crate::geometry::Position;

/// Result alias used throughout Gridline.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Gridline operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfig(reason.into()))
    }

    /// Creates an unknown movement rule error.
    #[must_use]
    pub fn unknown_movement_rule(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownMovementRule(name.into()))
    }

    /// Creates an unknown objective error.
    #[must_use]
    pub fn unknown_objective(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownObjective(name.into()))
    }

    /// Creates an out-of-bounds placement error.
    #[must_use]
    pub fn out_of_bounds(entity: EntityId, position: Position, width: i32, height: i32) -> Self {
        Self::new(ErrorKind::OutOfBounds {
            entity,
            position,
            width,
            height,
        })
    }

    /// Creates a dangling reference error.
    #[must_use]
    pub fn dangling_reference(holder: EntityId, target: EntityId, relation: &'static str) -> Self {
        Self::new(ErrorKind::DanglingReference {
            holder,
            target,
            relation,
        })
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(id: EntityId) -> Self {
        Self::new(ErrorKind::EntityNotFound(id))
    }

    /// Creates an invalid component value error.
    #[must_use]
    pub fn invalid_component(
        entity: EntityId,
        component: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::InvalidComponent {
            entity,
            component,
            reason: reason.into(),
        })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// World or simulation configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No movement rule is registered under this name.
    #[error("unknown movement rule: {0}")]
    UnknownMovementRule(String),

    /// No objective is registered under this name.
    #[error("unknown objective: {0}")]
    UnknownObjective(String),

    /// No action has this name.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// An entity was placed outside the grid.
    #[error("{entity} placed at {position}, outside the {width}x{height} grid")]
    OutOfBounds {
        /// The misplaced entity.
        entity: EntityId,
        /// The offending position.
        position: Position,
        /// Grid width.
        width: i32,
        /// Grid height.
        height: i32,
    },

    /// An entity refers to another entity that does not exist.
    #[error("{holder} refers to missing {target} via {relation}")]
    DanglingReference {
        /// The entity holding the reference.
        holder: EntityId,
        /// The entity that is referred to.
        target: EntityId,
        /// The relation carrying the reference.
        relation: &'static str,
    },

    /// Entity was not found in the world.
    #[error("entity not found: {0:?}")]
    EntityNotFound(EntityId),

    /// A component value violates its own constraints.
    #[error("invalid {component} on {entity}: {reason}")]
    InvalidComponent {
        /// The entity carrying the component.
        entity: EntityId,
        /// The component name.
        component: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation that failed, such as `"build"` or `"resolve"`.
    pub operation: Option<String>,
    /// The entity being processed, if any.
    pub entity: Option<EntityId>,
    /// Free-form notes, outermost last.
    pub notes: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failing operation.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Sets the entity being processed.
    #[must_use]
    pub fn with_entity(mut self, entity: EntityId) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Adds a note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = &self.operation {
            write!(f, "during {operation}")?;
        }
        if let Some(entity) = self.entity {
            write!(f, " on {entity}")?;
        }
        for note in &self.notes {
            write!(f, "\n  {note}")?;
        }
        Ok(())
    }
}
