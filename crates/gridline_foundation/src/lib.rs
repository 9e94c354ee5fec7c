//! Core identifiers, grid geometry, actions, errors, and persistent collections
//! for Gridline.
//!
//! This crate provides:
//! - [`EntityId`] - Opaque entity identifiers
//! - [`Position`], [`Direction`], [`Axis`], [`Heading`] - Grid geometry
//! - [`Action`] - The closed set of agent actions
//! - [`Error`] - Configuration-time error types with context
//! - Ordered persistent collections ([`GlMap`], [`GlSet`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod action;
pub mod collections;
pub mod entity;
pub mod error;
pub mod geometry;

pub use action::Action;
pub use collections::{GlMap, GlSet};
pub use entity::EntityId;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use geometry::{Axis, Direction, Heading, Position};
