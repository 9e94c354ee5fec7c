//! Spatial queries over a world.
//!
//! Lookups scan the position table. Grids are small and the table is ordered,
//! so every result comes back in id order.

use gridline_foundation::{EntityId, Position};

use crate::component::ComponentTable;
use crate::world::World;

impl World {
    /// Returns true if the position lies on the grid.
    #[must_use]
    pub fn in_bounds(&self, position: Position) -> bool {
        (0..self.width).contains(&position.x) && (0..self.height).contains(&position.y)
    }

    /// Maps a position onto the grid as if its edges were joined.
    #[must_use]
    pub fn wrap_position(&self, position: Position) -> Position {
        if self.width <= 0 || self.height <= 0 {
            return position;
        }
        Position::new(
            position.x.rem_euclid(self.width),
            position.y.rem_euclid(self.height),
        )
    }

    /// Entities standing on `position`, in id order.
    #[must_use]
    pub fn entities_at(&self, position: Position) -> Vec<EntityId> {
        self.components
            .position
            .iter()
            .filter(|(_, p)| **p == position)
            .map(|(e, _)| *e)
            .collect()
    }

    /// Entities standing on `position` that also have a row in `table`.
    #[must_use]
    pub fn entities_with_component_at<T>(&self, position: Position, table: &T) -> Vec<EntityId>
    where
        T: ComponentTable + ?Sized,
    {
        self.components
            .position
            .iter()
            .filter(|(e, p)| **p == position && table.contains_entity(**e))
            .map(|(e, _)| *e)
            .collect()
    }

    /// Returns true if something at `position` stops movement.
    ///
    /// Blocking and pushable entities always block. Collidable entities block
    /// only when `include_collidable` is set.
    #[must_use]
    pub fn is_blocked(&self, position: Position, include_collidable: bool) -> bool {
        let c = &self.components;
        c.position.iter().any(|(e, p)| {
            *p == position
                && (c.blocking.contains(e)
                    || c.pushable.contains(e)
                    || (include_collidable && c.collidable.contains(e)))
        })
    }

    /// Where an entity pushed from `current` towards `next` would land: one
    /// more tile along the same line.
    ///
    /// With `wrap` the result is taken modulo the grid size, and a step that
    /// crossed the seam (a delta longer than one tile) is read as the short
    /// step it really was. Without `wrap` the result may be off the grid.
    #[must_use]
    pub fn destination(&self, current: Position, next: Position, wrap: bool) -> Position {
        let mut dx = next.x - current.x;
        let mut dy = next.y - current.y;
        if wrap {
            if dx.abs() > 1 {
                dx = -dx.signum();
            }
            if dy.abs() > 1 {
                dy = -dy.signum();
            }
            self.wrap_position(next.offset(dx, dy))
        } else {
            next.offset(dx, dy)
        }
    }
}
