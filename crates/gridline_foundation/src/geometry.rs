//! Grid geometry: positions, directions, axes, and headings.
//!
//! Coordinates follow screen conventions: `x` grows to the right, `y` grows
//! downward, so [`Direction::Up`] decrements `y`.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Position
// =============================================================================

/// A tile coordinate.
///
/// Coordinates are signed so that a proposed step off the edge of the grid is
/// representable; bounds are enforced by the storage layer, not by this type.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    /// Column index (0 at the left edge).
    pub x: i32,
    /// Row index (0 at the top edge).
    pub y: i32,
}

impl Position {
    /// Creates a position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this position translated by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns the adjacent position in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    /// Manhattan distance between two positions.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The four orthogonal neighbours in [`Direction::NEIGHBOR_ORDER`].
    #[must_use]
    pub fn neighbors(self) -> [Self; 4] {
        Direction::NEIGHBOR_ORDER.map(|direction| self.step(direction))
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// =============================================================================
// Direction
// =============================================================================

/// One of the four orthogonal directions.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Towards `y - 1`.
    Up,
    /// Towards `y + 1`.
    Down,
    /// Towards `x - 1`.
    Left,
    /// Towards `x + 1`.
    Right,
}

impl Direction {
    /// Stable enumeration order for neighbour scans.
    ///
    /// Pathfinding breaks ties by the first neighbour in this order, so it is
    /// part of the determinism contract and must not change.
    pub const NEIGHBOR_ORDER: [Self; 4] = [Self::Down, Self::Up, Self::Right, Self::Left];

    /// The `(dx, dy)` unit vector for this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// The axis this direction moves along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }
}

// =============================================================================
// Axis & Heading
// =============================================================================

/// Axis of travel for autonomous movers.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    /// Along `x`.
    Horizontal,
    /// Along `y`.
    Vertical,
}

/// Sense of travel along an [`Axis`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Heading {
    /// Increasing coordinate (right or down).
    Positive,
    /// Decreasing coordinate (left or up).
    Negative,
}

impl Heading {
    /// Returns `1` or `-1`.
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Self::Positive => 1,
            Self::Negative => -1,
        }
    }

    /// The opposite heading.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }
}

impl Axis {
    /// The unit `(dx, dy)` vector for travelling along this axis with `heading`.
    #[must_use]
    pub const fn delta(self, heading: Heading) -> (i32, i32) {
        match self {
            Self::Horizontal => (heading.sign(), 0),
            Self::Vertical => (0, heading.sign()),
        }
    }
}
