//! Agent actions.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};
use crate::geometry::Direction;

/// The closed set of actions an agent can take in one turn.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Action {
    /// Move one tile up.
    Up,
    /// Move one tile down.
    Down,
    /// Move one tile left.
    Left,
    /// Move one tile right.
    Right,
    /// Unlock orthogonally adjacent locks with matching keys.
    UseKey,
    /// Collect items and effects on the current tile.
    PickUp,
    /// Let the turn pass without moving.
    Wait,
}

impl Action {
    /// The movement actions, in canonical order.
    pub const MOVES: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Every action, in canonical order.
    pub const ALL: [Self; 7] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::UseKey,
        Self::PickUp,
        Self::Wait,
    ];

    /// The direction of a movement action.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::Up => Some(Direction::Up),
            Self::Down => Some(Direction::Down),
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            Self::UseKey | Self::PickUp | Self::Wait => None,
        }
    }

    /// Returns true for the four movement actions.
    #[must_use]
    pub const fn is_move(self) -> bool {
        self.direction().is_some()
    }

    /// The lowercase name used by [`FromStr`] and [`fmt::Display`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::UseKey => "use_key",
            Self::PickUp => "pick_up",
            Self::Wait => "wait",
        }
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::Up,
            Direction::Down => Self::Down,
            Direction::Left => Self::Left,
            Direction::Right => Self::Right,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| Error::new(ErrorKind::UnknownAction(s.to_string())))
    }
}
