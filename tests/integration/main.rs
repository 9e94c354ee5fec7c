//! Cross-layer integration tests
//!
//! Whole episodes driven through the engine and observed with the debug layer.

mod time_travel;

use gridline_engine::SimConfig;
use gridline_foundation::{EntityId, Position};
use gridline_storage::{PathStrategy, World};

pub fn p(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

/// A 7x7 maze with a coin to fetch, a door, a guard, and an exit.
///
/// ```text
/// A . . # . . .
/// . . . # . . .
/// . $ . D . . .
/// . . . # . . G
/// . . . # . . .
/// k . . # . . E
/// . . . # . . .
/// ```
pub struct Maze {
    pub world: World,
    pub agent: EntityId,
    pub coin: EntityId,
    pub key: EntityId,
    pub door: EntityId,
    pub guard: EntityId,
}

pub fn maze(seed: u64) -> Maze {
    let mut b = SimConfig::maze(7, 7).with_seed(seed).builder().unwrap();
    let agent = b
        .spawn()
        .at(0, 0)
        .agent()
        .health(3, 3)
        .inventory()
        .status()
        .finish();
    for y in (0..7).filter(|&y| y != 2) {
        b.spawn().at(3, y).blocking().finish();
    }
    let door = b.spawn().at(3, 2).locked("gold").blocking().finish();
    let coin = b.spawn().at(1, 2).collectible().required().reward(10).finish();
    let key = b.spawn().at(0, 5).collectible().key("gold").finish();
    let guard = b.spawn().at(6, 3).damage(1).finish();
    b.pursue(guard, agent, PathStrategy::AStar);
    b.spawn().at(6, 5).exit().finish();
    Maze {
        world: b.build().unwrap(),
        agent,
        coin,
        key,
        door,
        guard,
    }
}
