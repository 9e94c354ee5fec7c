//! Integration tests for spatial queries

use std::sync::Arc;

use gridline_engine::moves::{DefaultMove, WrapMove};
use gridline_engine::objective::ExitObjective;
use gridline_foundation::Position;
use gridline_storage::World;

fn p(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

#[test]
fn bounds_and_wrapping() {
    let w = World::builder(4, 3)
        .movement(Arc::new(WrapMove))
        .objective(Arc::new(ExitObjective))
        .build()
        .unwrap();
    assert!(w.in_bounds(p(3, 2)));
    assert!(!w.in_bounds(p(4, 2)));
    assert!(!w.in_bounds(p(0, -1)));
    assert_eq!(w.wrap_position(p(4, -1)), p(0, 2));
}

#[test]
fn collidable_blocks_only_on_request() {
    let mut b = World::builder(4, 4)
        .movement(Arc::new(DefaultMove))
        .objective(Arc::new(ExitObjective));
    b.spawn().at(1, 1).collidable().finish();
    b.spawn().at(2, 2).blocking().finish();
    b.spawn().at(3, 3).pushable().finish();
    let w = b.build().unwrap();

    assert!(!w.is_blocked(p(1, 1), false));
    assert!(w.is_blocked(p(1, 1), true));
    assert!(w.is_blocked(p(2, 2), false));
    assert!(w.is_blocked(p(3, 3), false));
    assert!(!w.is_blocked(p(0, 0), true));
}

#[test]
fn component_lookup_by_tile() {
    let mut b = World::builder(4, 4)
        .movement(Arc::new(DefaultMove))
        .objective(Arc::new(ExitObjective));
    let floor = b.spawn().at(1, 1).finish();
    let coin = b.spawn().at(1, 1).collectible().finish();
    let w = b.build().unwrap();

    assert_eq!(w.entities_at(p(1, 1)), vec![floor, coin]);
    assert_eq!(
        w.entities_with_component_at(p(1, 1), &w.components().collectible),
        vec![coin]
    );
    assert!(w.entities_at(p(0, 0)).is_empty());
}

#[test]
fn push_destination_continues_the_line() {
    let w = World::builder(5, 5)
        .movement(Arc::new(WrapMove))
        .objective(Arc::new(ExitObjective))
        .build()
        .unwrap();
    assert_eq!(w.destination(p(1, 1), p(2, 1), false), p(3, 1));
    assert_eq!(w.destination(p(3, 1), p(4, 1), false), p(5, 1));
    assert_eq!(w.destination(p(3, 1), p(4, 1), true), p(0, 1));
    // A step across the seam is read as one tile to the left.
    assert_eq!(w.destination(p(0, 1), p(4, 1), true), p(3, 1));
}
