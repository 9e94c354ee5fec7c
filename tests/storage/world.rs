//! Integration tests for world snapshots

use std::sync::Arc;

use gridline_engine::moves::DefaultMove;
use gridline_engine::objective::ExitObjective;
use gridline_foundation::{GlSet, Position};
use gridline_storage::World;

#[test]
fn snapshots_are_independent() {
    let mut b = World::builder(4, 4)
        .movement(Arc::new(DefaultMove))
        .objective(Arc::new(ExitObjective));
    let agent = b.spawn().at(0, 0).agent().health(3, 3).finish();
    let w1 = b.build().unwrap();

    let mut w2 = w1.clone();
    w2.set_position(agent, Position::new(1, 0));
    w2.add_score(5);
    w2.components_mut().health.get_mut(&agent).unwrap().current = 1;

    assert_eq!(w1.position(agent), Some(Position::new(0, 0)));
    assert_eq!(w1.components().health.get(&agent).unwrap().current, 3);
    assert_eq!(w1.score(), 0);
    assert_ne!(w1.fingerprint(), w2.fingerprint());
}

#[test]
fn fingerprint_is_stable_for_equal_worlds() {
    let build = || {
        let mut b = World::builder(4, 4)
            .movement(Arc::new(DefaultMove))
            .objective(Arc::new(ExitObjective))
            .seed(5);
        b.spawn().at(2, 2).agent().finish();
        b.spawn().at(3, 3).exit().finish();
        b.build().unwrap()
    };
    assert_eq!(build(), build());
    assert_eq!(build().fingerprint(), build().fingerprint());
}

#[test]
fn retain_drops_rows_everywhere() {
    let mut b = World::builder(4, 4)
        .movement(Arc::new(DefaultMove))
        .objective(Arc::new(ExitObjective));
    let keep = b.spawn().at(0, 0).agent().finish();
    let gone = b.spawn().at(1, 1).blocking().reward(3).finish();
    let mut w = b.build().unwrap();
    w.begin_turn();

    let removed = w.retain_entities(&GlSet::unit(keep));
    assert_eq!(removed, 1);
    assert!(!w.contains(gone));
    assert!(!w.components().has_any(gone));
    assert!(w.previous_position(gone).is_none());
    assert!(w.contains(keep));
}

#[test]
fn terminal_flags_carry_a_message() {
    let mut w = World::builder(2, 2)
        .movement(Arc::new(DefaultMove))
        .objective(Arc::new(ExitObjective))
        .build()
        .unwrap();
    assert!(!w.is_terminal());
    w.set_lose("agent died");
    assert!(w.is_terminal());
    assert_eq!(w.message(), Some("agent died"));
}
