//! Status effect lifetimes across whole turns.

use gridline_engine::{advance, run};
use gridline_foundation::Action;

use crate::{builder, health, p};

#[test]
fn single_use_immunity_absorbs_one_hit_then_expires() {
    let mut b = builder(4, 1);
    let agent = b.spawn().at(0, 0).agent().health(3, 3).status().finish();
    let shield = b.spawn().immunity().usage_limit(1).finish();
    b.give_effect(agent, shield);
    b.spawn().at(1, 0).damage(1).finish();
    let w0 = b.build().unwrap();

    let w1 = advance(&w0, Action::Right, agent);
    assert_eq!(w1.position(agent), Some(p(1, 0)));
    assert_eq!(health(&w1, agent), 3);
    assert!(!w1.contains(shield));
    assert!(w1.components().status.get(&agent).unwrap().effects.is_empty());

    let w2 = advance(&w1, Action::Wait, agent);
    assert_eq!(health(&w2, agent), 2);
}

#[test]
fn one_turn_effect_expires_after_one_tick() {
    let mut b = builder(3, 3);
    let agent = b.spawn().at(1, 1).agent().status().finish();
    let blink = b.spawn().immunity().time_limit(1).finish();
    let lasting = b.spawn().immunity().time_limit(2).finish();
    b.give_effect(agent, blink).give_effect(agent, lasting);
    let w = advance(&b.build().unwrap(), Action::Wait, agent);

    assert!(!w.contains(blink));
    assert!(w.contains(lasting));
    assert_eq!(w.components().time_limit.get(&lasting).unwrap().remaining, 1);

    let w = advance(&w, Action::Wait, agent);
    assert!(!w.contains(lasting));
}

#[test]
fn unlimited_effect_is_used_before_limited_one() {
    let mut b = builder(3, 1);
    let agent = b.spawn().at(0, 0).agent().health(5, 5).status().finish();
    let charm = b.spawn().immunity().usage_limit(1).finish();
    let amulet = b.spawn().immunity().finish();
    b.give_effect(agent, charm).give_effect(agent, amulet);
    b.spawn().at(1, 0).damage(2).finish();
    let w = run(&b.build().unwrap(), agent, &[Action::Right, Action::Wait]);

    assert_eq!(health(&w, agent), 5);
    assert_eq!(w.components().usage_limit.get(&charm).unwrap().remaining, 1);
}

#[test]
fn picked_up_power_up_joins_status() {
    let mut b = builder(3, 1);
    let agent = b.spawn().at(0, 0).agent().status().finish();
    let boots = b.spawn().at(1, 0).collectible().speed(2).usage_limit(1).finish();
    let w = run(&b.build().unwrap(), agent, &[Action::Right, Action::PickUp]);

    assert!(w.components().status.get(&agent).unwrap().effects.contains(&boots));
    assert!(w.position(boots).is_none());

    let w = advance(&w, Action::Left, agent);
    assert_eq!(w.position(agent), Some(p(0, 0)));
    assert!(!w.contains(boots));
}

#[test]
fn single_use_phasing_is_spent_on_an_open_step() {
    let mut b = builder(5, 5);
    let agent = b.spawn().at(1, 1).agent().status().finish();
    let ghost = b.spawn().phasing().usage_limit(1).finish();
    b.give_effect(agent, ghost);
    let w = advance(&b.build().unwrap(), Action::Right, agent);

    assert_eq!(w.position(agent), Some(p(2, 1)));
    assert!(!w.contains(ghost));
    assert!(w.components().status.get(&agent).unwrap().effects.is_empty());
}
