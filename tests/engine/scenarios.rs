//! End-to-end turns for each interaction system.

use gridline_engine::terminal::LOSE_MESSAGE;
use gridline_engine::{SimConfig, advance, run};
use gridline_foundation::Action;
use gridline_storage::{Appearance, AppearanceName, PathStrategy, TileRewardPolicy};

use crate::{builder, health, p};

#[test]
fn straight_move_leaves_the_input_alone() {
    let mut b = builder(5, 5);
    let agent = b.spawn().at(2, 2).agent().finish();
    let w0 = b.build().unwrap();
    let w1 = advance(&w0, Action::Up, agent);

    assert_eq!(w1.position(agent), Some(p(2, 1)));
    assert_eq!(w1.turn(), 1);
    assert_eq!(w0.position(agent), Some(p(2, 2)));
    assert_eq!(w0.turn(), 0);
}

#[test]
fn push_into_wall_moves_nothing() {
    let mut b = builder(5, 5);
    let agent = b.spawn().at(0, 2).agent().finish();
    let block = b.spawn().at(1, 2).pushable().finish();
    b.spawn().at(2, 2).blocking().finish();
    let w = advance(&b.build().unwrap(), Action::Right, agent);

    assert_eq!(w.position(agent), Some(p(0, 2)));
    assert_eq!(w.position(block), Some(p(1, 2)));
}

#[test]
fn push_with_room_moves_both() {
    let mut b = builder(5, 5);
    let agent = b.spawn().at(0, 2).agent().finish();
    let block = b.spawn().at(1, 2).pushable().finish();
    let w = advance(&b.build().unwrap(), Action::Right, agent);

    assert_eq!(w.position(agent), Some(p(1, 2)));
    assert_eq!(w.position(block), Some(p(2, 2)));
}

#[test]
fn lethal_contact_loses_the_episode() {
    let mut b = builder(5, 5);
    let agent = b.spawn().at(1, 1).agent().health(3, 3).finish();
    b.spawn().at(2, 1).lethal().finish();
    let w = advance(&b.build().unwrap(), Action::Right, agent);

    assert_eq!(health(&w, agent), 0);
    assert!(w.components().dead.contains(&agent));
    assert!(w.lose());
    assert!(!w.win());
    assert_eq!(w.message(), Some(LOSE_MESSAGE));
    assert_eq!(advance(&w, Action::Left, agent), w);
}

#[test]
fn portal_delivers_agent_onto_hazard() {
    let mut b = builder(8, 8);
    let agent = b.spawn().at(2, 1).agent().collidable().health(5, 5).finish();
    let a = b.spawn().at(2, 2).finish();
    let z = b.spawn().at(6, 6).finish();
    b.link_portals(a, z);
    b.spawn().at(6, 6).damage(1).finish();
    let w = advance(&b.build().unwrap(), Action::Down, agent);

    assert_eq!(w.position(agent), Some(p(6, 6)));
    assert_eq!(health(&w, agent), 4);
    assert!(!w.is_terminal());
}

#[test]
fn key_opens_door_and_is_spent() {
    let mut b = builder(5, 3);
    let agent = b.spawn().at(1, 1).agent().inventory().finish();
    let key = b.spawn().key("red").finish();
    b.give_item(agent, key);
    let door = b.spawn().at(2, 1).locked("red").blocking().finish();
    b.spawn().at(3, 1).exit().finish();
    let w0 = b.build().unwrap();

    let bumped = advance(&w0, Action::Right, agent);
    assert_eq!(bumped.position(agent), Some(p(1, 1)));

    let opened = advance(&bumped, Action::UseKey, agent);
    assert!(!opened.components().locked.contains_key(&door));
    assert!(!opened.components().blocking.contains(&door));
    assert!(opened.components().inventory.get(&agent).unwrap().items.is_empty());
    assert!(!opened.contains(key));

    let done = run(&opened, agent, &[Action::Right, Action::Right]);
    assert!(done.win());
    assert_eq!(done.position(agent), Some(p(3, 1)));
}

#[test]
fn wrong_key_keeps_door_shut() {
    let mut b = builder(5, 3);
    let agent = b.spawn().at(1, 1).agent().inventory().finish();
    let key = b.spawn().key("blue").finish();
    b.give_item(agent, key);
    let door = b.spawn().at(2, 1).locked("red").blocking().finish();
    let w = advance(&b.build().unwrap(), Action::UseKey, agent);

    assert!(w.components().locked.contains_key(&door));
    assert!(w.contains(key));
}

#[test]
fn pick_up_collects_required_item() {
    let mut b = builder(4, 1);
    let agent = b.spawn().at(0, 0).agent().inventory().finish();
    let gem = b.spawn().at(1, 0).collectible().required().reward(4).finish();
    b.spawn().at(3, 0).exit().finish();
    let w0 = b.build().unwrap();

    let w = run(&w0, agent, &[Action::Right, Action::PickUp]);
    assert_eq!(w.score(), 4);
    assert!(w.position(gem).is_none());
    assert!(w.components().inventory.get(&agent).unwrap().items.contains(&gem));

    let w = run(&w, agent, &[Action::Right, Action::Right]);
    assert!(w.win());
}

#[test]
fn exit_alone_does_not_win_with_items_left() {
    let mut b = builder(3, 1);
    let agent = b.spawn().at(0, 0).agent().finish();
    b.spawn().at(2, 0).collectible().required().finish();
    b.spawn().at(1, 0).exit().finish();
    let w = advance(&b.build().unwrap(), Action::Right, agent);

    assert_eq!(w.position(agent), Some(p(1, 0)));
    assert!(!w.win());
}

#[test]
fn pursuer_closes_in_and_bites() {
    let mut b = builder(5, 5);
    let agent = b.spawn().at(0, 0).agent().health(10, 10).finish();
    let hunter = b.spawn().at(4, 0).damage(1).finish();
    b.pursue(hunter, agent, PathStrategy::Greedy);
    let w0 = b.build().unwrap();

    let w1 = advance(&w0, Action::Wait, agent);
    assert_eq!(w1.position(hunter), Some(p(3, 0)));
    assert_eq!(health(&w1, agent), 10);

    let w4 = run(&w1, agent, &[Action::Wait; 3]);
    assert_eq!(w4.position(hunter), Some(p(0, 0)));
    assert_eq!(health(&w4, agent), 9);
}

#[test]
fn astar_pursuer_goes_around_walls() {
    let mut b = builder(5, 5);
    let agent = b.spawn().at(0, 2).agent().finish();
    let hunter = b.spawn().at(4, 2).finish();
    for y in 0..4 {
        b.spawn().at(2, y).blocking().finish();
    }
    b.pursue(hunter, agent, PathStrategy::AStar);
    let w = run(&b.build().unwrap(), agent, &[Action::Wait; 8]);

    assert_eq!(w.position(hunter), Some(p(0, 2)));
}

#[test]
fn blocked_second_substep_pays_floor_reward_per_policy() {
    let episode = |policy| {
        let mut b = SimConfig::default()
            .with_size(4, 1)
            .with_reward_policy(policy)
            .builder()
            .unwrap();
        let agent = b.spawn().at(0, 0).agent().status().finish();
        let boots = b.spawn().speed(2).finish();
        b.give_effect(agent, boots);
        b.spawn().at(1, 0).reward(5).finish();
        b.spawn().at(2, 0).blocking().finish();
        let w = advance(&b.build().unwrap(), Action::Right, agent);
        assert_eq!(w.position(agent), Some(p(1, 0)));
        w.score()
    };

    assert_eq!(episode(TileRewardPolicy::PerSubStep), 10);
    assert_eq!(episode(TileRewardPolicy::PerTurn), 5);
}

#[test]
fn floor_cost_is_charged_every_turn_spent_there() {
    let mut b = builder(3, 1);
    let agent = b.spawn().at(0, 0).agent().finish();
    b.spawn().at(1, 0).cost(2).finish();
    let w = run(&b.build().unwrap(), agent, &[Action::Right, Action::Wait, Action::Wait]);

    assert_eq!(w.score(), -6);
}

#[test]
fn phasing_walks_through_a_wall_once() {
    let mut b = builder(4, 1);
    let agent = b.spawn().at(0, 0).agent().status().finish();
    let ghost = b.spawn().phasing().usage_limit(1).finish();
    b.give_effect(agent, ghost);
    b.spawn().at(1, 0).blocking().finish();
    b.spawn().at(2, 0).blocking().finish();
    let w0 = b.build().unwrap();

    let w1 = advance(&w0, Action::Right, agent);
    assert_eq!(w1.position(agent), Some(p(1, 0)));
    assert!(!w1.contains(ghost));

    let w2 = advance(&w1, Action::Right, agent);
    assert_eq!(w2.position(agent), Some(p(1, 0)));
}

#[test]
fn push_takes_precedence_over_phasing() {
    let mut b = builder(4, 1);
    let agent = b.spawn().at(0, 0).agent().status().finish();
    let ghost = b.spawn().phasing().usage_limit(1).finish();
    b.give_effect(agent, ghost);
    let block = b.spawn().at(1, 0).pushable().finish();
    let w = advance(&b.build().unwrap(), Action::Right, agent);

    assert_eq!(w.position(agent), Some(p(1, 0)));
    assert_eq!(w.position(block), Some(p(2, 0)));
    assert_eq!(w.components().usage_limit.get(&ghost).unwrap().remaining, 1);
}

#[test]
fn wrapping_grid_carries_agent_across_the_edge() {
    let mut b = SimConfig::torus(4, 4).builder().unwrap();
    let agent = b.spawn().at(0, 1).agent().finish();
    let w = advance(&b.build().unwrap(), Action::Left, agent);

    assert_eq!(w.position(agent), Some(p(3, 1)));
}

#[test]
fn sokoban_is_won_by_the_box() {
    let mut b = SimConfig::sokoban(5, 1).builder().unwrap();
    let agent = b.spawn().at(0, 0).agent().finish();
    b.spawn().at(1, 0).pushable().finish();
    b.spawn().at(3, 0).exit().finish();
    let w = run(&b.build().unwrap(), agent, &[Action::Right, Action::Right]);

    assert!(w.win());
    assert_eq!(w.position(agent), Some(p(2, 0)));
}

#[test]
fn appearance_rides_along_untouched() {
    let look = Appearance {
        name: AppearanceName::Human,
        priority: 2,
        icon: false,
        background: false,
    };
    let mut b = builder(3, 3);
    let agent = b.spawn().at(0, 0).agent().appearance(look.clone()).finish();
    let w = advance(&b.build().unwrap(), Action::Down, agent);

    assert_eq!(w.components().appearance.get(&agent), Some(&look));
}
