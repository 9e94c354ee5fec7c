//! History, rewind, diff, and replay over real episodes.

use gridline_debug::{ReplayLog, ReplayRecorder, TurnHistory, WorldDiff, replay};
use gridline_engine::{advance, run};
use gridline_foundation::Action::{self, Down, Left, PickUp, Right, Wait};

use crate::{maze, p};

#[test]
fn history_tracks_every_turn() {
    let m = maze(2);
    let mut history = TurnHistory::starting_from(m.world.clone(), 10);
    let mut world = m.world.clone();
    for action in [Down, Down, Right, PickUp] {
        let next = advance(&world, action, m.agent);
        history.record(action, &world, next.clone());
        world = next;
    }

    assert_eq!(history.len(), 5);
    assert_eq!(history.turn_range(), Some((0, 4)));
    let last = history.latest().unwrap();
    assert_eq!(last.summary().action, Some(PickUp));
    assert_eq!(last.summary().score_delta, 10);
    assert_eq!(last.world(), &world);
}

#[test]
fn rewind_then_branch_off() {
    let m = maze(2);
    let mut history = TurnHistory::starting_from(m.world.clone(), 10);
    let mut world = m.world.clone();
    for action in [Down, Down, Right] {
        let next = advance(&world, action, m.agent);
        history.record(action, &world, next.clone());
        world = next;
    }

    let back = history.rewind(1).unwrap();
    assert_eq!(back.turn(), 1);
    assert_eq!(back.position(m.agent), Some(p(0, 1)));
    assert_eq!(history.turn_range(), Some((0, 1)));

    let branched = advance(&back, Right, m.agent);
    assert_eq!(branched.position(m.agent), Some(p(1, 1)));
    assert_eq!(branched.turn(), 2);
    assert_ne!(branched, world);
}

#[test]
fn diff_reports_pickup() {
    let m = maze(2);
    let before = run(&m.world, m.agent, &[Down, Down, Right]);
    let after = advance(&before, PickUp, m.agent);
    let diff = WorldDiff::between(&before, &after);

    assert_eq!(diff.turns, 1);
    assert_eq!(diff.score_delta, 10);
    assert_eq!(diff.move_of(m.coin).unwrap().to, None);
    assert!(diff.removed.is_empty());
    assert!(!diff.is_empty());
}

#[test]
fn recorded_episode_replays_exactly() {
    let m = maze(9);
    let mut recorder = ReplayRecorder::new(m.world.clone()).with_agent(m.agent);
    for action in [Down, Down, Right, PickUp, Left, Wait, Down] {
        recorder.record(action);
    }
    let expected = recorder.current().clone();
    let log = recorder.finish();

    let outcome = replay(&log);
    assert!(outcome.is_faithful());
    assert_eq!(outcome.replayed, 7);
    assert_eq!(outcome.world, expected);
}

#[test]
fn edited_log_is_caught() {
    let m = maze(9);
    let mut recorder = ReplayRecorder::new(m.world.clone());
    for action in [Down, Down, Right] {
        recorder.record(action);
    }
    let mut log = recorder.finish();
    log.actions[1] = Action::Up;

    let outcome = replay(&log);
    let divergence = outcome.divergence.unwrap();
    assert_eq!(divergence.index, 1);
    assert_eq!(outcome.replayed, 2);
}

#[test]
fn log_without_checkpoints_just_runs() {
    let m = maze(4);
    let log = ReplayLog::new(m.world.clone(), vec![Down, Down]);
    let outcome = replay(&log);

    assert!(outcome.is_faithful());
    assert_eq!(outcome.world.position(m.agent), Some(p(0, 2)));
}
