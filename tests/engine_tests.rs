//! Engine integration tests - lifecycle, hold, events and determinism
//! through the public API only.

use sprint40::core::{Engine, EventSink};
use sprint40::types::{EngineState, GameAction, Tuning, PREVIEW_LEN};

#[derive(Debug, Clone, Default)]
struct Events {
    finishes: Vec<u64>,
    top_outs: u32,
    ticks: u32,
}

impl EventSink for Events {
    fn on_finish(&mut self, time_ms: u64) {
        self.finishes.push(time_ms);
    }
    fn on_top_out(&mut self) {
        self.top_outs += 1;
    }
    fn on_tick(&mut self) {
        self.ticks += 1;
    }
}

fn started(seed: u32) -> Engine<Events> {
    let mut engine = Engine::with_sink(seed, Tuning::default(), Events::default());
    for _ in 0..3 {
        engine.update(1000);
    }
    assert_eq!(engine.state(), EngineState::Playing);
    engine
}

#[test]
fn test_game_lifecycle() {
    let mut engine = Engine::with_sink(12345, Tuning::default(), Events::default());
    assert_eq!(engine.state(), EngineState::Countdown);
    assert_eq!(engine.countdown_left(), 3);
    assert_eq!(engine.queue().len(), PREVIEW_LEN);
    assert_eq!(engine.lines_remaining(), 40);

    engine.update(999);
    assert_eq!(engine.countdown_left(), 3);
    engine.update(1);
    assert_eq!(engine.countdown_left(), 2);
    engine.update(2000);
    assert_eq!(engine.state(), EngineState::Playing);
    assert_eq!(engine.time_ms(), 0, "countdown time is not run time");
    assert_eq!(engine.sink().ticks, 3);

    engine.update(16);
    assert_eq!(engine.time_ms(), 16);
    assert_eq!(engine.sink().ticks, 4);
}

#[test]
fn test_first_six_pieces_are_distinct() {
    let engine = Engine::new(77, Tuning::default());
    let mut seen = vec![engine.active().kind];
    seen.extend_from_slice(engine.queue());
    for (i, kind) in seen.iter().enumerate() {
        let rest = &seen[i + 1..];
        assert!(!rest.contains(kind), "duplicate {:?} in first bag", kind);
    }
}

#[test]
fn test_piece_falls_and_locks_without_input() {
    let mut engine = started(5);
    let first_kind = engine.queue()[0];

    // 21 rows of gravity plus lock delay is comfortably under 20s
    let mut frames = 0;
    while engine.board().cells().iter().all(|c| c.is_none()) {
        engine.update(50);
        frames += 1;
        assert!(frames < 400, "piece never locked");
    }
    assert_eq!(engine.active().kind, first_kind);

    let filled = engine
        .board()
        .cells()
        .iter()
        .filter(|c| c.is_some())
        .count();
    assert_eq!(filled, 4);
    assert_eq!(engine.state(), EngineState::Playing);
}

#[test]
fn test_hold_rules() {
    let mut engine = started(9);
    let first = engine.active().kind;
    let next = engine.queue()[0];

    assert!(engine.hold());
    assert_eq!(engine.hold_piece(), Some(first));
    assert_eq!(engine.active().kind, next);
    assert!(engine.hold_used());

    // Second hold before locking is a no-op
    assert!(!engine.hold());
    assert_eq!(engine.active().kind, next);

    assert!(engine.hard_drop());
    assert!(!engine.hold_used());
    let third = engine.active().kind;
    let queue_before = engine.queue().to_vec();
    assert!(engine.hold());
    // Swap takes the held kind directly, the queue is untouched
    assert_eq!(engine.active().kind, first);
    assert_eq!(engine.hold_piece(), Some(third));
    assert_eq!(engine.queue(), queue_before.as_slice());
}

#[test]
fn test_stacking_tops_out_exactly_once() {
    let mut engine = started(3);
    let mut drops = 0;
    while engine.state() == EngineState::Playing {
        assert!(engine.hard_drop());
        drops += 1;
        assert!(drops < 100, "never topped out");
    }

    assert_eq!(engine.state(), EngineState::Finished);
    assert_eq!(engine.sink().top_outs, 1);
    assert!(engine.sink().finishes.is_empty());

    let ticks = engine.sink().ticks;
    engine.update(1000);
    assert!(!engine.hard_drop());
    assert!(!engine.move_left());
    assert!(!engine.rotate_cw());
    assert_eq!(engine.sink().top_outs, 1);
    assert_eq!(engine.sink().ticks, ticks);
}

#[test]
fn test_restart_from_finished() {
    let mut engine = started(3);
    while engine.state() == EngineState::Playing {
        engine.hard_drop();
    }
    engine.hold();

    assert!(engine.apply_action(GameAction::Restart));
    assert_eq!(engine.state(), EngineState::Countdown);
    assert_eq!(engine.lines_cleared(), 0);
    assert_eq!(engine.time_ms(), 0);
    assert_eq!(engine.hold_piece(), None);
    assert!(engine.board().cells().iter().all(|c| c.is_none()));
    assert_eq!(engine.queue().len(), PREVIEW_LEN);
}

#[test]
fn test_same_seed_same_run() {
    let script = [
        GameAction::MoveLeft,
        GameAction::RotateCw,
        GameAction::HardDrop,
        GameAction::Hold,
        GameAction::Rotate180,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::HardDrop,
        GameAction::RotateCcw,
        GameAction::HardDrop,
    ];

    let mut a = started(4242);
    let mut b = started(4242);
    for action in script {
        a.apply_action(action);
        b.apply_action(action);
        a.update(33);
        b.update(33);
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_tuning_is_normalized() {
    let engine = Engine::new(
        1,
        Tuning {
            soft_drop_ms: 0,
            gravity_ms: 0,
            lines_target: 0,
            ..Tuning::default()
        },
    );
    assert_eq!(engine.tuning().soft_drop_ms, 1);
    assert_eq!(engine.tuning().gravity_ms, 1);
    assert_eq!(engine.tuning().lines_target, 1);
}

#[test]
fn test_soft_drop_falls_faster() {
    let mut slow = started(8);
    let mut fast = slow.clone();
    let spawn_y = slow.active().y;
    fast.set_soft_drop(true);

    slow.update(40);
    fast.update(40);
    assert_eq!(slow.active().y, spawn_y);
    assert_eq!(fast.active().y, fast.ghost_y());
    assert!(fast.is_resting());
    assert_eq!(fast.state(), EngineState::Playing);
}

#[test]
fn test_snapshot_matches_accessors() {
    let mut engine = started(11);
    engine.hold();
    engine.update(100);

    let snap = engine.snapshot();
    assert_eq!(snap.state, engine.state());
    assert_eq!(snap.active.kind, engine.active().kind);
    assert_eq!(snap.ghost_y, engine.ghost_y());
    assert_eq!(snap.hold, engine.hold_piece());
    assert_eq!(snap.queue.as_slice(), engine.queue());
    assert_eq!(snap.time_ms, engine.time_ms());
    assert_eq!(snap.lines_remaining, engine.lines_remaining());
    assert_eq!(snap.visible_rows().len(), 20);
}
