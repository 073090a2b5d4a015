//! Engine module - the sprint run state machine
//!
//! Ties together the board, the 7-bag, the preview queue, hold and all
//! timers. The engine is driven by explicit elapsed-time arguments; it never
//! samples a clock itself.
//!
//! Lifecycle: `Countdown` -> `Playing` -> `Finished`. Only a restart leaves
//! `Finished`, and it re-enters `Countdown`.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::pieces::{try_rotate, ActivePiece};
use crate::rng::Bag7;
use crate::snapshot::{ActiveSnapshot, RunSnapshot};
use crate::types::*;

/// Receives lifecycle notifications from the engine.
///
/// All methods default to no-ops; `()` is the null sink.
pub trait EventSink {
    /// Line target reached; `time_ms` is the run time up to the final lock.
    fn on_finish(&mut self, _time_ms: u64) {}
    /// A freshly spawned piece had no legal placement.
    fn on_top_out(&mut self) {}
    /// One `update` call completed (countdown or playing).
    fn on_tick(&mut self) {}
}

impl EventSink for () {}

/// One sprint run: board, pieces, timers and the event sink.
#[derive(Debug, Clone)]
pub struct Engine<S: EventSink = ()> {
    board: Board,
    bag: Bag7,
    tuning: Tuning,
    state: EngineState,
    lines_cleared: u32,
    time_ms: u64,
    countdown_left: u32,
    countdown_acc_ms: u32,
    active: ActivePiece,
    hold: Option<PieceKind>,
    hold_used: bool,
    queue: ArrayVec<PieceKind, PREVIEW_LEN>,
    fall_acc_ms: u32,
    lock_acc_ms: u32,
    soft_drop: bool,
    sink: S,
}

impl Engine<()> {
    /// Engine without an event sink, already initialized for a run.
    pub fn new(seed: u32, tuning: Tuning) -> Self {
        Self::with_sink(seed, tuning, ())
    }
}

impl<S: EventSink> Engine<S> {
    /// Engine reporting to `sink`, already initialized for a run.
    pub fn with_sink(seed: u32, tuning: Tuning, sink: S) -> Self {
        let mut engine = Self {
            board: Board::new(),
            bag: Bag7::new(seed),
            tuning: tuning.normalized(),
            state: EngineState::Countdown,
            lines_cleared: 0,
            time_ms: 0,
            countdown_left: 0,
            countdown_acc_ms: 0,
            active: ActivePiece::spawn(PieceKind::I),
            hold: None,
            hold_used: false,
            queue: ArrayVec::new(),
            fall_acc_ms: 0,
            lock_acc_ms: 0,
            soft_drop: false,
            sink,
        };
        engine.start_new_run();
        engine
    }

    /// Reset everything for a new run and spawn the first piece.
    ///
    /// The new bag is seeded from the previous bag's RNG state, so the first
    /// run uses the construction seed and later runs get fresh sequences.
    pub fn start_new_run(&mut self) {
        self.board.clear();
        self.bag = Bag7::new(self.bag.seed());

        self.lines_cleared = 0;
        self.time_ms = 0;

        self.state = EngineState::Countdown;
        self.countdown_left = self.tuning.countdown_seconds;
        self.countdown_acc_ms = 0;

        self.hold = None;
        self.hold_used = false;
        self.soft_drop = false;
        self.fall_acc_ms = 0;
        self.lock_acc_ms = 0;

        self.queue.clear();
        self.refill_queue();

        self.spawn(None);
    }

    // -------- accessors --------

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> ActivePiece {
        self.active
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    /// True once hold was used for the current piece
    pub fn hold_used(&self) -> bool {
        self.hold_used
    }

    /// Upcoming kinds, front first
    pub fn queue(&self) -> &[PieceKind] {
        &self.queue
    }

    pub fn time_ms(&self) -> u64 {
        self.time_ms
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn lines_remaining(&self) -> u32 {
        self.tuning.lines_target.saturating_sub(self.lines_cleared)
    }

    pub fn countdown_left(&self) -> u32 {
        self.countdown_left
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Replace the tuning; takes effect on the next update.
    pub fn set_tuning(&mut self, tuning: Tuning) {
        self.tuning = tuning.normalized();
    }

    pub fn soft_drop(&self) -> bool {
        self.soft_drop
    }

    /// Level-triggered soft drop; forwarded every frame by the driver.
    pub fn set_soft_drop(&mut self, held: bool) {
        self.soft_drop = held;
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Row the active piece would land on.
    pub fn ghost_y(&self) -> i8 {
        self.active.y + self.board.drop_distance(&self.active)
    }

    /// True if the active piece cannot move down one more row.
    pub fn is_resting(&self) -> bool {
        !self.board.can_place(&self.active.shifted(0, 1))
    }

    /// Current gravity interval (soft drop aware)
    pub fn fall_interval_ms(&self) -> u32 {
        if self.soft_drop {
            self.tuning.soft_drop_ms
        } else {
            self.tuning.gravity_ms
        }
    }

    pub fn snapshot_into(&self, out: &mut RunSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = ActiveSnapshot::from(self.active);
        out.ghost_y = self.ghost_y();
        out.hold = self.hold;
        out.hold_used = self.hold_used;
        out.queue = [PieceKind::I; PREVIEW_LEN];
        for (slot, kind) in out.queue.iter_mut().zip(self.queue.iter()) {
            *slot = *kind;
        }
        out.state = self.state;
        out.time_ms = self.time_ms;
        out.lines_cleared = self.lines_cleared;
        out.lines_remaining = self.lines_remaining();
        out.countdown_left = self.countdown_left;
    }

    pub fn snapshot(&self) -> RunSnapshot {
        let mut s = RunSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    // -------- per-frame update --------

    /// Advance timers by `elapsed_ms`.
    pub fn update(&mut self, elapsed_ms: u32) {
        match self.state {
            EngineState::Countdown => {
                self.countdown_acc_ms = self.countdown_acc_ms.saturating_add(elapsed_ms);
                while self.countdown_left > 0 && self.countdown_acc_ms >= COUNTDOWN_STEP_MS {
                    self.countdown_acc_ms -= COUNTDOWN_STEP_MS;
                    self.countdown_left -= 1;
                }
                if self.countdown_left == 0 {
                    self.state = EngineState::Playing;
                    self.countdown_acc_ms = 0;
                    self.fall_acc_ms = 0;
                    self.lock_acc_ms = 0;
                }
                self.sink.on_tick();
            }
            EngineState::Playing => {
                self.time_ms += elapsed_ms as u64;

                let fall_interval = self.fall_interval_ms();
                self.fall_acc_ms = self.fall_acc_ms.saturating_add(elapsed_ms);
                while self.fall_acc_ms >= fall_interval {
                    self.fall_acc_ms -= fall_interval;
                    if !self.try_move(0, 1) {
                        break;
                    }
                }

                if self.is_resting() {
                    self.lock_acc_ms = self.lock_acc_ms.saturating_add(elapsed_ms);
                    if self.lock_acc_ms >= self.tuning.lock_delay_ms {
                        self.lock_active();
                    }
                } else {
                    self.lock_acc_ms = 0;
                }

                self.sink.on_tick();
            }
            EngineState::Finished => {}
        }
    }

    // -------- actions --------

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Drop to the lowest legal row and lock immediately.
    pub fn hard_drop(&mut self) -> bool {
        if self.state != EngineState::Playing {
            return false;
        }
        let distance = self.board.drop_distance(&self.active);
        self.active = self.active.shifted(0, distance);
        self.lock_active();
        true
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.try_rotate(self.active.rotation.rotate_cw())
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.try_rotate(self.active.rotation.rotate_ccw())
    }

    pub fn rotate_180(&mut self) -> bool {
        self.try_rotate(self.active.rotation.rotate_180())
    }

    /// Swap with the hold slot, once per piece.
    pub fn hold(&mut self) -> bool {
        if self.state != EngineState::Playing || self.hold_used {
            return false;
        }

        let current = self.active.kind;
        match self.hold.replace(current) {
            None => self.spawn(None),
            Some(held) => self.spawn(Some(held)),
        }
        // Set after spawning: spawn clears the flag for queue-fed pieces.
        self.hold_used = true;
        true
    }

    /// Full re-initialization; allowed in any state.
    pub fn restart(&mut self) {
        self.start_new_run();
    }

    /// Dispatch a decoded action.
    ///
    /// `SoftDrop` is level-triggered and goes through [`Engine::set_soft_drop`];
    /// here it is ignored.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => false,
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::RotateCcw => self.rotate_ccw(),
            GameAction::Rotate180 => self.rotate_180(),
            GameAction::Hold => self.hold(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    // -------- internals --------

    fn refill_queue(&mut self) {
        while !self.queue.is_full() {
            self.queue.push(self.bag.next());
        }
    }

    /// Spawn the queue front, or `forced` for a hold swap.
    fn spawn(&mut self, forced: Option<PieceKind>) {
        let kind = match forced {
            Some(kind) => kind,
            None => {
                let kind = self.queue.pop_at(0).unwrap_or_else(|| self.bag.next());
                self.refill_queue();
                kind
            }
        };

        self.active = ActivePiece::spawn(kind);
        self.hold_used = false;
        self.lock_acc_ms = 0;

        if !self.board.can_place(&self.active) {
            self.state = EngineState::Finished;
            self.sink.on_top_out();
        }
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.state != EngineState::Playing {
            return false;
        }

        let candidate = self.active.shifted(dx, dy);
        if !self.board.can_place(&candidate) {
            return false;
        }
        self.active = candidate;
        self.lock_acc_ms = 0;
        true
    }

    fn try_rotate(&mut self, to: Rotation) -> bool {
        if self.state != EngineState::Playing {
            return false;
        }

        let board = &self.board;
        match try_rotate(&self.active, to, |c| board.can_place(c)) {
            Some(rotated) => {
                self.active = rotated;
                self.lock_acc_ms = 0;
                true
            }
            None => false,
        }
    }

    fn lock_active(&mut self) {
        if self.state != EngineState::Playing {
            return;
        }

        self.board.lock(&self.active);
        self.lines_cleared += self.board.clear_lines();

        if self.lines_cleared >= self.tuning.lines_target {
            self.state = EngineState::Finished;
            self.sink.on_finish(self.time_ms);
            return;
        }

        self.spawn(None);
        self.lock_acc_ms = 0;
        self.fall_acc_ms = 0;
    }
}
