//! Frame driver.
//!
//! Owns one engine and one input handler and advances both once per rendered
//! frame. The host measures real time and passes the delta in; the driver
//! clamps it so a stall never turns into a large catch-up jump.

use crate::core::{Engine, EventSink};
use crate::input::InputHandler;
use crate::types::{EngineState, GameAction, Tuning, MAX_FRAME_MS};

pub struct FrameDriver<S: EventSink = ()> {
    engine: Engine<S>,
    input: InputHandler,
}

impl FrameDriver<()> {
    pub fn new(seed: u32, tuning: Tuning) -> Self {
        Self::with_engine(Engine::new(seed, tuning))
    }
}

impl<S: EventSink> FrameDriver<S> {
    pub fn with_engine(engine: Engine<S>) -> Self {
        let input = InputHandler::from_tuning(engine.tuning());
        Self { engine, input }
    }

    pub fn engine(&self) -> &Engine<S> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<S> {
        &mut self.engine
    }

    pub fn input(&self) -> &InputHandler {
        &self.input
    }

    /// Player input is ignored until the countdown reaches zero.
    pub fn input_enabled(&self) -> bool {
        self.engine.state() != EngineState::Countdown
    }

    pub fn set_tuning(&mut self, tuning: Tuning) {
        self.engine.set_tuning(tuning);
        let t = *self.engine.tuning();
        self.input.set_timing(t.das_ms, t.arr_ms);
    }

    /// Key-down of a logical action. Returns true if the engine changed.
    pub fn press(&mut self, action: GameAction) -> bool {
        if !self.input_enabled() {
            return false;
        }
        match self.input.handle_press(action) {
            Some(immediate) => self.dispatch(immediate),
            None => false,
        }
    }

    /// Key-up of a logical action. Returns true if the engine changed.
    pub fn release(&mut self, action: GameAction) -> bool {
        if !self.input_enabled() {
            return false;
        }
        match self.input.handle_release(action) {
            Some(immediate) => self.dispatch(immediate),
            None => false,
        }
    }

    /// Advance input timing then the engine by `dt_ms`, clamped to
    /// [`MAX_FRAME_MS`]. Returns the delta actually applied.
    pub fn frame(&mut self, dt_ms: u32) -> u32 {
        let dt = dt_ms.min(MAX_FRAME_MS);

        if self.input_enabled() {
            for action in self.input.update(dt) {
                self.engine.apply_action(action);
            }
        } else {
            self.input.reset();
        }

        self.engine.set_soft_drop(self.input.soft_drop_held());
        self.engine.update(dt);
        dt
    }

    fn dispatch(&mut self, action: GameAction) -> bool {
        let changed = self.engine.apply_action(action);
        if action == GameAction::Restart {
            self.input.reset();
        }
        changed
    }
}
