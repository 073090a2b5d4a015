//! DAS/ARR input handler.
//!
//! Turns logical press/release transitions plus per-frame elapsed time into
//! discrete actions. Horizontal movement follows delayed auto-shift then
//! auto-repeat; soft drop is a level flag; everything else is edge-triggered.

use arrayvec::ArrayVec;

use crate::types::{GameAction, Tuning, BOARD_WIDTH, DEFAULT_ARR_MS, DEFAULT_DAS_MS};

/// Upper bound on actions produced by one call.
pub const MAX_ACTIONS_PER_UPDATE: usize = 32;

/// Moves emitted by one repeat-to-wall burst when ARR is zero. Crossing the
/// whole board never takes more, and the engine ignores moves into a wall.
pub const WALL_BURST_MOVES: usize = BOARD_WIDTH as usize;

pub type Actions = ArrayVec<GameAction, MAX_ACTIONS_PER_UPDATE>;

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    fn of(action: GameAction) -> Self {
        match action {
            GameAction::MoveLeft => HorizontalDirection::Left,
            GameAction::MoveRight => HorizontalDirection::Right,
            _ => HorizontalDirection::None,
        }
    }

    fn action(self) -> Option<GameAction> {
        match self {
            HorizontalDirection::Left => Some(GameAction::MoveLeft),
            HorizontalDirection::Right => Some(GameAction::MoveRight),
            HorizontalDirection::None => None,
        }
    }

    fn opposite(self) -> Self {
        match self {
            HorizontalDirection::Left => HorizontalDirection::Right,
            HorizontalDirection::Right => HorizontalDirection::Left,
            HorizontalDirection::None => HorizontalDirection::None,
        }
    }
}

/// Tracks input state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    held: [bool; GameAction::COUNT],
    horizontal: HorizontalDirection,
    das_timer_ms: u32,
    arr_timer_ms: u32,
    repeating: bool,
    das_ms: u32,
    arr_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_ms: u32, arr_ms: u32) -> Self {
        Self {
            held: [false; GameAction::COUNT],
            horizontal: HorizontalDirection::None,
            das_timer_ms: 0,
            arr_timer_ms: 0,
            repeating: false,
            das_ms,
            arr_ms,
        }
    }

    /// Handler using the DAS/ARR fields of `tuning` (normalized first).
    pub fn from_tuning(tuning: &Tuning) -> Self {
        let t = tuning.normalized();
        Self::with_config(t.das_ms, t.arr_ms)
    }

    pub fn set_timing(&mut self, das_ms: u32, arr_ms: u32) {
        self.das_ms = das_ms;
        self.arr_ms = arr_ms;
    }

    pub fn das_ms(&self) -> u32 {
        self.das_ms
    }

    pub fn arr_ms(&self) -> u32 {
        self.arr_ms
    }

    pub fn direction(&self) -> HorizontalDirection {
        self.horizontal
    }

    pub fn is_repeating(&self) -> bool {
        self.repeating
    }

    pub fn is_held(&self, action: GameAction) -> bool {
        self.held[action.index()]
    }

    /// Level of the soft-drop key, forwarded to the engine every frame.
    pub fn soft_drop_held(&self) -> bool {
        self.is_held(GameAction::SoftDrop)
    }

    /// Key-down. Returns the action to perform immediately, if any.
    ///
    /// A press of an action that is already held returns `None`, which
    /// swallows OS key repeat.
    pub fn handle_press(&mut self, action: GameAction) -> Option<GameAction> {
        if self.is_held(action) {
            return None;
        }
        self.held[action.index()] = true;

        match action {
            GameAction::MoveLeft | GameAction::MoveRight => {
                let dir = HorizontalDirection::of(action);
                if dir == self.horizontal {
                    None
                } else {
                    self.track(dir);
                    Some(action)
                }
            }
            GameAction::SoftDrop => None,
            _ => Some(action),
        }
    }

    /// Key-up. May hand horizontal tracking back to the opposite key, in
    /// which case that move is returned for immediate execution.
    pub fn handle_release(&mut self, action: GameAction) -> Option<GameAction> {
        self.held[action.index()] = false;

        match action {
            GameAction::MoveLeft | GameAction::MoveRight => {
                let opposite = HorizontalDirection::of(action).opposite();
                let opposite_held = opposite.action().is_some_and(|a| self.is_held(a));
                if opposite_held {
                    if self.horizontal != opposite {
                        self.track(opposite);
                        return opposite.action();
                    }
                } else if !self.is_held(GameAction::MoveLeft)
                    && !self.is_held(GameAction::MoveRight)
                {
                    self.track(HorizontalDirection::None);
                }
                None
            }
            _ => None,
        }
    }

    /// Advance the repeat timers and collect the repeated moves for this frame.
    pub fn update(&mut self, elapsed_ms: u32) -> Actions {
        let mut actions = Actions::new();

        // Release events can be lost (focus change); trust the held flags.
        if let Some(action) = self.horizontal.action() {
            if !self.is_held(action) {
                self.track(HorizontalDirection::None);
            }
        }

        let Some(action) = self.horizontal.action() else {
            return actions;
        };

        let prev_das = self.das_timer_ms;
        self.das_timer_ms = self.das_timer_ms.saturating_add(elapsed_ms);
        if self.das_timer_ms < self.das_ms {
            return actions;
        }

        if !self.repeating {
            self.repeating = true;
            self.arr_timer_ms = 0;
        }

        if self.arr_ms == 0 {
            for _ in 0..WALL_BURST_MOVES {
                let _ = actions.try_push(action);
            }
            return actions;
        }

        // On the frame DAS expires only the time past the threshold counts.
        let excess = if prev_das < self.das_ms {
            self.das_timer_ms - self.das_ms
        } else {
            elapsed_ms
        };
        self.arr_timer_ms = self.arr_timer_ms.saturating_add(excess);

        while self.arr_timer_ms >= self.arr_ms {
            if actions.try_push(action).is_err() {
                // Drop the backlog rather than carrying it into later frames.
                self.arr_timer_ms %= self.arr_ms;
                break;
            }
            self.arr_timer_ms -= self.arr_ms;
        }

        actions
    }

    /// Forget every held key and all repeat state.
    pub fn reset(&mut self) {
        self.held = [false; GameAction::COUNT];
        self.track(HorizontalDirection::None);
    }

    fn track(&mut self, dir: HorizontalDirection) {
        self.horizontal = dir;
        self.das_timer_ms = 0;
        self.arr_timer_ms = 0;
        self.repeating = false;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
