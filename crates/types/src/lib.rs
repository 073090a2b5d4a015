//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used by the sprint engine, the
//! input timing model and the frame driver. Everything here is plain data with
//! no external dependencies.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 22 rows (indexed 0-21), of which rows 0-1 are hidden spawn
//!   headroom and rows 2-21 are the visible playfield
//! - **Spawn position**: (3, 0), the top-left of the 4x4 bounding box
//!
//! # Default Tuning
//!
//! | Field | Default | Range |
//! |-------|---------|-------|
//! | `gravity_ms` | 800 | 1..=60000 |
//! | `lock_delay_ms` | 500 | 0..=10000 |
//! | `countdown_seconds` | 3 | 0..=10 |
//! | `lines_target` | 40 | 1..=1000 |
//! | `soft_drop_ms` | 1 | 1..=500 |
//! | `das_ms` | 75 | 0..=500 |
//! | `arr_ms` | 0 | 0..=500 |
//!
//! # Examples
//!
//! ```
//! use sprint40_types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Rotation::North.rotate_180(), Rotation::South);
//! assert_eq!(GameAction::from_str("rotate180"), Some(GameAction::Rotate180));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 22);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Rows above the visible area used as spawn headroom
pub const HIDDEN_ROWS: u8 = 2;

/// Rows shown to the player
pub const VISIBLE_ROWS: u8 = 20;

/// Board height in cells, hidden rows included (22 rows)
pub const BOARD_HEIGHT: u8 = HIDDEN_ROWS + VISIBLE_ROWS;

/// Length of the preview queue
pub const PREVIEW_LEN: usize = 5;

/// Spawn offset of the 4x4 bounding box
pub const SPAWN_X: i8 = 3;
pub const SPAWN_Y: i8 = 0;

/// Upper bound applied to a single frame delta by the frame driver.
pub const MAX_FRAME_MS: u32 = 50;

/// Countdown granularity.
pub const COUNTDOWN_STEP_MS: u32 = 1000;

/// Normal gravity interval (one row per 800ms)
pub const DEFAULT_GRAVITY_MS: u32 = 800;

/// Gravity interval while soft drop is held
pub const DEFAULT_SOFT_DROP_MS: u32 = 1;

/// Grace period for a resting piece before it locks
pub const DEFAULT_LOCK_DELAY_MS: u32 = 500;

/// Seconds shown before play starts
pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 3;

/// Lines needed to finish a sprint
pub const DEFAULT_LINES_TARGET: u32 = 40;

/// DAS (Delayed Auto Shift) delay in milliseconds
pub const DEFAULT_DAS_MS: u32 = 75;

/// ARR (Auto Repeat Rate) in milliseconds; 0 repeats straight to the wall
pub const DEFAULT_ARR_MS: u32 = 0;

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in color-index order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use sprint40_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Color index written into the board grid (1..=7, 0 means empty)
    ///
    /// ```
    /// use sprint40_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.color_index(), 1);
    /// assert_eq!(PieceKind::L.color_index(), 7);
    /// ```
    pub fn color_index(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North**: Spawn orientation (state 0)
/// - **East**: Rotated 90° clockwise (state 1)
/// - **South**: Rotated 180° (state 2)
/// - **West**: Rotated 90° counter-clockwise (state 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use sprint40_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// ```
    /// use sprint40_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Rotate a half turn.
    pub fn rotate_180(&self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Numeric rotation state (0-3).
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build a rotation from any integer, reduced mod 4.
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Logical actions produced by the input layer.
///
/// `SoftDrop` is level-triggered (held / not held); everything else is an
/// edge-triggered command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Rotate180,
    Hold,
    Restart,
}

impl GameAction {
    pub const COUNT: usize = 9;

    /// Parse action from string (case-insensitive camelCase names)
    ///
    /// ```
    /// use sprint40_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATECW"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("pause"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "rotate180" => Some(GameAction::Rotate180),
            "hold" => Some(GameAction::Hold),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCW",
            GameAction::RotateCcw => "rotateCCW",
            GameAction::Rotate180 => "rotate180",
            GameAction::Hold => "hold",
            GameAction::Restart => "restart",
        }
    }

    /// Dense index, used for per-action held flags.
    pub fn index(&self) -> usize {
        match self {
            GameAction::MoveLeft => 0,
            GameAction::MoveRight => 1,
            GameAction::SoftDrop => 2,
            GameAction::HardDrop => 3,
            GameAction::RotateCw => 4,
            GameAction::RotateCcw => 5,
            GameAction::Rotate180 => 6,
            GameAction::Hold => 7,
            GameAction::Restart => 8,
        }
    }
}

/// Lifecycle phase of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Pre-start countdown; the first piece is visible but frozen.
    Countdown,
    Playing,
    /// Terminal: line target reached or topped out.
    Finished,
}

impl EngineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineState::Countdown => "countdown",
            EngineState::Playing => "playing",
            EngineState::Finished => "finished",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;

/// Externally supplied timing and goal configuration.
///
/// Values outside the supported ranges are clamped by [`Tuning::normalized`]
/// rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tuning {
    pub gravity_ms: u32,
    pub lock_delay_ms: u32,
    pub countdown_seconds: u32,
    pub lines_target: u32,
    pub soft_drop_ms: u32,
    pub das_ms: u32,
    pub arr_ms: u32,
}

/// Inclusive ranges accepted for each tuning field.
pub const GRAVITY_RANGE: (u32, u32) = (1, 60_000);
pub const LOCK_DELAY_RANGE: (u32, u32) = (0, 10_000);
pub const COUNTDOWN_RANGE: (u32, u32) = (0, 10);
pub const LINES_TARGET_RANGE: (u32, u32) = (1, 1_000);
pub const SOFT_DROP_RANGE: (u32, u32) = (1, 500);
pub const DAS_RANGE: (u32, u32) = (0, 500);
pub const ARR_RANGE: (u32, u32) = (0, 500);

impl Tuning {
    /// Copy of `self` with every field clamped into its supported range.
    ///
    /// ```
    /// use sprint40_types::Tuning;
    ///
    /// let t = Tuning { soft_drop_ms: 0, das_ms: 9_999, ..Tuning::default() }.normalized();
    /// assert_eq!(t.soft_drop_ms, 1);
    /// assert_eq!(t.das_ms, 500);
    /// ```
    pub fn normalized(self) -> Self {
        let clamp = |v: u32, (lo, hi): (u32, u32)| v.clamp(lo, hi);
        Self {
            gravity_ms: clamp(self.gravity_ms, GRAVITY_RANGE),
            lock_delay_ms: clamp(self.lock_delay_ms, LOCK_DELAY_RANGE),
            countdown_seconds: clamp(self.countdown_seconds, COUNTDOWN_RANGE),
            lines_target: clamp(self.lines_target, LINES_TARGET_RANGE),
            soft_drop_ms: clamp(self.soft_drop_ms, SOFT_DROP_RANGE),
            das_ms: clamp(self.das_ms, DAS_RANGE),
            arr_ms: clamp(self.arr_ms, ARR_RANGE),
        }
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity_ms: DEFAULT_GRAVITY_MS,
            lock_delay_ms: DEFAULT_LOCK_DELAY_MS,
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
            lines_target: DEFAULT_LINES_TARGET,
            soft_drop_ms: DEFAULT_SOFT_DROP_MS,
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_includes_hidden_rows() {
        assert_eq!(BOARD_HEIGHT, 22);
        assert_eq!(BOARD_HEIGHT - VISIBLE_ROWS, HIDDEN_ROWS);
    }

    #[test]
    fn rotation_is_cyclic() {
        for r in (0..4).map(Rotation::from_index) {
            assert_eq!(r.rotate_cw().rotate_ccw(), r);
            assert_eq!(r.rotate_180().rotate_180(), r);
            assert_eq!(r.rotate_cw().rotate_cw(), r.rotate_180());
            assert_eq!(Rotation::from_index(r.index()), r);
        }
    }

    #[test]
    fn action_names_round_trip() {
        for i in 0..GameAction::COUNT {
            let action = [
                GameAction::MoveLeft,
                GameAction::MoveRight,
                GameAction::SoftDrop,
                GameAction::HardDrop,
                GameAction::RotateCw,
                GameAction::RotateCcw,
                GameAction::Rotate180,
                GameAction::Hold,
                GameAction::Restart,
            ][i];
            assert_eq!(action.index(), i);
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }

    #[test]
    fn color_indices_are_distinct_and_non_zero() {
        let mut seen = [false; 8];
        for kind in PieceKind::ALL {
            let c = kind.color_index() as usize;
            assert!(c > 0);
            assert!(!seen[c]);
            seen[c] = true;
        }
    }

    #[test]
    fn default_tuning_is_already_normalized() {
        let t = Tuning::default();
        assert_eq!(t.normalized(), t);
        assert_eq!(t.gravity_ms, 800);
        assert_eq!(t.lock_delay_ms, 500);
        assert_eq!(t.lines_target, 40);
    }

    #[test]
    fn normalized_clamps_zero_gravity_and_target() {
        let t = Tuning {
            gravity_ms: 0,
            lines_target: 0,
            countdown_seconds: 99,
            ..Tuning::default()
        }
        .normalized();
        assert_eq!(t.gravity_ms, 1);
        assert_eq!(t.lines_target, 1);
        assert_eq!(t.countdown_seconds, 10);
    }
}
