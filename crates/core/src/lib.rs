//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the sprint rules: shapes and kicks, the playfield,
//! the 7-bag randomizer and the run state machine. It has **zero
//! dependencies** on rendering, storage or input devices, making it:
//!
//! - **Deterministic**: Same seed and same frame deltas produce the same run
//! - **Testable**: Timers only advance through explicit elapsed-time arguments
//! - **Zero-allocation**: Fixed-size board and queue storage on the hot path
//!
//! # Module Structure
//!
//! - [`board`]: 10x22 grid with placement checks, locking and line clearing
//! - [`engine`]: Run state machine (countdown, gravity, lock delay, hold, events)
//! - [`pieces`]: Tetromino shape table and SRS kick resolver
//! - [`rng`]: 7-bag random piece generation
//! - [`snapshot`]: Read-only view handed to renderers
//!
//! # Rules
//!
//! - **7-Bag Randomizer** with a 5-piece preview queue
//! - **SRS Rotation** with wall kicks, plus 180° rotation with a short kick list
//! - **Lock Delay**: 500ms by default; any successful move or rotation resets it
//! - **Hold**: once per piece
//! - **Goal**: 40 cleared lines; a blocked spawn tops out
//!
//! # Example
//!
//! ```
//! use sprint40_core::Engine;
//! use sprint40_types::{EngineState, Tuning};
//!
//! let mut engine = Engine::new(12345, Tuning::default());
//! assert_eq!(engine.state(), EngineState::Countdown);
//!
//! for _ in 0..3 {
//!     engine.update(1000);
//! }
//! assert_eq!(engine.state(), EngineState::Playing);
//!
//! engine.move_right();
//! engine.rotate_cw();
//! engine.hard_drop();
//! assert_eq!(engine.queue().len(), 5);
//! ```

pub mod board;
pub mod engine;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use sprint40_types as types;

pub use board::Board;
pub use engine::{Engine, EventSink};
pub use pieces::{get_shape, kick_candidates, try_rotate, ActivePiece};
pub use rng::{Bag7, SimpleRng};
pub use snapshot::{ActiveSnapshot, RunSnapshot};
