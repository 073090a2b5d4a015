//! Input timing model (engine-facing).
//!
//! This crate knows nothing about keyboards or windowing. It consumes logical
//! press/release transitions of [`crate::types::GameAction`] plus per-frame
//! elapsed time and produces the discrete actions to apply to the engine,
//! following delayed auto-shift (DAS) and auto-repeat rate (ARR).

pub mod handler;

pub use sprint40_types as types;

pub use handler::{
    Actions, HorizontalDirection, InputHandler, MAX_ACTIONS_PER_UPDATE, WALL_BURST_MOVES,
};
