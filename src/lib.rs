//! 40-line sprint rules engine (workspace facade crate).
//!
//! The rules live in dedicated crates under `crates/`; this package re-exports
//! them as `sprint40::{core,input,types}` and adds the pieces a host needs
//! around them: tuning loaders, the per-frame driver and headless replay.

pub use sprint40_core as core;
pub use sprint40_input as input;
pub use sprint40_types as types;

pub mod config;
pub mod driver;
pub mod replay;

pub use driver::FrameDriver;
