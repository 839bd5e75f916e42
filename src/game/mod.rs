//! Game state machine
//!
//! Command parsing and the run engine.

pub mod commands;
pub mod engine;

pub use commands::Command;
pub use engine::Game;
