//! Gloomkeep - a seeded maze dungeon crawler for the terminal
//!
//! A carved maze of rooms, a locked boss hall, and the one key that opens
//! it. Same seed, same dungeon, same fight.

pub mod combat;
pub mod entities;
pub mod game;
pub mod items;
pub mod score;
pub mod ui;
pub mod world;

// Re-export commonly used types
pub use game::{Command, Game};
pub use world::{Config, RoomGrid};
