//! Game entities
//!
//! Plain value records for the player and monsters. Rooms own their
//! monster; the game owns the player.

pub mod monster;
pub mod player;

pub use monster::Monster;
pub use player::{Player, MAX_HEALTH};
