//! The dungeon world
//!
//! Room grid, pathfinding, and procedural generation.

pub mod generation;
pub mod grid;
pub mod pathfind;

pub use generation::{Config, DistanceBand, GenerationError};
pub use grid::{Coord, Direction, Npc, Room, RoomGrid};
pub use pathfind::{distance_map, shortest_path, DistanceMap};
