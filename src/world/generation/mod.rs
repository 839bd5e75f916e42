//! Procedural dungeon generation
//!
//! Carves a maze, injects loops, then populates the rooms. Everything is
//! driven by one seeded rng so a seed reproduces the dungeon exactly.

pub mod maze;
pub mod populate;

pub use populate::Placement;

use rand::rngs::StdRng;
use thiserror::Error;

use super::grid::RoomGrid;

/// Generation parameters. The default matches the reference 4x4 dungeon.
#[derive(Debug, Clone)]
pub struct Config {
    pub width: i32,
    pub height: i32,
    /// Extra edges injected after carving; each is a chance at a cycle
    pub extra_loops: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 4,
            height: 4,
            extra_loops: 3,
        }
    }
}

/// A dungeon that cannot satisfy its own placement invariants. Surfaced as
/// a setup failure rather than handed to the player half-built.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no room can hold the boss key")]
    NoKeyRoom,
}

/// Distance-from-origin buckets used to scale flavor and danger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceBand {
    Near,
    Mid,
    Far,
}

impl DistanceBand {
    pub fn for_distance(d: u32) -> Self {
        match d {
            0..=2 => DistanceBand::Near,
            3..=4 => DistanceBand::Mid,
            _ => DistanceBand::Far,
        }
    }

    /// Chance that an eligible room spawns a monster
    pub fn spawn_chance(&self) -> f64 {
        match self {
            DistanceBand::Near => 0.35,
            DistanceBand::Mid => 0.45,
            DistanceBand::Far => 0.55,
        }
    }
}

/// Build a complete dungeon: carve, loop, populate
pub fn generate(config: &Config, rng: &mut StdRng) -> Result<(RoomGrid, Placement), GenerationError> {
    let mut grid = RoomGrid::new(config.width, config.height);
    maze::carve(&mut grid, rng);
    maze::add_loops(&mut grid, config.extra_loops, rng);
    let placement = populate::populate(&mut grid, rng)?;
    Ok((grid, placement))
}
