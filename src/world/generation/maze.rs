//! Maze carving
//!
//! Randomized depth-first carving with an explicit backtrack stack,
//! followed by loop injection for redundant routes.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::world::grid::{Coord, Direction, RoomGrid};

/// Carve a spanning-tree maze over the whole grid, starting at (0,0).
///
/// Every cell ends up reachable from the origin, with exactly one simple
/// path between any two cells until [`add_loops`] runs.
pub fn carve(grid: &mut RoomGrid, rng: &mut StdRng) {
    let width = grid.width();
    let idx = move |c: Coord| (c.y * width + c.x) as usize;
    let mut visited = vec![false; grid.room_count()];

    let origin = Coord::new(0, 0);
    visited[idx(origin)] = true;
    let mut stack = vec![origin];

    while let Some(&cur) = stack.last() {
        let mut dirs = Direction::ALL;
        dirs.shuffle(rng);

        let next = dirs.iter().find_map(|&dir| {
            let n = cur.step(dir);
            (grid.in_bounds(n) && !visited[idx(n)]).then_some(n)
        });

        match next {
            Some(n) => {
                grid.connect(cur, n);
                visited[idx(n)] = true;
                stack.push(n);
            }
            None => {
                stack.pop();
            }
        }
    }
}

/// Inject up to `count` extra edges to break the tree's single-route
/// property. Each attempt picks a random cell and connects it to the first
/// in-bounds neighbor after a shuffle; hitting an existing edge wastes the
/// attempt, so 0..=count new edges result.
pub fn add_loops(grid: &mut RoomGrid, count: usize, rng: &mut StdRng) {
    for _ in 0..count {
        let cell = Coord::new(
            rng.gen_range(0..grid.width()),
            rng.gen_range(0..grid.height()),
        );
        let mut dirs = Direction::ALL;
        dirs.shuffle(rng);
        let neighbor = dirs
            .iter()
            .map(|&dir| cell.step(dir))
            .find(|&n| grid.in_bounds(n));
        if let Some(n) = neighbor {
            grid.connect(cell, n);
        }
    }
}
