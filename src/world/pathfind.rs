//! Distance maps and shortest paths
//!
//! Breadth-first search over the room graph. Traversal follows exit edges
//! only: two geometrically adjacent rooms without a carved exit between
//! them are not neighbors.

use std::collections::VecDeque;

use super::grid::{Coord, Direction, RoomGrid};

/// BFS distances from a single origin. `None` marks an unreached cell,
/// which keeps distance 0 (the origin itself) unambiguous.
#[derive(Debug, Clone)]
pub struct DistanceMap {
    width: i32,
    dist: Vec<Option<u32>>,
}

impl DistanceMap {
    pub fn get(&self, c: Coord) -> Option<u32> {
        self.dist.get((c.y * self.width + c.x) as usize).copied().flatten()
    }

    /// The farthest reached cell. Ties go to the first cell in row-major
    /// scan order.
    pub fn farthest(&self) -> Coord {
        let mut best = Coord::new(0, 0);
        let mut best_dist = 0;
        for (idx, d) in self.dist.iter().enumerate() {
            if let Some(d) = d {
                if *d > best_dist {
                    best_dist = *d;
                    best = Coord::new(idx as i32 % self.width, idx as i32 / self.width);
                }
            }
        }
        best
    }
}

/// Compute BFS distances from `origin` over the grid's exit edges
pub fn distance_map(grid: &RoomGrid, origin: Coord) -> DistanceMap {
    let mut dist = vec![None; grid.room_count()];
    let idx = |c: Coord| (c.y * grid.width() + c.x) as usize;

    dist[idx(origin)] = Some(0);
    let mut queue = VecDeque::from([origin]);
    while let Some(cur) = queue.pop_front() {
        let here = dist[idx(cur)].unwrap_or(0);
        for dir in Direction::ALL {
            if let Some(next) = grid.room(cur).exit(dir) {
                if dist[idx(next)].is_none() {
                    dist[idx(next)] = Some(here + 1);
                    queue.push_back(next);
                }
            }
        }
    }

    DistanceMap {
        width: grid.width(),
        dist,
    }
}

/// Shortest path from `origin` to `target`, inclusive of both ends.
/// Empty when the target is unreachable. Among equal-length routes the
/// result is fixed by the canonical direction order.
pub fn shortest_path(grid: &RoomGrid, origin: Coord, target: Coord) -> Vec<Coord> {
    let idx = |c: Coord| (c.y * grid.width() + c.x) as usize;
    let mut prev: Vec<Option<Coord>> = vec![None; grid.room_count()];
    let mut seen = vec![false; grid.room_count()];

    seen[idx(origin)] = true;
    let mut queue = VecDeque::from([origin]);
    while let Some(cur) = queue.pop_front() {
        if cur == target {
            break;
        }
        for dir in Direction::ALL {
            if let Some(next) = grid.room(cur).exit(dir) {
                if !seen[idx(next)] {
                    seen[idx(next)] = true;
                    prev[idx(next)] = Some(cur);
                    queue.push_back(next);
                }
            }
        }
    }

    if !seen[idx(target)] {
        return Vec::new();
    }

    let mut path = vec![target];
    let mut cur = target;
    while let Some(p) = prev[idx(cur)] {
        path.push(p);
        cur = p;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 3x3 grid carved into a single serpentine corridor:
    /// (0,0)-(1,0)-(2,0)-(2,1)-(1,1)-(0,1)-(0,2)-(1,2)-(2,2)
    fn serpentine() -> RoomGrid {
        let mut grid = RoomGrid::new(3, 3);
        let path = [
            (0, 0),
            (1, 0),
            (2, 0),
            (2, 1),
            (1, 1),
            (0, 1),
            (0, 2),
            (1, 2),
            (2, 2),
        ];
        for pair in path.windows(2) {
            grid.connect(
                Coord::new(pair[0].0, pair[0].1),
                Coord::new(pair[1].0, pair[1].1),
            );
        }
        grid
    }

    #[test]
    fn origin_distance_is_zero() {
        let grid = serpentine();
        let dist = distance_map(&grid, Coord::new(0, 0));
        assert_eq!(dist.get(Coord::new(0, 0)), Some(0));
        assert_eq!(dist.get(Coord::new(2, 2)), Some(8));
    }

    #[test]
    fn missing_exits_block_traversal() {
        // (0,1) is geometrically adjacent to (0,0) but only reachable the
        // long way around the serpentine.
        let grid = serpentine();
        let dist = distance_map(&grid, Coord::new(0, 0));
        assert_eq!(dist.get(Coord::new(0, 1)), Some(5));
    }

    #[test]
    fn unreached_cells_are_distinct_from_origin() {
        let mut grid = RoomGrid::new(3, 3);
        grid.connect(Coord::new(0, 0), Coord::new(1, 0));
        let dist = distance_map(&grid, Coord::new(0, 0));
        assert_eq!(dist.get(Coord::new(0, 0)), Some(0));
        assert_eq!(dist.get(Coord::new(1, 0)), Some(1));
        assert_eq!(dist.get(Coord::new(2, 2)), None);
    }

    #[test]
    fn path_length_matches_distance() {
        let grid = serpentine();
        let origin = Coord::new(0, 0);
        let dist = distance_map(&grid, origin);
        for target in grid.coords() {
            let path = shortest_path(&grid, origin, target);
            let expected = dist.get(target).map(|d| d as usize + 1).unwrap_or(0);
            assert_eq!(path.len(), expected, "target {:?}", target);
        }
    }

    #[test]
    fn path_endpoints_are_inclusive() {
        let grid = serpentine();
        let path = shortest_path(&grid, Coord::new(0, 0), Coord::new(2, 2));
        assert_eq!(path.first(), Some(&Coord::new(0, 0)));
        assert_eq!(path.last(), Some(&Coord::new(2, 2)));
    }

    #[test]
    fn unreachable_target_yields_empty_path() {
        let mut grid = RoomGrid::new(3, 3);
        grid.connect(Coord::new(0, 0), Coord::new(1, 0));
        let path = shortest_path(&grid, Coord::new(0, 0), Coord::new(2, 2));
        assert!(path.is_empty());
    }

    #[test]
    fn farthest_breaks_ties_in_row_major_order() {
        // Origin in the middle of a plus shape: all four arms at distance 1.
        let mut grid = RoomGrid::new(3, 3);
        let center = Coord::new(1, 1);
        for dir in Direction::ALL {
            grid.connect(center, center.step(dir));
        }
        let dist = distance_map(&grid, center);
        // (1,0) is the first distance-1 cell the row-major scan meets.
        assert_eq!(dist.farthest(), Coord::new(1, 0));
    }
}
