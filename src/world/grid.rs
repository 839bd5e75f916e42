//! Room grid data structure
//!
//! A fixed-size 2D arena of rooms. Rooms never own each other: exits are
//! stored as grid coordinates, so the graph has no reference cycles.

use serde::{Deserialize, Serialize};

use crate::entities::Monster;
use crate::items::Item;

/// A grid coordinate, 0-indexed from the north-west corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The coordinate one step in the given direction (may be out of bounds)
    pub fn step(&self, dir: Direction) -> Coord {
        let (dx, dy) = dir.delta();
        Coord::new(self.x + dx, self.y + dy)
    }
}

/// The four cardinal exit directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Canonical iteration order. BFS tie-breaking and exit listings both
    /// follow this order, so it must stay fixed.
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::South,
        Direction::North,
    ];

    /// Grid delta for one step. North is negative y.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }

    /// Parse a direction word, case-insensitively. Single-letter
    /// abbreviations are accepted.
    pub fn parse(word: &str) -> Option<Direction> {
        match word.to_ascii_lowercase().as_str() {
            "north" | "n" => Some(Direction::North),
            "south" | "s" => Some(Direction::South),
            "east" | "e" => Some(Direction::East),
            "west" | "w" => Some(Direction::West),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        match self {
            Direction::East => 0,
            Direction::West => 1,
            Direction::South => 2,
            Direction::North => 3,
        }
    }
}

/// An NPC standing in a room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Npc {
    pub name: String,
    pub dialogue: String,
}

/// A single room: description, exits, contents, and an optional lock
#[derive(Debug, Clone, Default)]
pub struct Room {
    description: String,
    exits: [Option<Coord>; 4],
    items: Vec<Item>,
    monster: Option<Monster>,
    npc: Option<Npc>,
    /// `Some(name)` while locked; the named item opens it
    lock: Option<String>,
}

impl Room {
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn exit(&self, dir: Direction) -> Option<Coord> {
        self.exits[dir.index()]
    }

    pub fn set_exit(&mut self, dir: Direction, target: Coord) {
        self.exits[dir.index()] = Some(target);
    }

    /// Exits in canonical order
    pub fn exits(&self) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        Direction::ALL
            .iter()
            .filter_map(|&dir| self.exit(dir).map(|c| (dir, c)))
    }

    pub fn exit_count(&self) -> usize {
        self.exits.iter().filter(|e| e.is_some()).count()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Remove and return the first item whose name matches, ignoring case
    pub fn take_item(&mut self, name: &str) -> Option<Item> {
        let idx = self
            .items
            .iter()
            .position(|i| i.name.eq_ignore_ascii_case(name))?;
        Some(self.items.remove(idx))
    }

    pub fn monster(&self) -> Option<&Monster> {
        self.monster.as_ref()
    }

    pub fn monster_mut(&mut self) -> Option<&mut Monster> {
        self.monster.as_mut()
    }

    pub fn set_monster(&mut self, monster: Monster) {
        self.monster = Some(monster);
    }

    pub fn clear_monster(&mut self) {
        self.monster = None;
    }

    pub fn npc(&self) -> Option<&Npc> {
        self.npc.as_ref()
    }

    pub fn set_npc(&mut self, name: impl Into<String>, dialogue: impl Into<String>) {
        self.npc = Some(Npc {
            name: name.into(),
            dialogue: dialogue.into(),
        });
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }

    /// Lock the room behind the named item
    pub fn lock(&mut self, required_item: impl Into<String>) {
        self.lock = Some(required_item.into());
    }

    /// Try to open the lock with the named item. Returns true on success.
    pub fn unlock(&mut self, item_name: &str) -> bool {
        match &self.lock {
            Some(required) if required.eq_ignore_ascii_case(item_name) => {
                self.lock = None;
                true
            }
            _ => false,
        }
    }

    /// No monster and no items: the placement pass may use this room
    pub fn is_empty(&self) -> bool {
        self.monster.is_none() && self.items.is_empty()
    }
}

/// The dungeon: a width x height arena of rooms
#[derive(Debug, Clone)]
pub struct RoomGrid {
    width: i32,
    height: i32,
    rooms: Vec<Room>,
}

impl RoomGrid {
    /// Create a grid of unconnected, undescribed rooms
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        let rooms = vec![Room::default(); (width * height) as usize];
        Self {
            width,
            height,
            rooms,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    #[inline]
    pub fn in_bounds(&self, c: Coord) -> bool {
        c.x >= 0 && c.x < self.width && c.y >= 0 && c.y < self.height
    }

    #[inline]
    fn idx(&self, c: Coord) -> usize {
        (c.y * self.width + c.x) as usize
    }

    pub fn room(&self, c: Coord) -> &Room {
        &self.rooms[self.idx(c)]
    }

    pub fn room_mut(&mut self, c: Coord) -> &mut Room {
        let idx = self.idx(c);
        &mut self.rooms[idx]
    }

    /// All coordinates in row-major order (y outer, x inner)
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| Coord::new(x, y)))
    }

    /// Connect two adjacent cells with a mutual pair of exits.
    /// Non-adjacent pairs are rejected; re-connecting an edge is a no-op.
    pub fn connect(&mut self, a: Coord, b: Coord) {
        debug_assert!(self.in_bounds(a) && self.in_bounds(b));
        let dir = match (b.x - a.x, b.y - a.y) {
            (1, 0) => Direction::East,
            (-1, 0) => Direction::West,
            (0, 1) => Direction::South,
            (0, -1) => Direction::North,
            _ => return,
        };
        self.room_mut(a).set_exit(dir, b);
        self.room_mut(b).set_exit(dir.opposite(), a);
    }

    /// Total number of undirected edges in the graph
    pub fn edge_count(&self) -> usize {
        let directed: usize = self.coords().map(|c| self.room(c).exit_count()).sum();
        directed / 2
    }
}
