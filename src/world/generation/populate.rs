//! Content placement
//!
//! Fills a carved grid in a fixed order: descriptions, the locked boss
//! room, the key on the solution path, loot, then monster spawns. Later
//! steps assume the placements of earlier ones, so the order matters.
//! Items and monsters never share a room under this generator.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::monster;
use crate::items::{self, Item};
use crate::world::grid::{Coord, RoomGrid};
use crate::world::pathfind::{distance_map, shortest_path, DistanceMap};

use super::{DistanceBand, GenerationError};

const ENTRANCE_DESC: &str = "The castle gate. Passages tangle away into the dark.";
const BOSS_DESC: &str = "The Gravelord's throne hall. Cold air presses in from every wall.";

const NEAR_POOL: &[&str] = &[
    "A dusty antechamber, its tapestries rotted to threads.",
    "A cobwebbed corridor littered with broken arrows.",
    "A storeroom of split barrels and spilled grain gone black.",
];

const MID_POOL: &[&str] = &[
    "A flooded cellar where something ripples below the surface.",
    "A bone-littered hall scored by old claw marks.",
    "A crypt of toppled coffins and guttered candles.",
];

const FAR_POOL: &[&str] = &[
    "A scorched vault, its walls glassy from ancient fire.",
    "A silent chapel whose altar has been split in two.",
    "A black gallery hung with portraits of no one living.",
];

/// Where the load-bearing pieces ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub boss_room: Coord,
    pub key_room: Coord,
    /// Rooms on the solution path, origin and boss inclusive
    pub path_len: usize,
}

/// Populate a carved grid. The origin is always (0,0).
pub fn populate(grid: &mut RoomGrid, rng: &mut StdRng) -> Result<Placement, GenerationError> {
    let origin = Coord::new(0, 0);
    let dist = distance_map(grid, origin);

    describe_rooms(grid, &dist, origin, rng);

    // The farthest room becomes the boss lair, locked behind the key.
    let boss_room = dist.farthest();
    {
        let room = grid.room_mut(boss_room);
        room.set_description(BOSS_DESC);
        room.set_monster(monster::boss());
        room.lock(items::BOSS_KEY);
    }

    let path = shortest_path(grid, origin, boss_room);
    let key_room = place_key(grid, &path, origin, boss_room, rng)?;

    place_currency(grid, origin, rng);
    place_weapon(grid, &path, boss_room, key_room);
    place_healing(grid, &path, origin, boss_room, key_room);
    spawn_monsters(grid, &dist, origin, boss_room, key_room, rng);

    // The warden at the gate points the way, like any good doomed guide.
    grid.room_mut(origin).set_npc(
        "Warden",
        format!(
            "The Gravelord holds the hall at ({}, {}). The door answers only to its key. Go carefully.",
            boss_room.x, boss_room.y
        ),
    );

    Ok(Placement {
        boss_room,
        key_room,
        path_len: path.len(),
    })
}

/// Flavor text by distance band; the origin keeps its fixed entrance text
fn describe_rooms(grid: &mut RoomGrid, dist: &DistanceMap, origin: Coord, rng: &mut StdRng) {
    let coords: Vec<Coord> = grid.coords().collect();
    for c in coords {
        if c == origin {
            grid.room_mut(c).set_description(ENTRANCE_DESC);
            continue;
        }
        let pool = match dist.get(c).map(DistanceBand::for_distance) {
            Some(DistanceBand::Near) => NEAR_POOL,
            Some(DistanceBand::Mid) => MID_POOL,
            _ => FAR_POOL,
        };
        let desc = pool.choose(rng).copied().unwrap_or(FAR_POOL[0]);
        grid.room_mut(c).set_description(desc);
    }
}

/// Hide the boss key in an empty interior room of the solution path.
/// Falls back to a row-major scan for any empty room; if even that fails
/// the dungeon configuration is broken and setup must abort.
fn place_key(
    grid: &mut RoomGrid,
    path: &[Coord],
    origin: Coord,
    boss_room: Coord,
    rng: &mut StdRng,
) -> Result<Coord, GenerationError> {
    let key_item = || Item::new(items::BOSS_KEY, "Black iron, colder than it should be.");

    if path.len() >= 3 {
        let candidates: Vec<Coord> = path[1..path.len() - 1]
            .iter()
            .copied()
            .filter(|&c| grid.room(c).is_empty())
            .collect();
        if let Some(&spot) = candidates.choose(rng) {
            grid.room_mut(spot).add_item(key_item());
            return Ok(spot);
        }
    }

    let fallback = grid
        .coords()
        .find(|&c| c != origin && c != boss_room && grid.room(c).is_empty());
    match fallback {
        Some(spot) => {
            grid.room_mut(spot).add_item(key_item());
            Ok(spot)
        }
        None => Err(GenerationError::NoKeyRoom),
    }
}

/// A pouch of gold for whoever bothers to search the dead ends
fn place_currency(grid: &mut RoomGrid, origin: Coord, rng: &mut StdRng) {
    let mut dead_ends: Vec<Coord> = grid
        .coords()
        .filter(|&c| c != origin && grid.room(c).exit_count() <= 1)
        .collect();
    dead_ends.shuffle(rng);

    let spot = dead_ends.into_iter().find(|&c| grid.room(c).is_empty());
    if let Some(c) = spot {
        grid.room_mut(c)
            .add_item(Item::new(items::GOLD_POUCH, "Heavier than it looks."));
    }
}

/// A basic weapon early on the solution path
fn place_weapon(grid: &mut RoomGrid, path: &[Coord], boss_room: Coord, key_room: Coord) {
    let spot = path
        .iter()
        .skip(1)
        .copied()
        .find(|&c| c != boss_room && c != key_room && grid.room(c).is_empty());
    if let Some(c) = spot {
        grid.room_mut(c)
            .add_item(Item::new(items::DAGGER, "A light blade, still keen."));
    }
}

/// A potion at (or near) the midpoint of the solution path
fn place_healing(grid: &mut RoomGrid, path: &[Coord], origin: Coord, boss_room: Coord, key_room: Coord) {
    let midpoint = path
        .get(path.len() / 2)
        .copied()
        .filter(|&c| c != origin && c != boss_room && c != key_room && grid.room(c).is_empty());

    let spot = midpoint.or_else(|| {
        path.iter()
            .skip(1)
            .copied()
            .find(|&c| c != boss_room && c != key_room && grid.room(c).is_empty())
    });

    if let Some(c) = spot {
        grid.room_mut(c)
            .add_item(Item::new(items::POTION, "Bitter, but it knits flesh whole."));
    }
}

/// Roll band-scaled monsters into whatever rooms are still empty
fn spawn_monsters(
    grid: &mut RoomGrid,
    dist: &DistanceMap,
    origin: Coord,
    boss_room: Coord,
    key_room: Coord,
    rng: &mut StdRng,
) {
    let coords: Vec<Coord> = grid.coords().collect();
    for c in coords {
        if c == origin || c == boss_room || c == key_room {
            continue;
        }
        if !grid.room(c).is_empty() {
            continue;
        }
        let band = dist
            .get(c)
            .map(DistanceBand::for_distance)
            .unwrap_or(DistanceBand::Far);
        if rng.gen_bool(band.spawn_chance()) {
            grid.room_mut(c).set_monster(monster::for_band(band, rng));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::generation::{generate, Config};
    use rand::SeedableRng;

    fn build(seed: u64) -> (RoomGrid, Placement) {
        let mut rng = StdRng::seed_from_u64(seed);
        generate(&Config::default(), &mut rng).expect("4x4 generation never fails")
    }

    fn rooms_holding(grid: &RoomGrid, name: &str) -> Vec<Coord> {
        grid.coords()
            .filter(|&c| {
                grid.room(c)
                    .items()
                    .iter()
                    .any(|i| i.name.eq_ignore_ascii_case(name))
            })
            .collect()
    }

    #[test]
    fn boss_room_is_the_farthest_and_locked() {
        for seed in 0..24 {
            let (grid, placement) = build(seed);
            let dist = distance_map(&grid, Coord::new(0, 0));
            assert_eq!(placement.boss_room, dist.farthest(), "seed {}", seed);

            let boss_room = grid.room(placement.boss_room);
            assert!(boss_room.is_locked(), "seed {}", seed);
            let monster = boss_room.monster().expect("boss present");
            assert!(monster.is_boss(), "seed {}", seed);
        }
    }

    #[test]
    fn key_is_placed_exactly_once_and_opens_the_boss_door() {
        for seed in 0..24 {
            let (mut grid, placement) = build(seed);
            let holders = rooms_holding(&grid, items::BOSS_KEY);
            assert_eq!(holders, vec![placement.key_room], "seed {}", seed);
            assert!(grid.room_mut(placement.boss_room).unlock(items::BOSS_KEY));
        }
    }

    #[test]
    fn key_lies_on_the_solution_path() {
        for seed in 0..24 {
            let (grid, placement) = build(seed);
            let path = shortest_path(&grid, Coord::new(0, 0), placement.boss_room);
            // The interior-path rooms are all empty when the key is placed,
            // so the fallback never fires on a connected 4x4 grid.
            assert!(path.contains(&placement.key_room), "seed {}", seed);
            assert_ne!(placement.key_room, Coord::new(0, 0), "seed {}", seed);
            assert_ne!(placement.key_room, placement.boss_room, "seed {}", seed);
        }
    }

    #[test]
    fn weapon_and_potion_are_placed_on_the_path() {
        for seed in 0..24 {
            let (grid, placement) = build(seed);
            let path = shortest_path(&grid, Coord::new(0, 0), placement.boss_room);
            for name in [items::DAGGER, items::POTION] {
                let holders = rooms_holding(&grid, name);
                assert_eq!(holders.len(), 1, "seed {}: {}", seed, name);
                assert!(path.contains(&holders[0]), "seed {}: {}", seed, name);
            }
        }
    }

    #[test]
    fn currency_only_appears_in_dead_ends() {
        for seed in 0..24 {
            let (grid, _) = build(seed);
            for c in rooms_holding(&grid, items::GOLD_POUCH) {
                assert!(grid.room(c).exit_count() <= 1, "seed {}: {:?}", seed, c);
                assert_ne!(c, Coord::new(0, 0), "seed {}", seed);
            }
        }
    }

    #[test]
    fn items_and_monsters_never_share_a_room() {
        for seed in 0..24 {
            let (grid, _) = build(seed);
            for c in grid.coords() {
                let room = grid.room(c);
                assert!(
                    room.monster().is_none() || room.items().is_empty(),
                    "seed {}: {:?} holds both",
                    seed,
                    c
                );
            }
        }
    }

    #[test]
    fn origin_keeps_the_entrance_and_its_warden() {
        for seed in 0..24 {
            let (grid, _) = build(seed);
            let origin = grid.room(Coord::new(0, 0));
            assert_eq!(origin.description(), ENTRANCE_DESC, "seed {}", seed);
            assert!(origin.npc().is_some(), "seed {}", seed);
            assert!(origin.monster().is_none(), "seed {}", seed);
        }
    }

    #[test]
    fn key_room_never_hosts_a_monster() {
        for seed in 0..24 {
            let (grid, placement) = build(seed);
            assert!(grid.room(placement.key_room).monster().is_none(), "seed {}", seed);
        }
    }
}
