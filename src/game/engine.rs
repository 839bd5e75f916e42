//! The run engine
//!
//! Owns the grid, the player, and the run flags. `handle_command` is the
//! single mutation entry point: one command string in, one narration
//! string out, processed to completion before the next.

use std::collections::HashSet;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::combat;
use crate::entities::{Player, MAX_HEALTH};
use crate::items::{self, Item};
use crate::score::format_elapsed;
use crate::world::generation::{self, Config, GenerationError};
use crate::world::grid::{Coord, Direction, Room, RoomGrid};

use super::commands::Command;

const ORIGIN: Coord = Coord { x: 0, y: 0 };

/// A single run of the dungeon
pub struct Game {
    grid: RoomGrid,
    player: Player,
    visited: HashSet<Coord>,
    running: bool,
    cleared: bool,
    seed: u64,
    rng: StdRng,
    started_at: Instant,
    /// Set once, at the cleared transition; the run clock freezes here
    finished_at: Option<Instant>,
}

impl Game {
    /// Generate and enter a dungeon with the reference configuration
    pub fn new(seed: u64) -> Result<Self, GenerationError> {
        Self::with_config(seed, &Config::default())
    }

    pub fn with_config(seed: u64, config: &Config) -> Result<Self, GenerationError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let (grid, placement) = generation::generate(config, &mut rng)?;
        log::info!(
            "dungeon ready: seed {}, boss at ({}, {}), key at ({}, {}), solution path {} rooms",
            seed,
            placement.boss_room.x,
            placement.boss_room.y,
            placement.key_room.x,
            placement.key_room.y,
            placement.path_len
        );

        Ok(Self {
            grid,
            player: Player::new(ORIGIN),
            visited: HashSet::from([ORIGIN]),
            running: true,
            cleared: false,
            seed,
            rng,
            started_at: Instant::now(),
            finished_at: None,
        })
    }

    // =========================================================================
    // Query surface for the presentation layer
    // =========================================================================

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Milliseconds since setup, frozen at the moment the run was cleared
    pub fn elapsed_ms(&self) -> u64 {
        let end = self.finished_at.unwrap_or_else(Instant::now);
        end.duration_since(self.started_at).as_millis() as u64
    }

    pub fn grid(&self) -> &RoomGrid {
        &self.grid
    }

    pub fn current_coord(&self) -> Coord {
        self.player.location()
    }

    pub fn visited(&self) -> &HashSet<Coord> {
        &self.visited
    }

    pub fn player_health(&self) -> i32 {
        self.player.health()
    }

    /// The full view of the current room: description, items, monster,
    /// NPC hint, and exits
    pub fn room_view(&self) -> String {
        let room = self.current_room();
        let mut lines = vec![room.description().to_string()];

        if !room.items().is_empty() {
            let names: Vec<&str> = room.items().iter().map(|i| i.name.as_str()).collect();
            lines.push(format!("Items: {}", names.join(", ")));
        }
        if let Some(m) = room.monster() {
            lines.push(format!("Monster: {} (health {})", m.name(), m.health()));
        }
        if room.npc().is_some() {
            lines.push("Someone is here. Try 'talk'.".to_string());
        }
        let exits: Vec<&str> = room.exits().map(|(dir, _)| dir.name()).collect();
        if !exits.is_empty() {
            lines.push(format!("Exits: {}", exits.join(", ")));
        }
        lines.join("\n")
    }

    pub fn room_item_names(&self) -> Vec<String> {
        self.current_room()
            .items()
            .iter()
            .map(|i| i.name.clone())
            .collect()
    }

    pub fn inventory_names(&self) -> Vec<String> {
        self.player
            .inventory()
            .iter()
            .map(|i| i.name.clone())
            .collect()
    }

    /// Inventory names, keeping only weapons or only non-weapons
    pub fn inventory_names_filtered(&self, weapons: bool) -> Vec<String> {
        self.player
            .inventory()
            .iter()
            .filter(|i| items::is_weapon(&i.name) == weapons)
            .map(|i| i.name.clone())
            .collect()
    }

    // =========================================================================
    // Command dispatch
    // =========================================================================

    /// Apply one command and narrate the outcome. After the run has ended
    /// every input gets the same notice and nothing mutates.
    pub fn handle_command(&mut self, input: &str) -> String {
        if !self.running {
            return "The run is over. Nothing stirs at your command.".to_string();
        }

        match Command::parse(input) {
            Command::Empty => String::new(),
            Command::Quit => {
                self.end(false);
                "You abandon the delve.".to_string()
            }
            Command::Look => self.room_view(),
            Command::Inventory => self.cmd_inventory(),
            Command::Talk => self.cmd_talk(),
            Command::Attack => self.cmd_attack(),
            Command::Status => self.cmd_status(),
            Command::Move(arg) => match arg {
                Some(dir) => self.cmd_move(&dir),
                None => "Move where? (e.g. move east)".to_string(),
            },
            Command::Take(arg) => match arg {
                Some(name) => self.cmd_take(&name),
                None => "Take what?".to_string(),
            },
            Command::Use(arg) => match arg {
                Some(name) => self.cmd_use(&name),
                None => "Use what?".to_string(),
            },
            Command::Equip(arg) => match arg {
                Some(name) => self.cmd_equip(&name),
                None => "Equip what?".to_string(),
            },
            Command::Unknown => "Unknown command.".to_string(),
        }
    }

    fn cmd_move(&mut self, arg: &str) -> String {
        let dir = arg.split_whitespace().next().and_then(Direction::parse);
        let Some(dir) = dir else {
            return "You can't go that way.".to_string();
        };

        // A live monster bars every door out.
        if let Some(m) = self.current_room().monster() {
            return format!("The {} blocks your way. Deal with it first.", m.name());
        }

        let Some(next) = self.current_room().exit(dir) else {
            return "You can't go that way.".to_string();
        };
        if self.grid.room(next).is_locked() {
            return "The door is locked. Something seems to be required.".to_string();
        }

        self.player.move_to(next);
        self.visited.insert(next);

        let room = self.grid.room(next);
        let mut lines = vec![room.description().to_string()];
        if let Some(m) = room.monster() {
            lines.push(format!("A {} is here, and it has seen you.", m.name()));
        }
        if self.boss_nearby(next) {
            lines.push("A crushing dread seeps through a nearby door. The Gravelord is close.".to_string());
        }
        lines.join("\n")
    }

    fn cmd_take(&mut self, name: &str) -> String {
        let loc = self.player.location();
        let Some(item) = self.grid.room_mut(loc).take_item(name) else {
            return "There is no such item here.".to_string();
        };

        let item_name = item.name.clone();
        self.player.add_item(item);

        if item_name.eq_ignore_ascii_case(items::TREASURE) {
            self.end(true);
            return "You seize the treasure! The delve is cleared!".to_string();
        }
        format!("You pick up the {}.", item_name)
    }

    fn cmd_use(&mut self, name: &str) -> String {
        let Some(item) = self.player.remove_item(name) else {
            return "You don't have that item.".to_string();
        };

        if items::is_healing(&item.name) {
            self.player.heal_fully();
            return format!(
                "You drink the {}. Your wounds close. (health {})",
                item.name,
                self.player.health()
            );
        }

        // Keys and the like work on any locked room behind a neighboring door.
        let loc = self.player.location();
        let neighbors: Vec<Coord> = self.current_room().exits().map(|(_, c)| c).collect();
        for n in neighbors {
            if self.grid.room(n).is_locked() && self.grid.room_mut(n).unlock(&item.name) {
                log::debug!("unlocked {:?} from {:?} with {}", n, loc, item.name);
                return "The lock grinds open.".to_string();
            }
        }

        // Returned to the pack, description lost along the way.
        let name = item.name;
        self.player.add_item(Item::new(name.clone(), ""));
        format!("You can't use the {} here.", name)
    }

    fn cmd_equip(&mut self, name: &str) -> String {
        if !self.player.has_item(name) {
            return "You don't have that item.".to_string();
        }
        if self.player.equip(name) {
            format!(
                "You grip the {}. (+{} damage)",
                name.to_lowercase(),
                self.player.weapon_bonus()
            )
        } else {
            "That is not a weapon.".to_string()
        }
    }

    fn cmd_talk(&mut self) -> String {
        match self.current_room().npc() {
            Some(npc) => format!("{}: {}", npc.name, npc.dialogue),
            None => "There is no one here.".to_string(),
        }
    }

    fn cmd_attack(&mut self) -> String {
        let loc = self.player.location();
        if self.grid.room(loc).monster().is_none() {
            return "There is nothing to attack.".to_string();
        }

        let room = self.grid.room_mut(loc);
        let Some(monster) = room.monster_mut() else {
            return "There is nothing to attack.".to_string();
        };
        let name = monster.name().to_string();
        let boss = monster.is_boss();
        let outcome = combat::resolve_exchange(&mut self.player, monster, &mut self.rng);
        let health_left = monster.health();

        let mut lines = vec![format!(
            "You strike the {} for {} damage. ({} health left)",
            name, outcome.damage_dealt, health_left
        )];

        if outcome.monster_slain {
            self.grid.room_mut(loc).clear_monster();
            if boss {
                self.end(true);
                lines.push(format!("The {} falls. The dungeon is cleared!", name));
            } else {
                lines.push(format!("The {} is slain.", name));
            }
            return lines.join("\n");
        }

        if let Some(counter) = outcome.counter_damage {
            lines.push(format!(
                "The {} retaliates for {} damage. (your health: {})",
                name,
                counter,
                self.player.health()
            ));
        }
        if outcome.player_downed {
            self.end(false);
            lines.push("You collapse. The dungeon claims another.".to_string());
        }
        lines.join("\n")
    }

    fn cmd_inventory(&self) -> String {
        let names = self.inventory_names();
        if names.is_empty() {
            "Your inventory is empty.".to_string()
        } else {
            format!("Inventory: {}", names.join(", "))
        }
    }

    fn cmd_status(&self) -> String {
        format!(
            "Health {}/{}. Weapon bonus +{}. Carrying {} item(s). {} elapsed.",
            self.player.health(),
            MAX_HEALTH,
            self.player.weapon_bonus(),
            self.player.inventory().len(),
            format_elapsed(self.elapsed_ms())
        )
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn current_room(&self) -> &Room {
        self.grid.room(self.player.location())
    }

    /// The boss counts as nearby when any door of this room leads to it
    fn boss_nearby(&self, c: Coord) -> bool {
        self.grid.room(c).exits().any(|(_, n)| {
            self.grid
                .room(n)
                .monster()
                .map(|m| m.is_boss())
                .unwrap_or(false)
        })
    }

    fn end(&mut self, cleared: bool) {
        log::debug!("run ended: cleared={}", cleared);
        self.running = false;
        self.cleared = cleared;
        if cleared && self.finished_at.is_none() {
            self.finished_at = Some(Instant::now());
        }
    }
}
