//! The player character
//!
//! Position, clamped health, an open inventory, and the bonus damage of
//! whatever weapon is currently gripped.

use rand::rngs::StdRng;
use rand::Rng;

use crate::items::{self, Item};
use crate::world::grid::Coord;

/// Health cap; healing never exceeds it
pub const MAX_HEALTH: i32 = 100;

#[derive(Debug, Clone)]
pub struct Player {
    location: Coord,
    health: i32,
    inventory: Vec<Item>,
    weapon_bonus: i32,
}

impl Player {
    /// A fresh player at full health in the starting room
    pub fn new(start: Coord) -> Self {
        Self {
            location: start,
            health: MAX_HEALTH,
            inventory: Vec::new(),
            weapon_bonus: 0,
        }
    }

    pub fn location(&self) -> Coord {
        self.location
    }

    pub fn move_to(&mut self, next: Coord) {
        self.location = next;
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount.max(0)).max(0);
    }

    /// Restore health fully, to the cap
    pub fn heal_fully(&mut self) {
        self.health = MAX_HEALTH;
    }

    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    pub fn add_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.inventory
            .iter()
            .any(|i| i.name.eq_ignore_ascii_case(name))
    }

    /// Remove and return the first matching item, ignoring case
    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        let idx = self
            .inventory
            .iter()
            .position(|i| i.name.eq_ignore_ascii_case(name))?;
        Some(self.inventory.remove(idx))
    }

    pub fn weapon_bonus(&self) -> i32 {
        self.weapon_bonus
    }

    /// Grip a weapon from the inventory. Fails without touching state when
    /// the item is missing or not a recognized weapon.
    pub fn equip(&mut self, name: &str) -> bool {
        if !self.has_item(name) {
            return false;
        }
        match items::weapon_bonus(name) {
            Some(bonus) => {
                self.weapon_bonus = bonus;
                true
            }
            None => false,
        }
    }

    /// Damage for one strike: a small random base plus the weapon bonus
    pub fn attack_damage(&self, rng: &mut StdRng) -> i32 {
        let base = 8 + rng.gen_range(0..3);
        (base + self.weapon_bonus).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn damage_clamps_at_zero() {
        let mut p = Player::new(Coord::new(0, 0));
        p.take_damage(150);
        assert_eq!(p.health(), 0);
        assert!(p.is_dead());
    }

    #[test]
    fn healing_restores_to_the_cap_exactly() {
        let mut p = Player::new(Coord::new(0, 0));
        p.take_damage(60);
        p.heal_fully();
        assert_eq!(p.health(), MAX_HEALTH);
        p.heal_fully();
        assert_eq!(p.health(), MAX_HEALTH);
    }

    #[test]
    fn equip_requires_a_held_weapon() {
        let mut p = Player::new(Coord::new(0, 0));
        assert!(!p.equip("dagger"));
        p.add_item(Item::new("dagger", "A light blade."));
        assert!(p.equip("Dagger"));
        assert_eq!(p.weapon_bonus(), 5);
    }

    #[test]
    fn equip_rejects_non_weapons() {
        let mut p = Player::new(Coord::new(0, 0));
        p.add_item(Item::new("potion", "Restores health."));
        assert!(!p.equip("potion"));
        assert_eq!(p.weapon_bonus(), 0);
    }

    #[test]
    fn attack_damage_stays_in_the_base_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let p = Player::new(Coord::new(0, 0));
        for _ in 0..50 {
            let dmg = p.attack_damage(&mut rng);
            assert!((8..=10).contains(&dmg));
        }
    }

    #[test]
    fn remove_item_takes_one_copy() {
        let mut p = Player::new(Coord::new(0, 0));
        p.add_item(Item::new("potion", ""));
        p.add_item(Item::new("potion", ""));
        assert!(p.remove_item("POTION").is_some());
        assert_eq!(p.inventory().len(), 1);
    }
}
