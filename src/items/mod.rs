//! Items
//!
//! Items are valueless tokens: identity is the name, compared
//! case-insensitively everywhere. Behavior (weapon bonus, healing) hangs
//! off well-known names rather than subtypes.

use serde::{Deserialize, Serialize};

/// The item that opens the boss room
pub const BOSS_KEY: &str = "ancient key";
/// Full-restore healing draught
pub const POTION: &str = "potion";
/// Currency reward tucked into a dead end
pub const GOLD_POUCH: &str = "gold pouch";
/// Basic weapon seeded along the solution path
pub const DAGGER: &str = "dagger";
/// Recognized but never generated; kept in the weapon table for parity
pub const LONGSWORD: &str = "longsword";
/// Vestigial instant-win item; no generator places it
pub const TREASURE: &str = "treasure";

/// An item: a name and some flavor text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: String,
}

impl Item {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Bonus damage granted by a recognized weapon name, `None` otherwise
pub fn weapon_bonus(name: &str) -> Option<i32> {
    if name.eq_ignore_ascii_case(DAGGER) {
        Some(5)
    } else if name.eq_ignore_ascii_case(LONGSWORD) {
        Some(10)
    } else {
        None
    }
}

pub fn is_weapon(name: &str) -> bool {
    weapon_bonus(name).is_some()
}

pub fn is_healing(name: &str) -> bool {
    name.eq_ignore_ascii_case(POTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weapon_table_is_case_insensitive() {
        assert_eq!(weapon_bonus("Dagger"), Some(5));
        assert_eq!(weapon_bonus("LONGSWORD"), Some(10));
        assert_eq!(weapon_bonus("potion"), None);
    }

    #[test]
    fn healing_recognizes_the_potion() {
        assert!(is_healing("Potion"));
        assert!(!is_healing("dagger"));
    }
}
