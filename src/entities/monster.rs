//! Monsters
//!
//! Plain records: name, health, attack damage, boss flag. Mutated only by
//! taking damage; the owning room drops a monster when it dies.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::world::generation::DistanceBand;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    name: String,
    health: i32,
    attack: i32,
    boss: bool,
}

impl Monster {
    pub fn new(name: impl Into<String>, health: i32, attack: i32, boss: bool) -> Self {
        Self {
            name: name.into(),
            health,
            attack,
            boss,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn attack(&self) -> i32 {
        self.attack
    }

    pub fn is_boss(&self) -> bool {
        self.boss
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount.max(0)).max(0);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

/// The warden of the deepest room
pub fn boss() -> Monster {
    Monster::new("Gravelord", 60, 8, true)
}

/// Roll a rank-and-file monster scaled to the distance band
pub fn for_band(band: DistanceBand, rng: &mut StdRng) -> Monster {
    let roster: &[&str] = match band {
        DistanceBand::Near => &["giant rat", "skeleton"],
        DistanceBand::Mid => &["ghoul", "cave troll"],
        DistanceBand::Far => &["wraith", "dread knight"],
    };
    let (health, attack) = match band {
        DistanceBand::Near => (18, 4),
        DistanceBand::Mid => (28, 6),
        DistanceBand::Far => (38, 7),
    };
    let name = *roster.choose(rng).unwrap_or(&roster[0]);
    Monster::new(name, health, attack, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn damage_floors_at_zero() {
        let mut m = Monster::new("skeleton", 10, 4, false);
        m.take_damage(25);
        assert_eq!(m.health(), 0);
        assert!(m.is_dead());
    }

    #[test]
    fn negative_damage_is_ignored() {
        let mut m = Monster::new("skeleton", 10, 4, false);
        m.take_damage(-5);
        assert_eq!(m.health(), 10);
    }

    #[test]
    fn bands_scale_upward() {
        let mut rng = StdRng::seed_from_u64(7);
        let near = for_band(DistanceBand::Near, &mut rng);
        let far = for_band(DistanceBand::Far, &mut rng);
        assert!(far.health() > near.health());
        assert!(far.attack() > near.attack());
        assert!(!near.is_boss() && !far.is_boss());
    }
}
