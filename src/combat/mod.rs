//! Combat resolution
//!
//! One exchange per `attack` command: the player strikes, and a surviving
//! monster counters. All randomness comes from the caller's rng so a
//! replayed seed fights the same fight.

use rand::rngs::StdRng;
use rand::Rng;

use crate::entities::{Monster, Player};

/// What happened in a single attack exchange
#[derive(Debug, Clone)]
pub struct ExchangeOutcome {
    /// Damage the player dealt
    pub damage_dealt: i32,
    /// The monster dropped to 0 health
    pub monster_slain: bool,
    /// Counter-attack damage, absent when the monster died first
    pub counter_damage: Option<i32>,
    /// The counter-attack dropped the player to 0 health
    pub player_downed: bool,
}

/// Resolve one exchange. The caller removes slain monsters from their room
/// and handles win/lose transitions.
pub fn resolve_exchange(
    player: &mut Player,
    monster: &mut Monster,
    rng: &mut StdRng,
) -> ExchangeOutcome {
    let damage = player.attack_damage(rng);
    monster.take_damage(damage);

    if monster.is_dead() {
        return ExchangeOutcome {
            damage_dealt: damage,
            monster_slain: true,
            counter_damage: None,
            player_downed: false,
        };
    }

    // The counter lands at full force less a small random mitigation.
    let mitigation = rng.gen_range(0..=2);
    let counter = (monster.attack() - mitigation).max(0);
    player.take_damage(counter);

    ExchangeOutcome {
        damage_dealt: damage,
        monster_slain: false,
        counter_damage: Some(counter),
        player_downed: player.is_dead(),
    }
}
