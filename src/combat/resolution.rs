//! Move resolution
//!
//! Maps a chosen move and the mover's available resource to an outcome.
//! A move the mover cannot afford resolves as a no-op: zero damage, zero
//! resource spent. It still counts as a selection.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    ATTACK_COST, ATTACK_DAMAGE, REGENERATE_AMOUNT, REGENERATE_COST, SPECIAL_COST, SPECIAL_DAMAGE,
};
use crate::combat::Combatant;
use crate::core::Move;

/// Result of resolving one move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// The move that was selected (even if it fizzled)
    pub chosen: Move,
    /// False when the mover lacked the resource for the move
    pub executed: bool,
    /// Damage rolled against the opposing combatant
    pub damage_dealt: u32,
    pub resource_spent: u32,
    /// Resource actually regained (after the cap)
    pub resource_restored: u32,
}

impl Outcome {
    fn fizzled(chosen: Move) -> Self {
        Self {
            chosen,
            executed: false,
            damage_dealt: 0,
            resource_spent: 0,
            resource_restored: 0,
        }
    }

    /// One-line description for the presentation layer
    pub fn describe(&self, name: &str) -> String {
        if !self.executed {
            return match self.chosen {
                Move::Attack => "Not enough MP to attack!".to_string(),
                Move::Special => "Not enough MP to use special move!".to_string(),
                Move::Regenerate => "Cannot regenerate!".to_string(),
            };
        }
        match self.chosen {
            Move::Attack => format!("{} attacks and deals {} damage", name, self.damage_dealt),
            Move::Special => format!(
                "{} uses special move and deals {} damage",
                name, self.damage_dealt
            ),
            Move::Regenerate => format!("{} regenerates {} MP", name, self.resource_restored),
        }
    }
}

/// Resource cost of a move
pub fn move_cost(mv: Move) -> u32 {
    match mv {
        Move::Attack => ATTACK_COST,
        Move::Special => SPECIAL_COST,
        Move::Regenerate => REGENERATE_COST,
    }
}

/// Resolve `mv` for `mover` against `target`
///
/// Damage is drawn uniformly from the move's inclusive range on every call;
/// seed `rng` for reproducible rolls. Mutates the mover's resource, usage
/// counter and damage total, and the target's health.
pub fn resolve<R: Rng + ?Sized>(
    mover: &mut Combatant,
    target: &mut Combatant,
    mv: Move,
    rng: &mut R,
) -> Outcome {
    mover.move_usage.record(mv);

    let cost = move_cost(mv);
    if !mover.can_afford(cost) {
        return Outcome::fizzled(mv);
    }

    let damage = match mv {
        Move::Attack => rng.gen_range(ATTACK_DAMAGE),
        Move::Special => rng.gen_range(SPECIAL_DAMAGE),
        Move::Regenerate => 0,
    };

    mover.spend(cost);
    let restored = if mv == Move::Regenerate {
        mover.restore(REGENERATE_AMOUNT)
    } else {
        0
    };

    if damage > 0 {
        target.take_damage(damage);
        mover.total_damage_dealt = mover.total_damage_dealt.saturating_add(damage);
    }

    Outcome {
        chosen: mv,
        executed: true,
        damage_dealt: damage,
        resource_spent: cost,
        resource_restored: restored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pair() -> (Combatant, Combatant) {
        (Combatant::new("Hero", 100, 50), Combatant::new("Adaptive AI", 100, 100))
    }

    #[test]
    fn test_attack_damage_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            let (mut hero, mut ai) = pair();
            let out = resolve(&mut hero, &mut ai, Move::Attack, &mut rng);
            assert!(ATTACK_DAMAGE.contains(&out.damage_dealt));
            assert_eq!(out.resource_spent, ATTACK_COST);
            assert_eq!(ai.health, 100 - out.damage_dealt);
            assert_eq!(hero.resource, 40);
        }
    }

    #[test]
    fn test_special_damage_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let (mut hero, mut ai) = pair();
        let out = resolve(&mut hero, &mut ai, Move::Special, &mut rng);
        assert!(SPECIAL_DAMAGE.contains(&out.damage_dealt));
        assert_eq!(hero.total_damage_dealt, out.damage_dealt);
    }

    #[test]
    fn test_insufficient_resource_is_noop() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let (mut hero, mut ai) = pair();
        hero.resource = 5;

        let out = resolve(&mut hero, &mut ai, Move::Special, &mut rng);

        assert!(!out.executed);
        assert_eq!(out.damage_dealt, 0);
        assert_eq!(out.resource_spent, 0);
        assert_eq!(hero.resource, 5);
        assert_eq!(ai.health, 100);
        assert_eq!(hero.move_usage.get(Move::Special), 1);
    }

    #[test]
    fn test_regenerate_caps_at_max() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let (mut hero, mut ai) = pair();
        hero.resource = 48;

        let out = resolve(&mut hero, &mut ai, Move::Regenerate, &mut rng);

        assert!(out.executed);
        assert_eq!(out.resource_restored, 2);
        assert_eq!(out.resource_spent, 0);
        assert_eq!(hero.resource, 50);
        assert_eq!(ai.health, 100);
    }

    #[test]
    fn test_describe_mentions_name_and_damage() {
        let out = Outcome {
            chosen: Move::Attack,
            executed: true,
            damage_dealt: 14,
            resource_spent: 10,
            resource_restored: 0,
        };
        assert_eq!(out.describe("Hero"), "Hero attacks and deals 14 damage");
        assert_eq!(
            Outcome::fizzled(Move::Special).describe("Hero"),
            "Not enough MP to use special move!"
        );
    }
}
