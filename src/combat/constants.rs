//! Move rules - all fixed costs and damage ranges in one place
//!
//! Damage ranges are inclusive on both ends.

use std::ops::RangeInclusive;

// Attack
pub const ATTACK_COST: u32 = 10;
pub const ATTACK_DAMAGE: RangeInclusive<u32> = 10..=20;

// Special
pub const SPECIAL_COST: u32 = 20;
pub const SPECIAL_DAMAGE: RangeInclusive<u32> = 25..=35;

// Regenerate
pub const REGENERATE_COST: u32 = 0;
pub const REGENERATE_AMOUNT: u32 = 5;
