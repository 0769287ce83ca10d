//! Mutable resource record for one side of the duel

use serde::{Deserialize, Serialize};

use crate::core::{CombatantConfig, Move};

/// Per-move selection counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveUsage([u32; Move::COUNT]);

impl MoveUsage {
    pub fn get(&self, mv: Move) -> u32 {
        self.0[mv.index()]
    }

    pub fn record(&mut self, mv: Move) {
        self.0[mv.index()] += 1;
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Most selected move, ties going to the lowest ordinal
    pub fn favourite(&self) -> Option<Move> {
        let mut best: Option<(Move, u32)> = None;
        for mv in Move::ALL {
            let count = self.get(mv);
            if count > 0 && best.map_or(true, |(_, c)| count > c) {
                best = Some((mv, count));
            }
        }
        best.map(|(mv, _)| mv)
    }
}

/// Combat state for one side
///
/// Health and resource never go below zero; resource never exceeds
/// `max_resource`. Health has no upper clamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub health: u32,
    /// Health at the start of a battle (restored on restart)
    pub starting_health: u32,
    pub resource: u32,
    pub max_resource: u32,
    pub total_damage_dealt: u32,
    pub move_usage: MoveUsage,
    pub wins: u32,
    pub losses: u32,
}

impl Combatant {
    pub fn new(name: impl Into<String>, health: u32, max_resource: u32) -> Self {
        Self {
            name: name.into(),
            health,
            starting_health: health,
            resource: max_resource,
            max_resource,
            total_damage_dealt: 0,
            move_usage: MoveUsage::default(),
            wins: 0,
            losses: 0,
        }
    }

    pub fn from_config(config: &CombatantConfig) -> Self {
        Self::new(config.name.clone(), config.health, config.max_resource)
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    pub fn is_exhausted(&self) -> bool {
        self.resource == 0
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.resource >= cost
    }

    /// Apply damage (clamped at zero)
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Spend resource (clamped at zero)
    pub fn spend(&mut self, amount: u32) {
        self.resource = self.resource.saturating_sub(amount);
    }

    /// Restore resource up to the cap, returning the amount actually gained
    ///
    /// Resource above the cap is clamped down to it and counts as no gain.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let before = self.resource;
        self.resource = self.resource.saturating_add(amount).min(self.max_resource);
        self.resource.saturating_sub(before)
    }

    /// Reset battle state for a new battle; win/loss tallies survive
    pub fn reset_for_battle(&mut self) {
        self.health = self.starting_health;
        self.resource = self.max_resource;
        self.total_damage_dealt = 0;
        self.move_usage = MoveUsage::default();
    }
}
