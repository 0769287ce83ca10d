//! Round records and the training samples derived from them

use serde::{Deserialize, Serialize};

use crate::combat::Outcome;
use crate::core::{Move, Round};

/// One completed round; immutable once appended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub round: Round,
    pub player_move: Move,
    pub opponent_move: Move,
    pub player_damage: u32,
    pub opponent_damage: u32,
    pub player_resource_used: u32,
    pub opponent_resource_used: u32,
}

impl HistoryRecord {
    /// Build a record from both sides' outcomes, player first
    pub fn from_outcomes(round: Round, player: &Outcome, opponent: &Outcome) -> Self {
        Self {
            round,
            player_move: player.chosen,
            opponent_move: opponent.chosen,
            player_damage: player.damage_dealt,
            opponent_damage: opponent.damage_dealt,
            player_resource_used: player.resource_spent,
            opponent_resource_used: opponent.resource_spent,
        }
    }

    pub fn training_sample(&self) -> TrainingSample {
        TrainingSample {
            feature: self.player_move,
            label: self.opponent_move,
        }
    }
}

/// (player move, opponent move) pair the policy is fit on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrainingSample {
    pub feature: Move,
    pub label: Move,
}

impl TrainingSample {
    pub fn new(feature: Move, label: Move) -> Self {
        Self { feature, label }
    }
}
