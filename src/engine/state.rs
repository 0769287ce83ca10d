//! Round state machine phases
//!
//! AwaitingInput -> Resolving -> Evaluating -> AwaitingInput | Terminal.
//! Resolving and Evaluating only exist while a submitted move is being
//! processed; callers observe AwaitingInput or Terminal.

use serde::{Deserialize, Serialize};

use crate::combat::Combatant;
use crate::core::Winner;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    #[default]
    AwaitingInput,
    Resolving,
    Evaluating,
    Terminal(Winner),
}

impl RoundPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RoundPhase::Terminal(_))
    }

    pub fn winner(&self) -> Option<Winner> {
        match self {
            RoundPhase::Terminal(w) => Some(*w),
            _ => None,
        }
    }
}

/// Decide whether the battle is over after a round
///
/// Both sides at zero health is a stalemate regardless of evaluation order.
/// With `stalemate_on_exhaustion`, both sides out of resource (and both still
/// standing) is a stalemate too.
pub fn evaluate_terminal(
    player: &Combatant,
    opponent: &Combatant,
    stalemate_on_exhaustion: bool,
) -> Option<Winner> {
    match (player.is_defeated(), opponent.is_defeated()) {
        (true, true) => Some(Winner::Stalemate),
        (false, true) => Some(Winner::Player),
        (true, false) => Some(Winner::Opponent),
        (false, false) => {
            if stalemate_on_exhaustion && player.is_exhausted() && opponent.is_exhausted() {
                Some(Winner::Stalemate)
            } else {
                None
            }
        }
    }
}
