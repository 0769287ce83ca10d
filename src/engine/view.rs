//! Read-only snapshot handed to the presentation layer

use serde::{Deserialize, Serialize};

use crate::combat::Combatant;
use crate::core::{Result, Round};
use crate::engine::{RoundEngine, RoundPhase};
use crate::metrics::MetricsSnapshot;
use crate::policy::{DecisionPolicy, PolicySnapshot};

/// Shown before the first move of a battle
pub const NO_MOVE_YET: &str = "No move yet";

/// Share of remaining health per side, in percent (one decimal)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinProbability {
    pub player: f64,
    pub opponent: f64,
}

impl WinProbability {
    pub fn from_health(player: &Combatant, opponent: &Combatant) -> Self {
        let total = u64::from(player.health) + u64::from(opponent.health);
        if total == 0 {
            return Self {
                player: 0.0,
                opponent: 0.0,
            };
        }
        let share = |h: u32| (f64::from(h) / total as f64 * 1000.0).round() / 10.0;
        Self {
            player: share(player.health),
            opponent: share(opponent.health),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineView {
    pub round: Round,
    pub phase: RoundPhase,
    pub player: Combatant,
    pub opponent: Combatant,
    pub player_description: String,
    pub opponent_description: String,
    pub last_prediction: Option<PolicySnapshot>,
    pub metrics: MetricsSnapshot,
    pub win_probability: WinProbability,
    /// Most recent round lines, oldest first
    pub live_log: Vec<String>,
}

impl EngineView {
    /// Pretty JSON for external front ends
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<P: DecisionPolicy> RoundEngine<P> {
    pub fn view(&self) -> EngineView {
        let keep = self.session().config().session.live_log_len;
        let log = self.battle_log();
        let live_log = log[log.len().saturating_sub(keep)..].to_vec();

        let (player_description, opponent_description, last_prediction) = match self.last_report() {
            Some(report) => (
                report.player_description.clone(),
                report.opponent_description.clone(),
                Some(report.prediction),
            ),
            None => (NO_MOVE_YET.to_string(), NO_MOVE_YET.to_string(), None),
        };

        EngineView {
            round: self.round(),
            phase: self.phase(),
            player: self.player().clone(),
            opponent: self.opponent().clone(),
            player_description,
            opponent_description,
            last_prediction,
            metrics: self.metrics().clone(),
            win_probability: WinProbability::from_health(self.player(), self.opponent()),
            live_log,
        }
    }
}
