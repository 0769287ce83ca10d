//! Predictability metrics derived from the history log
//!
//! Pairs are (player move, opponent move) treated as (actual, predicted):
//! the matrix measures how the opponent's choices line up with the player's,
//! not classifier accuracy in the usual sense. Everything is recomputed from
//! the full log on every update.

pub mod confusion;
pub mod report;

pub use confusion::ConfusionMatrix;
pub use report::{ClassificationReport, LabelScore};

use serde::{Deserialize, Serialize};

use crate::core::Move;
use crate::history::HistoryRecord;

/// Minimum rounds before metrics are defined
pub const MIN_ROUNDS: usize = 2;

/// Why metrics could not be computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnavailableReason {
    TooFewRounds { rounds: usize },
    SingleLabel { label: Move },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MetricsSnapshot {
    /// Undefined, which is distinct from a computed 0.0
    Unavailable { reason: UnavailableReason },
    Available {
        confusion: ConfusionMatrix,
        weighted_f1: f64,
        report: ClassificationReport,
    },
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        MetricsSnapshot::Unavailable {
            reason: UnavailableReason::TooFewRounds { rounds: 0 },
        }
    }
}

impl MetricsSnapshot {
    /// Compute metrics over a full ordered history
    pub fn compute(history: &[HistoryRecord]) -> Self {
        if history.len() < MIN_ROUNDS {
            return MetricsSnapshot::Unavailable {
                reason: UnavailableReason::TooFewRounds {
                    rounds: history.len(),
                },
            };
        }

        let first = history[0].opponent_move;
        if history.iter().all(|r| r.opponent_move == first) {
            return MetricsSnapshot::Unavailable {
                reason: UnavailableReason::SingleLabel { label: first },
            };
        }

        let confusion =
            ConfusionMatrix::from_pairs(history.iter().map(|r| (r.player_move, r.opponent_move)));
        let report = ClassificationReport::from_matrix(&confusion);

        MetricsSnapshot::Available {
            confusion,
            weighted_f1: report.weighted_f1,
            report,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, MetricsSnapshot::Available { .. })
    }

    pub fn weighted_f1(&self) -> Option<f64> {
        match self {
            MetricsSnapshot::Available { weighted_f1, .. } => Some(*weighted_f1),
            MetricsSnapshot::Unavailable { .. } => None,
        }
    }

    pub fn confusion(&self) -> Option<&ConfusionMatrix> {
        match self {
            MetricsSnapshot::Available { confusion, .. } => Some(confusion),
            MetricsSnapshot::Unavailable { .. } => None,
        }
    }
}

/// Holds the latest snapshot for the presentation layer
#[derive(Debug, Clone, Default)]
pub struct MetricsTracker {
    latest: MetricsSnapshot,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute from the entire history
    pub fn update(&mut self, history: &[HistoryRecord]) -> &MetricsSnapshot {
        self.latest = MetricsSnapshot::compute(history);
        &self.latest
    }

    pub fn latest(&self) -> &MetricsSnapshot {
        &self.latest
    }
}
