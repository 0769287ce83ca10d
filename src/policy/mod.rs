//! Opponent move selection
//!
//! The adaptive policy is an ensemble of three interchangeable classifiers,
//! each fit on (player move -> opponent move) samples and queried with the
//! player's latest move as the single feature. The side that drives a
//! `RoundEngine` as opponent is any `DecisionPolicy`.

pub mod bayes;
pub mod ensemble;
pub mod forest;
pub mod neural;
pub mod scripted;

pub use bayes::GaussianNaiveBayes;
pub use ensemble::AdaptivePolicy;
pub use forest::RandomForest;
pub use neural::NeuralClassifier;
pub use scripted::ScriptedPolicy;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::Move;
use crate::history::TrainingSample;

/// Probability per label, indexed by `Move::index`
pub type Distribution = [f64; Move::COUNT];

/// Confidence reported when no meaningful probability is available
pub const DEFAULT_CONFIDENCE: f64 = 33.3;

/// Samples required before the classifiers are fit or consulted
pub const MIN_SAMPLES: usize = 2;

pub fn uniform() -> Distribution {
    [1.0 / Move::COUNT as f64; Move::COUNT]
}

pub fn is_defined(dist: &Distribution) -> bool {
    dist.iter().all(|p| p.is_finite())
}

/// Highest-probability label; ties and undefined entries go to the lowest ordinal
pub fn argmax(dist: &Distribution) -> (Move, f64) {
    let mut best = 0;
    for i in 1..Move::COUNT {
        if dist[i] > dist[best] || (dist[best].is_nan() && !dist[i].is_nan()) {
            best = i;
        }
    }
    (Move::ALL[best], dist[best])
}

/// Relative label frequencies of a slice of samples
pub fn label_frequencies(samples: &[TrainingSample]) -> Distribution {
    let mut counts = [0.0; Move::COUNT];
    for s in samples {
        counts[s.label.index()] += 1.0;
    }
    let total: f64 = counts.iter().sum();
    if total > 0.0 {
        counts.iter_mut().for_each(|c| *c /= total);
    }
    counts
}

/// Why a classifier refit was abandoned
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("need at least two samples, got {0}")]
    TooFewSamples(usize),

    #[error("loss diverged at epoch {epoch}")]
    Diverged { epoch: usize },
}

/// A probabilistic classifier over the single move feature
///
/// `fit` is a full batch refit from the given samples. On error the
/// previously fitted state must be left untouched.
pub trait Classifier: std::fmt::Debug {
    fn name(&self) -> &'static str;

    fn fit(&mut self, samples: &[TrainingSample]) -> Result<(), FitError>;

    /// May contain NaN when the fitted model is numerically degenerate
    fn predict_proba(&self, feature: Move) -> Distribution;
}

/// Where a prediction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionSource {
    /// Too little history; uniformly random move
    ColdStart,
    /// Averaged ensemble output
    Ensemble,
    /// Some classifier output was undefined; default confidence reported
    Degenerate,
    /// Fixed script, no learning
    Scripted,
}

/// One prediction: the move to play and how sure the policy is
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicySnapshot {
    pub predicted: Move,
    /// Percentage in [0, 100]
    pub confidence: f64,
    pub source: PredictionSource,
}

/// Pluggable move selection for the opponent side
pub trait DecisionPolicy {
    /// Choose a move given the player's move this round
    fn decide(&mut self, feature: Move, rng: &mut dyn RngCore) -> PolicySnapshot;

    /// Refit from the complete ordered sample sequence
    fn train(&mut self, samples: &[TrainingSample]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_breaks_ties_low() {
        let (mv, p) = argmax(&[0.4, 0.4, 0.2]);
        assert_eq!(mv, Move::Attack);
        assert!((p - 0.4).abs() < 1e-12);
        assert_eq!(argmax(&[0.2, 0.4, 0.4]).0, Move::Special);
    }

    #[test]
    fn test_argmax_skips_nan() {
        assert_eq!(argmax(&[f64::NAN, 0.1, 0.0]).0, Move::Special);
    }

    #[test]
    fn test_label_frequencies() {
        let samples = [
            TrainingSample::new(Move::Attack, Move::Special),
            TrainingSample::new(Move::Attack, Move::Special),
            TrainingSample::new(Move::Attack, Move::Attack),
            TrainingSample::new(Move::Attack, Move::Regenerate),
        ];
        assert_eq!(label_frequencies(&samples), [0.25, 0.5, 0.25]);
    }
}
