//! Adaptive opponent policy
//!
//! Averages the label distributions of a fixed list of classifiers. Every
//! `train` call refits all of them from the complete sample sequence, so the
//! policy is a pure function of (config, history). That costs O(history) per
//! round: fine for interactive play, not for long unattended sessions.

use rand::{Rng, RngCore};

use crate::core::{Move, PolicyConfig};
use crate::history::TrainingSample;
use crate::policy::{
    argmax, is_defined, Classifier, DecisionPolicy, Distribution, GaussianNaiveBayes,
    NeuralClassifier, PolicySnapshot, PredictionSource, RandomForest, DEFAULT_CONFIDENCE,
    MIN_SAMPLES,
};

/// Offsets so each classifier draws from its own stream of the policy seed
const FOREST_STREAM: u64 = 0x5eed_0001;
const NEURAL_STREAM: u64 = 0x5eed_0002;

#[derive(Debug)]
pub struct AdaptivePolicy {
    classifiers: Vec<Box<dyn Classifier>>,
    samples_seen: usize,
}

impl AdaptivePolicy {
    /// Forest, neural net and naive Bayes configured from `config`
    pub fn new(config: &PolicyConfig) -> Self {
        Self::with_classifiers(vec![
            Box::new(RandomForest::new(
                config.forest_trees,
                config.forest_max_depth,
                config.seed ^ FOREST_STREAM,
            )),
            Box::new(NeuralClassifier::new(
                config.hidden_units,
                config.epochs,
                config.learning_rate,
                config.seed ^ NEURAL_STREAM,
            )),
            Box::new(GaussianNaiveBayes::new()),
        ])
    }

    pub fn with_classifiers(classifiers: Vec<Box<dyn Classifier>>) -> Self {
        Self {
            classifiers,
            samples_seen: 0,
        }
    }

    /// Length of the sample sequence from the last `train` call
    pub fn samples_seen(&self) -> usize {
        self.samples_seen
    }

    pub fn is_warm(&self) -> bool {
        self.samples_seen >= MIN_SAMPLES
    }

    /// Per-classifier distributions for `feature`
    pub fn distributions(&self, feature: Move) -> Vec<Distribution> {
        self.classifiers
            .iter()
            .map(|c| c.predict_proba(feature))
            .collect()
    }

    /// Component-wise mean of all classifier distributions (may contain NaN)
    pub fn averaged(&self, feature: Move) -> Distribution {
        mean(&self.distributions(feature))
    }

    /// Predict the opponent move for the player's latest move
    pub fn predict<R: Rng + ?Sized>(&self, feature: Move, rng: &mut R) -> PolicySnapshot {
        if !self.is_warm() {
            return PolicySnapshot {
                predicted: Move::ALL[rng.gen_range(0..Move::COUNT)],
                confidence: DEFAULT_CONFIDENCE,
                source: PredictionSource::ColdStart,
            };
        }

        let distributions = self.distributions(feature);
        let averaged = mean(&distributions);
        if is_defined(&averaged) {
            let (predicted, p) = argmax(&averaged);
            return PolicySnapshot {
                predicted,
                confidence: (p * 100.0).clamp(0.0, 100.0),
                source: PredictionSource::Ensemble,
            };
        }

        // Undefined output somewhere: choose from the well-defined classifiers
        let usable: Vec<Distribution> = distributions.into_iter().filter(is_defined).collect();
        let predicted = if usable.is_empty() {
            Move::ALL[rng.gen_range(0..Move::COUNT)]
        } else {
            argmax(&mean(&usable)).0
        };
        tracing::warn!(
            feature = %feature,
            usable = usable.len(),
            "undefined probability from policy ensemble; using default confidence"
        );

        PolicySnapshot {
            predicted,
            confidence: DEFAULT_CONFIDENCE,
            source: PredictionSource::Degenerate,
        }
    }

    /// Refit every classifier from the full ordered sample sequence
    ///
    /// Needs at least two samples. A classifier that fails to fit keeps its
    /// previous state; failure is logged, never returned.
    pub fn train(&mut self, samples: &[TrainingSample]) {
        self.samples_seen = samples.len();
        if samples.len() < MIN_SAMPLES {
            return;
        }

        for classifier in &mut self.classifiers {
            if let Err(e) = classifier.fit(samples) {
                tracing::warn!(
                    classifier = classifier.name(),
                    samples = samples.len(),
                    "refit failed, keeping previous fit: {}",
                    e
                );
            }
        }
        tracing::debug!(samples = samples.len(), "policy refit complete");
    }
}

impl DecisionPolicy for AdaptivePolicy {
    fn decide(&mut self, feature: Move, rng: &mut dyn RngCore) -> PolicySnapshot {
        self.predict(feature, rng)
    }

    fn train(&mut self, samples: &[TrainingSample]) {
        AdaptivePolicy::train(self, samples)
    }
}

fn mean(distributions: &[Distribution]) -> Distribution {
    let mut sum = [0.0; Move::COUNT];
    for dist in distributions {
        for (acc, p) in sum.iter_mut().zip(dist) {
            *acc += p;
        }
    }
    let n = distributions.len().max(1) as f64;
    sum.map(|p| p / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::FitError;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[derive(Debug)]
    struct Fixed(Distribution);

    impl Classifier for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }
        fn fit(&mut self, _samples: &[TrainingSample]) -> Result<(), FitError> {
            Ok(())
        }
        fn predict_proba(&self, _feature: Move) -> Distribution {
            self.0
        }
    }

    fn warm(policy: &mut AdaptivePolicy) {
        policy.train(&[
            TrainingSample::new(Move::Attack, Move::Attack),
            TrainingSample::new(Move::Special, Move::Special),
        ]);
    }

    #[test]
    fn test_cold_start_uses_default_confidence() {
        let policy = AdaptivePolicy::new(&PolicyConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for _ in 0..10 {
            let snap = policy.predict(Move::Attack, &mut rng);
            assert_eq!(snap.confidence, DEFAULT_CONFIDENCE);
            assert_eq!(snap.source, PredictionSource::ColdStart);
        }
    }

    #[test]
    fn test_single_sample_is_still_cold() {
        let mut policy = AdaptivePolicy::new(&PolicyConfig::default());
        policy.train(&[TrainingSample::new(Move::Attack, Move::Special)]);
        assert!(!policy.is_warm());
    }

    #[test]
    fn test_average_and_confidence() {
        let mut policy = AdaptivePolicy::with_classifiers(vec![
            Box::new(Fixed([0.6, 0.3, 0.1])),
            Box::new(Fixed([0.2, 0.7, 0.1])),
        ]);
        warm(&mut policy);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let snap = policy.predict(Move::Attack, &mut rng);
        assert_eq!(snap.predicted, Move::Special);
        assert!((snap.confidence - 50.0).abs() < 1e-9);
        assert_eq!(snap.source, PredictionSource::Ensemble);
    }

    #[test]
    fn test_tie_goes_to_lowest_ordinal() {
        let mut policy = AdaptivePolicy::with_classifiers(vec![Box::new(Fixed([0.1, 0.45, 0.45]))]);
        warm(&mut policy);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(policy.predict(Move::Regenerate, &mut rng).predicted, Move::Special);
    }

    #[test]
    fn test_nan_falls_back_to_default_confidence() {
        let mut policy = AdaptivePolicy::with_classifiers(vec![
            Box::new(Fixed([f64::NAN, f64::NAN, 0.0])),
            Box::new(Fixed([0.1, 0.1, 0.8])),
        ]);
        warm(&mut policy);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let snap = policy.predict(Move::Attack, &mut rng);
        assert_eq!(snap.confidence, DEFAULT_CONFIDENCE);
        assert_eq!(snap.predicted, Move::Regenerate);
        assert_eq!(snap.source, PredictionSource::Degenerate);
    }

    #[test]
    fn test_all_nan_still_returns_a_move() {
        let mut policy =
            AdaptivePolicy::with_classifiers(vec![Box::new(Fixed([f64::NAN; Move::COUNT]))]);
        warm(&mut policy);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let snap = policy.predict(Move::Special, &mut rng);
        assert_eq!(snap.confidence, DEFAULT_CONFIDENCE);
    }

    #[test]
    fn test_constant_player_triggers_degenerate_guard() {
        let mut policy = AdaptivePolicy::new(&PolicyConfig::default());
        policy.train(&[
            TrainingSample::new(Move::Attack, Move::Special),
            TrainingSample::new(Move::Attack, Move::Regenerate),
            TrainingSample::new(Move::Attack, Move::Special),
        ]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let snap = policy.predict(Move::Attack, &mut rng);
        assert_eq!(snap.confidence, DEFAULT_CONFIDENCE);
        assert_eq!(snap.source, PredictionSource::Degenerate);
    }
}
