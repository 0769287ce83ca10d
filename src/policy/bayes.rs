//! Gaussian naive Bayes over the single move feature
//!
//! Per-label prior, mean and variance. Variances are smoothed by a tiny
//! fraction of the overall feature variance; when every sample shares the
//! same feature value that fraction is zero and the likelihood is undefined
//! (NaN). Callers are expected to guard against that.

use crate::core::Move;
use crate::history::TrainingSample;
use crate::policy::{uniform, Classifier, Distribution, FitError, MIN_SAMPLES};

/// Fraction of the overall feature variance added to every label variance
pub const VAR_SMOOTHING: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
struct LabelModel {
    log_prior: f64,
    mean: f64,
    variance: f64,
}

fn mean_variance(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let n = values.clone().count() as f64;
    let mean = values.clone().sum::<f64>() / n;
    let variance = values.map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance)
}

#[derive(Debug, Clone, Default)]
pub struct GaussianNaiveBayes {
    /// `None` for labels absent from the training data
    labels: Option<[Option<LabelModel>; Move::COUNT]>,
}

impl GaussianNaiveBayes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fitted(&self) -> bool {
        self.labels.is_some()
    }
}

impl Classifier for GaussianNaiveBayes {
    fn name(&self) -> &'static str {
        "naive_bayes"
    }

    fn fit(&mut self, samples: &[TrainingSample]) -> Result<(), FitError> {
        if samples.len() < MIN_SAMPLES {
            return Err(FitError::TooFewSamples(samples.len()));
        }

        let n = samples.len() as f64;
        let (_, overall_variance) = mean_variance(samples.iter().map(|s| s.feature.feature()));
        let epsilon = VAR_SMOOTHING * overall_variance;

        let mut labels = [None; Move::COUNT];
        for label in Move::ALL {
            let values = samples
                .iter()
                .filter(move |s| s.label == label)
                .map(|s| s.feature.feature());
            let count = values.clone().count();
            if count == 0 {
                continue;
            }
            let (mean, variance) = mean_variance(values);
            labels[label.index()] = Some(LabelModel {
                log_prior: (count as f64 / n).ln(),
                mean,
                variance: variance + epsilon,
            });
        }

        self.labels = Some(labels);
        Ok(())
    }

    fn predict_proba(&self, feature: Move) -> Distribution {
        let Some(labels) = self.labels else {
            return uniform();
        };

        let x = feature.feature();
        let joint: [Option<f64>; Move::COUNT] = labels.map(|model| {
            model.map(|m| {
                m.log_prior
                    - 0.5 * (2.0 * std::f64::consts::PI * m.variance).ln()
                    - (x - m.mean).powi(2) / (2.0 * m.variance)
            })
        });

        // log-sum-exp over the labels that were seen
        let max = joint
            .iter()
            .flatten()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let norm = max
            + joint
                .iter()
                .flatten()
                .map(|j| (j - max).exp())
                .sum::<f64>()
                .ln();

        joint.map(|j| j.map_or(0.0, |j| (j - norm).exp()))
    }
}
