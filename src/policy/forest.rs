//! Bagged CART trees over the single move feature
//!
//! Each tree is grown on a bootstrap resample with Gini impurity splits at
//! midpoints between distinct feature values. Leaves hold the label
//! frequencies of the samples that reached them.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::Move;
use crate::history::TrainingSample;
use crate::policy::{label_frequencies, uniform, Classifier, Distribution, FitError, MIN_SAMPLES};

/// Minimum impurity decrease for a split to be kept
const MIN_GAIN: f64 = 1e-12;

#[derive(Debug, Clone)]
enum Node {
    Leaf(Distribution),
    Split {
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn predict(&self, x: f64) -> &Distribution {
        match self {
            Node::Leaf(dist) => dist,
            Node::Split {
                threshold,
                left,
                right,
            } => {
                if x <= *threshold {
                    left.predict(x)
                } else {
                    right.predict(x)
                }
            }
        }
    }
}

fn gini(samples: &[TrainingSample]) -> f64 {
    1.0 - label_frequencies(samples).iter().map(|p| p * p).sum::<f64>()
}

fn candidate_thresholds(samples: &[TrainingSample]) -> Vec<f64> {
    let mut values: Vec<u32> = samples.iter().map(|s| s.feature.code()).collect();
    values.sort_unstable();
    values.dedup();
    values
        .windows(2)
        .map(|w| (f64::from(w[0]) + f64::from(w[1])) / 2.0)
        .collect()
}

fn grow(samples: &[TrainingSample], depth: usize, max_depth: usize) -> Node {
    let parent = gini(samples);
    if depth >= max_depth || samples.len() < 2 || parent <= 0.0 {
        return Node::Leaf(label_frequencies(samples));
    }

    let n = samples.len() as f64;
    let mut best: Option<(f64, f64)> = None;
    for threshold in candidate_thresholds(samples) {
        let (left, right): (Vec<TrainingSample>, Vec<TrainingSample>) =
            samples.iter().copied().partition(|s| s.feature.feature() <= threshold);
        let weighted = (left.len() as f64 * gini(&left) + right.len() as f64 * gini(&right)) / n;
        if best.map_or(true, |(_, impurity)| weighted < impurity) {
            best = Some((threshold, weighted));
        }
    }

    match best {
        Some((threshold, impurity)) if parent - impurity > MIN_GAIN => {
            let (left, right): (Vec<TrainingSample>, Vec<TrainingSample>) =
                samples.iter().copied().partition(|s| s.feature.feature() <= threshold);
            Node::Split {
                threshold,
                left: Box::new(grow(&left, depth + 1, max_depth)),
                right: Box::new(grow(&right, depth + 1, max_depth)),
            }
        }
        _ => Node::Leaf(label_frequencies(samples)),
    }
}

#[derive(Debug, Clone)]
pub struct RandomForest {
    n_trees: usize,
    max_depth: usize,
    seed: u64,
    trees: Vec<Node>,
}

impl RandomForest {
    pub fn new(n_trees: usize, max_depth: usize, seed: u64) -> Self {
        Self {
            n_trees,
            max_depth,
            seed,
            trees: Vec::new(),
        }
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }
}

impl Classifier for RandomForest {
    fn name(&self) -> &'static str {
        "random_forest"
    }

    fn fit(&mut self, samples: &[TrainingSample]) -> Result<(), FitError> {
        if samples.len() < MIN_SAMPLES {
            return Err(FitError::TooFewSamples(samples.len()));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let n = samples.len();
        let trees = (0..self.n_trees)
            .map(|_| {
                let bootstrap: Vec<TrainingSample> =
                    (0..n).map(|_| samples[rng.gen_range(0..n)]).collect();
                grow(&bootstrap, 0, self.max_depth)
            })
            .collect();

        self.trees = trees;
        Ok(())
    }

    fn predict_proba(&self, feature: Move) -> Distribution {
        if self.trees.is_empty() {
            return uniform();
        }
        let x = feature.feature();
        let mut sum = [0.0; Move::COUNT];
        for tree in &self.trees {
            for (acc, p) in sum.iter_mut().zip(tree.predict(x)) {
                *acc += p;
            }
        }
        let count = self.trees.len() as f64;
        sum.map(|p| p / count)
    }
}
