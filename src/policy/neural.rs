//! Small feed-forward classifier
//!
//! One tanh hidden layer, softmax output over the three labels, trained by
//! full-batch gradient descent on cross-entropy. The input is the move
//! ordinal centred on zero.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::Move;
use crate::history::TrainingSample;
use crate::policy::{uniform, Classifier, Distribution, FitError, MIN_SAMPLES};

const OUTPUTS: usize = Move::COUNT;

fn encode(feature: Move) -> f64 {
    feature.feature() - 2.0
}

/// Numerically stable softmax
fn softmax(logits: &[f64; OUTPUTS]) -> Distribution {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exp = logits.map(|z| (z - max).exp());
    let sum: f64 = exp.iter().sum();
    exp.map(|e| e / sum)
}

#[derive(Debug, Clone, PartialEq)]
struct Weights {
    /// Input -> hidden (single input)
    w1: Vec<f64>,
    b1: Vec<f64>,
    /// Hidden -> output, `w2[h][o]`
    w2: Vec<[f64; OUTPUTS]>,
    b2: [f64; OUTPUTS],
}

impl Weights {
    fn init(hidden: usize, rng: &mut ChaCha8Rng) -> Self {
        let limit1 = (6.0 / (1.0 + hidden as f64)).sqrt();
        let limit2 = (6.0 / (hidden as f64 + OUTPUTS as f64)).sqrt();
        let w1 = (0..hidden).map(|_| rng.gen_range(-limit1..limit1)).collect();
        let w2 = (0..hidden)
            .map(|_| {
                let mut row = [0.0; OUTPUTS];
                row.iter_mut().for_each(|w| *w = rng.gen_range(-limit2..limit2));
                row
            })
            .collect();
        Self {
            w1,
            b1: vec![0.0; hidden],
            w2,
            b2: [0.0; OUTPUTS],
        }
    }

    fn hidden(&self, x: f64) -> Vec<f64> {
        self.w1
            .iter()
            .zip(&self.b1)
            .map(|(w, b)| (w * x + b).tanh())
            .collect()
    }

    fn forward(&self, x: f64) -> (Vec<f64>, Distribution) {
        let h = self.hidden(x);
        let mut logits = self.b2;
        for (hj, row) in h.iter().zip(&self.w2) {
            for o in 0..OUTPUTS {
                logits[o] += row[o] * hj;
            }
        }
        (h, softmax(&logits))
    }

    fn is_finite(&self) -> bool {
        self.w1.iter().chain(&self.b1).all(|v| v.is_finite())
            && self.w2.iter().flatten().chain(&self.b2).all(|v| v.is_finite())
    }

    /// One full-batch gradient step, returning the mean loss before the step
    fn step(&mut self, samples: &[TrainingSample], learning_rate: f64) -> f64 {
        let hidden = self.w1.len();
        let n = samples.len() as f64;

        let mut gw1 = vec![0.0; hidden];
        let mut gb1 = vec![0.0; hidden];
        let mut gw2 = vec![[0.0; OUTPUTS]; hidden];
        let mut gb2 = [0.0; OUTPUTS];
        let mut loss = 0.0;

        for sample in samples {
            let x = encode(sample.feature);
            let (h, p) = self.forward(x);
            let target = sample.label.index();
            loss -= p[target].max(f64::MIN_POSITIVE).ln();

            let mut dz = p;
            dz[target] -= 1.0;

            for j in 0..hidden {
                let mut dh = 0.0;
                for o in 0..OUTPUTS {
                    gw2[j][o] += dz[o] * h[j];
                    dh += self.w2[j][o] * dz[o];
                }
                let dpre = dh * (1.0 - h[j] * h[j]);
                gw1[j] += dpre * x;
                gb1[j] += dpre;
            }
            for o in 0..OUTPUTS {
                gb2[o] += dz[o];
            }
        }

        let scale = learning_rate / n;
        for j in 0..hidden {
            self.w1[j] -= scale * gw1[j];
            self.b1[j] -= scale * gb1[j];
            for o in 0..OUTPUTS {
                self.w2[j][o] -= scale * gw2[j][o];
            }
        }
        for o in 0..OUTPUTS {
            self.b2[o] -= scale * gb2[o];
        }

        loss / n
    }
}

#[derive(Debug, Clone)]
pub struct NeuralClassifier {
    hidden_units: usize,
    epochs: usize,
    learning_rate: f64,
    seed: u64,
    weights: Option<Weights>,
}

impl NeuralClassifier {
    pub fn new(hidden_units: usize, epochs: usize, learning_rate: f64, seed: u64) -> Self {
        Self {
            hidden_units,
            epochs,
            learning_rate,
            seed,
            weights: None,
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.weights.is_some()
    }
}

impl Classifier for NeuralClassifier {
    fn name(&self) -> &'static str {
        "neural"
    }

    fn fit(&mut self, samples: &[TrainingSample]) -> Result<(), FitError> {
        if samples.len() < MIN_SAMPLES {
            return Err(FitError::TooFewSamples(samples.len()));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut weights = Weights::init(self.hidden_units, &mut rng);

        for epoch in 0..self.epochs {
            let loss = weights.step(samples, self.learning_rate);
            if !loss.is_finite() || !weights.is_finite() {
                return Err(FitError::Diverged { epoch });
            }
        }

        self.weights = Some(weights);
        Ok(())
    }

    fn predict_proba(&self, feature: Move) -> Distribution {
        match &self.weights {
            Some(weights) => weights.forward(encode(feature)).1,
            None => uniform(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(pairs: &[(Move, Move)]) -> Vec<TrainingSample> {
        pairs.iter().map(|&(f, l)| TrainingSample::new(f, l)).collect()
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let p = softmax(&[1000.0, 999.0, -5.0]);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(p[0] > p[1] && p[1] > p[2]);
    }

    #[test]
    fn test_learns_mapping() {
        let mut data = Vec::new();
        for _ in 0..6 {
            data.push((Move::Attack, Move::Special));
            data.push((Move::Special, Move::Regenerate));
            data.push((Move::Regenerate, Move::Attack));
        }
        let mut net = NeuralClassifier::new(8, 1500, 0.5, 3);
        net.fit(&samples(&data)).unwrap();

        assert_eq!(crate::policy::argmax(&net.predict_proba(Move::Attack)).0, Move::Special);
        assert_eq!(crate::policy::argmax(&net.predict_proba(Move::Special)).0, Move::Regenerate);
        assert_eq!(crate::policy::argmax(&net.predict_proba(Move::Regenerate)).0, Move::Attack);
    }

    #[test]
    fn test_divergence_keeps_previous_fit() {
        let data = samples(&[(Move::Attack, Move::Special), (Move::Regenerate, Move::Attack)]);
        let mut net = NeuralClassifier::new(4, 50, 0.5, 1);
        net.fit(&data).unwrap();
        let before = net.predict_proba(Move::Attack);

        net.learning_rate = f64::INFINITY;
        assert!(matches!(net.fit(&data), Err(FitError::Diverged { .. })));
        assert_eq!(net.predict_proba(Move::Attack), before);
    }

    #[test]
    fn test_unfitted_is_uniform() {
        let net = NeuralClassifier::new(4, 10, 0.1, 0);
        assert!(!net.is_fitted());
        assert_eq!(net.predict_proba(Move::Special), uniform());
    }
}
