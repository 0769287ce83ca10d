//! Fixed-script policy for tests and demos

use rand::RngCore;

use crate::core::Move;
use crate::history::TrainingSample;
use crate::policy::{DecisionPolicy, PolicySnapshot, PredictionSource};

/// Plays its script in order, looping; ignores training
#[derive(Debug, Clone)]
pub struct ScriptedPolicy {
    script: Vec<Move>,
    cursor: usize,
}

impl ScriptedPolicy {
    /// An empty script always plays Regenerate
    pub fn new(script: Vec<Move>) -> Self {
        Self { script, cursor: 0 }
    }

    pub fn always(mv: Move) -> Self {
        Self::new(vec![mv])
    }
}

impl DecisionPolicy for ScriptedPolicy {
    fn decide(&mut self, _feature: Move, _rng: &mut dyn RngCore) -> PolicySnapshot {
        let predicted = if self.script.is_empty() {
            Move::Regenerate
        } else {
            let mv = self.script[self.cursor % self.script.len()];
            self.cursor += 1;
            mv
        };
        PolicySnapshot {
            predicted,
            confidence: 100.0,
            source: PredictionSource::Scripted,
        }
    }

    fn train(&mut self, _samples: &[TrainingSample]) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_script_loops() {
        let mut policy = ScriptedPolicy::new(vec![Move::Attack, Move::Special]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let moves: Vec<Move> = (0..3)
            .map(|_| policy.decide(Move::Attack, &mut rng).predicted)
            .collect();
        assert_eq!(moves, vec![Move::Attack, Move::Special, Move::Attack]);
    }
}
