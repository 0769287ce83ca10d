//! Player move sources
//!
//! The player side never predicts anything; its moves are supplied from
//! outside. These sources stand in for keyboard input in headless runs.

use rand::distributions::{Distribution, WeightedIndex};
use rand::RngCore;
use std::collections::VecDeque;

use crate::core::Move;

pub trait MoveSource {
    /// Next player move, or `None` when the source is exhausted
    fn next_move(&mut self, rng: &mut dyn RngCore) -> Option<Move>;
}

/// Plays a fixed list once
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    moves: VecDeque<Move>,
}

impl ScriptedInput {
    pub fn new(moves: impl IntoIterator<Item = Move>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
        }
    }
}

impl MoveSource for ScriptedInput {
    fn next_move(&mut self, _rng: &mut dyn RngCore) -> Option<Move> {
        self.moves.pop_front()
    }
}

/// Loops over a pattern forever
#[derive(Debug, Clone)]
pub struct CyclingInput {
    pattern: Vec<Move>,
    cursor: usize,
}

impl CyclingInput {
    pub fn new(pattern: Vec<Move>) -> Self {
        Self { pattern, cursor: 0 }
    }
}

impl MoveSource for CyclingInput {
    fn next_move(&mut self, _rng: &mut dyn RngCore) -> Option<Move> {
        if self.pattern.is_empty() {
            return None;
        }
        let mv = self.pattern[self.cursor % self.pattern.len()];
        self.cursor += 1;
        Some(mv)
    }
}

/// Draws moves with fixed relative weights (Attack, Special, Regenerate)
#[derive(Debug, Clone)]
pub struct RandomInput {
    weights: WeightedIndex<u32>,
}

impl RandomInput {
    /// `None` if every weight is zero
    pub fn new(weights: [u32; Move::COUNT]) -> Option<Self> {
        WeightedIndex::new(weights).ok().map(|weights| Self { weights })
    }
}

impl MoveSource for RandomInput {
    fn next_move(&mut self, rng: &mut dyn RngCore) -> Option<Move> {
        Move::from_index(self.weights.sample(rng))
    }
}
