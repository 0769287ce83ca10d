//! Fixed 3x3 confusion matrix over the move labels
//!
//! Indexed `[actual][predicted]`. Labels that never appear still get an
//! all-zero row and column.

use serde::{Deserialize, Serialize};

use crate::core::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    counts: [[u32; Move::COUNT]; Move::COUNT],
}

impl ConfusionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally (actual, predicted) pairs
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Move, Move)>) -> Self {
        let mut matrix = Self::new();
        for (actual, predicted) in pairs {
            matrix.record(actual, predicted);
        }
        matrix
    }

    pub fn record(&mut self, actual: Move, predicted: Move) {
        self.counts[actual.index()][predicted.index()] += 1;
    }

    pub fn get(&self, actual: Move, predicted: Move) -> u32 {
        self.counts[actual.index()][predicted.index()]
    }

    pub fn rows(&self) -> &[[u32; Move::COUNT]; Move::COUNT] {
        &self.counts
    }

    /// Number of samples whose actual label is `label` (its support)
    pub fn row_total(&self, label: Move) -> u32 {
        self.counts[label.index()].iter().sum()
    }

    /// Number of samples predicted as `label`
    pub fn column_total(&self, label: Move) -> u32 {
        self.counts.iter().map(|row| row[label.index()]).sum()
    }

    pub fn true_positives(&self, label: Move) -> u32 {
        self.get(label, label)
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().flatten().sum()
    }
}

impl std::fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>12}", "")?;
        for mv in Move::ALL {
            write!(f, "{:>12}", mv.label())?;
        }
        writeln!(f)?;
        for actual in Move::ALL {
            write!(f, "{:>12}", actual.label())?;
            for predicted in Move::ALL {
                write!(f, "{:>12}", self.get(actual, predicted))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
