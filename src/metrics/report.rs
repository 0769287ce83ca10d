//! Per-label precision, recall and F1 with zero-division-safe semantics
//!
//! A ratio with an empty denominator scores 1.0 instead of failing. Labels
//! with no true instances carry zero weight in the weighted F1.

use serde::{Deserialize, Serialize};

use crate::core::Move;
use crate::metrics::ConfusionMatrix;

/// Score used when a ratio's denominator is zero
pub const ZERO_DIVISION_SCORE: f64 = 1.0;

fn ratio(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        ZERO_DIVISION_SCORE
    } else {
        f64::from(numerator) / f64::from(denominator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: Move,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub labels: Vec<LabelScore>,
    pub weighted_f1: f64,
    pub accuracy: f64,
}

impl ClassificationReport {
    pub fn from_matrix(matrix: &ConfusionMatrix) -> Self {
        let labels: Vec<LabelScore> = Move::ALL
            .iter()
            .map(|&label| label_score(matrix, label))
            .collect();

        let correct: u32 = Move::ALL.iter().map(|&l| matrix.true_positives(l)).sum();

        Self {
            weighted_f1: weighted_f1(&labels),
            accuracy: ratio(correct, matrix.total()),
            labels,
        }
    }

    pub fn label(&self, label: Move) -> Option<&LabelScore> {
        self.labels.iter().find(|s| s.label == label)
    }
}

fn label_score(matrix: &ConfusionMatrix, label: Move) -> LabelScore {
    let tp = matrix.true_positives(label);
    let support = matrix.row_total(label);
    let predicted = matrix.column_total(label);
    let fp = predicted - tp;
    let fn_ = support - tp;

    LabelScore {
        label,
        precision: ratio(tp, predicted),
        recall: ratio(tp, support),
        f1: ratio(2 * tp, 2 * tp + fp + fn_),
        support,
    }
}

fn weighted_f1(scores: &[LabelScore]) -> f64 {
    let total: u32 = scores.iter().map(|s| s.support).sum();
    if total == 0 {
        return ZERO_DIVISION_SCORE;
    }
    let weighted: f64 = scores.iter().map(|s| s.f1 * f64::from(s.support)).sum();
    (weighted / f64::from(total)).clamp(0.0, 1.0)
}

impl std::fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:>12}{:>11}{:>11}{:>11}{:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        for s in &self.labels {
            writeln!(
                f,
                "{:>12}{:>11.2}{:>11.2}{:>11.2}{:>9}",
                s.label.label(),
                s.precision,
                s.recall,
                s.f1,
                s.support
            )?;
        }
        writeln!(f, "{:>12}{:>33.2}", "accuracy", self.accuracy)?;
        write!(f, "{:>12}{:>33.2}", "weighted f1", self.weighted_f1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_agreement_scores_one() {
        let m = ConfusionMatrix::from_pairs([
            (Move::Attack, Move::Attack),
            (Move::Special, Move::Special),
        ]);
        let report = ClassificationReport::from_matrix(&m);
        assert!((report.weighted_f1 - 1.0).abs() < 1e-12);
        assert!((report.accuracy - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_total_disagreement_scores_zero() {
        let m = ConfusionMatrix::from_pairs([
            (Move::Attack, Move::Special),
            (Move::Special, Move::Attack),
        ]);
        let report = ClassificationReport::from_matrix(&m);
        assert_eq!(report.weighted_f1, 0.0);
    }

    #[test]
    fn test_label_without_predictions_uses_zero_division_precision() {
        // Regenerate is actual once but never predicted
        let m = ConfusionMatrix::from_pairs([
            (Move::Attack, Move::Attack),
            (Move::Regenerate, Move::Attack),
        ]);
        let report = ClassificationReport::from_matrix(&m);
        let regen = report.label(Move::Regenerate).unwrap();
        assert_eq!(regen.precision, ZERO_DIVISION_SCORE);
        assert_eq!(regen.recall, 0.0);
        assert_eq!(regen.f1, 0.0);

        // attack: tp=1 fp=1 fn=0 -> f1 = 2/3, weight 1 of 2
        let expected = (2.0 / 3.0) / 2.0;
        assert!((report.weighted_f1 - expected).abs() < 1e-12);
    }

    #[test]
    fn test_unseen_label_has_zero_weight() {
        let m = ConfusionMatrix::from_pairs([
            (Move::Attack, Move::Attack),
            (Move::Attack, Move::Special),
        ]);
        let report = ClassificationReport::from_matrix(&m);
        let special = report.label(Move::Special).unwrap();
        assert_eq!(special.support, 0);
        // only attack carries weight: tp=1 fn=1 -> f1 = 2/3
        assert!((report.weighted_f1 - 2.0 / 3.0).abs() < 1e-12);
    }
}
