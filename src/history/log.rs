//! In-memory append-only history
//!
//! Insertion order is round order. Records are never mutated or removed.

use crate::history::{HistoryRecord, TrainingSample};

#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    records: Vec<HistoryRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<HistoryRecord>) -> Self {
        Self { records }
    }

    pub fn append(&mut self, record: HistoryRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }

    /// Full ordered training sequence, rebuilt from the records
    pub fn training_samples(&self) -> Vec<TrainingSample> {
        self.records.iter().map(HistoryRecord::training_sample).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Move;

    fn record(round: u32, player: Move, opponent: Move) -> HistoryRecord {
        HistoryRecord {
            round,
            player_move: player,
            opponent_move: opponent,
            player_damage: 0,
            opponent_damage: 0,
            player_resource_used: 0,
            opponent_resource_used: 0,
        }
    }

    #[test]
    fn test_samples_follow_insertion_order() {
        let mut log = HistoryLog::new();
        log.append(record(1, Move::Attack, Move::Special));
        log.append(record(2, Move::Regenerate, Move::Attack));

        let samples = log.training_samples();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0], TrainingSample::new(Move::Attack, Move::Special));
        assert_eq!(samples[1], TrainingSample::new(Move::Regenerate, Move::Attack));
        assert_eq!(log.last().map(|r| r.round), Some(2));
    }
}
