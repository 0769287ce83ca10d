//! Property tests over random move sequences

use adaptive_arena::combat::{resolve, Combatant};
use adaptive_arena::core::{ArenaConfig, Move, PolicyConfig};
use adaptive_arena::engine::{RoundEngine, ScriptedInput, Session};
use adaptive_arena::history::HistoryRecord;
use adaptive_arena::metrics::{ConfusionMatrix, MetricsSnapshot};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn any_move() -> impl Strategy<Value = Move> {
    prop_oneof![
        Just(Move::Attack),
        Just(Move::Special),
        Just(Move::Regenerate)
    ]
}

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

fn quick_config() -> ArenaConfig {
    let mut config = ArenaConfig::default();
    config.policy = PolicyConfig {
        forest_trees: 3,
        epochs: 10,
        ..PolicyConfig::default()
    };
    config
}

proptest! {
    #[test]
    fn resolution_keeps_bounds(
        moves in prop::collection::vec(any_move(), 1..60),
        resource in 0u32..60,
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut mover = Combatant::new("Hero", 100, 50);
        let mut target = Combatant::new("Adaptive AI", 100, 100);
        mover.resource = resource.min(mover.max_resource);

        for mv in moves {
            let health_before = target.health;
            let out = resolve(&mut mover, &mut target, mv, &mut rng);
            prop_assert!(mover.resource <= mover.max_resource);
            prop_assert!(target.health <= health_before);
            if !out.executed {
                prop_assert_eq!(out.damage_dealt, 0);
                prop_assert_eq!(out.resource_spent, 0);
            }
        }
    }

    #[test]
    fn confusion_totals_match_rounds(
        pairs in prop::collection::vec((any_move(), any_move()), 0..80),
    ) {
        let matrix = ConfusionMatrix::from_pairs(pairs.iter().copied());
        let rows: u32 = Move::ALL.iter().map(|&m| matrix.row_total(m)).sum();
        let cols: u32 = Move::ALL.iter().map(|&m| matrix.column_total(m)).sum();
        prop_assert_eq!(matrix.total() as usize, pairs.len());
        prop_assert_eq!(rows, matrix.total());
        prop_assert_eq!(cols, matrix.total());
    }

    #[test]
    fn weighted_f1_in_unit_range(
        pairs in prop::collection::vec((any_move(), any_move()), 0..80),
    ) {
        let history: Vec<HistoryRecord> = pairs
            .iter()
            .enumerate()
            .map(|(i, &(p, o))| record(i as u32 + 1, p, o))
            .collect();
        match MetricsSnapshot::compute(&history) {
            MetricsSnapshot::Available { weighted_f1, confusion, .. } => {
                prop_assert!((0.0..=1.0).contains(&weighted_f1));
                prop_assert_eq!(confusion.total() as usize, history.len());
            }
            MetricsSnapshot::Unavailable { .. } => {
                let distinct = Move::ALL
                    .iter()
                    .filter(|&&m| history.iter().any(|r| r.opponent_move == m))
                    .count();
                prop_assert!(history.len() < 2 || distinct < 2);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn engine_history_tracks_completed_rounds(
        moves in prop::collection::vec(any_move(), 1..25),
        seed in any::<u64>(),
    ) {
        let session = Session::seeded(quick_config(), seed).without_persistence();
        let mut engine = RoundEngine::new(session).unwrap();
        let mut input = ScriptedInput::new(moves.clone());

        let mut previous = 0;
        while !engine.phase().is_terminal() {
            if engine.run(&mut input, 1).is_err() {
                break;
            }
            let len = engine.history().len();
            prop_assert!(len >= previous);
            if len == previous {
                break;
            }
            previous = len;

            for c in [engine.player(), engine.opponent()] {
                prop_assert!(c.resource <= c.max_resource);
            }
            let snapshot = engine.metrics();
            if let Some(f1) = snapshot.weighted_f1() {
                prop_assert!((0.0..=1.0).contains(&f1));
            }
            if let Some(report) = engine.last_report() {
                prop_assert!((0.0..=100.0).contains(&report.prediction.confidence));
                prop_assert_eq!(report.round as usize, len);
            }
        }

        prop_assert!(engine.history().len() <= moves.len());
        let usage: u32 = Move::ALL.iter().map(|&m| engine.player().move_usage.get(m)).sum();
        prop_assert_eq!(usage as usize, engine.history().len());
    }
}
