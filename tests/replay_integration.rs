//! Warm start from a durable log
//!
//! The policy is refit from the full history every round, so replaying a log
//! and then playing on must land in the same state as one fresh fit.

use adaptive_arena::core::{ArenaConfig, Move, PolicyConfig};
use adaptive_arena::engine::{RoundEngine, Session};
use adaptive_arena::history::{DurableLog, HistoryRecord};
use adaptive_arena::policy::AdaptivePolicy;
use std::fs;
use std::path::PathBuf;

fn temp_log(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "adaptive_arena_replay_{}_{}.csv",
        name,
        std::process::id()
    ));
    let _ = fs::remove_file(&path);
    path
}

fn config() -> ArenaConfig {
    let mut config = ArenaConfig::default();
    config.policy = PolicyConfig {
        forest_trees: 7,
        epochs: 60,
        ..PolicyConfig::default()
    };
    config
}

fn seed_log(log: &DurableLog, n: usize) {
    for i in 0..n {
        let record = HistoryRecord {
            round: i as u32 + 1,
            player_move: Move::ALL[i % Move::COUNT],
            opponent_move: Move::ALL[(i + 1) % Move::COUNT],
            player_damage: 11,
            opponent_damage: 27,
            player_resource_used: 10,
            opponent_resource_used: 20,
        };
        log.append(&record).unwrap();
    }
}

fn bits(dist: [f64; 3]) -> [u64; 3] {
    dist.map(f64::to_bits)
}

#[test]
fn test_replay_then_append_matches_fresh_fit() {
    let path = temp_log("pure");
    let log = DurableLog::new(&path);
    seed_log(&log, 9);

    let session = Session::seeded(config(), 21).with_log(&path);
    let mut engine = RoundEngine::new(session).unwrap();
    assert_eq!(engine.history().len(), 9);
    assert!(engine.policy().is_warm());

    engine.submit(Move::Special).unwrap();

    let stored = log.load().unwrap();
    assert_eq!(stored.len(), 10);

    let mut fresh = AdaptivePolicy::new(&config().policy);
    let samples: Vec<_> = stored.iter().map(HistoryRecord::training_sample).collect();
    fresh.train(&samples);

    for mv in Move::ALL {
        assert_eq!(
            bits(engine.policy().averaged(mv)),
            bits(fresh.averaged(mv)),
            "policy state diverged for feature {}",
            mv
        );
    }

    let _ = fs::remove_file(&path);
}

#[test]
fn test_missing_log_is_empty_history() {
    let path = temp_log("missing");
    let engine = RoundEngine::new(Session::seeded(config(), 22).with_log(&path)).unwrap();

    assert!(engine.history().is_empty());
    assert!(!engine.policy().is_warm());
    assert!(!engine.metrics().is_available());
}

#[test]
fn test_prior_history_feeds_metrics() {
    let path = temp_log("metrics");
    seed_log(&DurableLog::new(&path), 6);

    let engine = RoundEngine::new(Session::seeded(config(), 23).with_log(&path)).unwrap();

    // Cycling player vs shifted opponent: every prediction is off-diagonal
    let confusion = *engine.metrics().confusion().unwrap();
    assert_eq!(confusion.total(), 6);
    assert_eq!(confusion.get(Move::Attack, Move::Special), 2);
    assert_eq!(engine.metrics().weighted_f1(), Some(0.0));

    let _ = fs::remove_file(&path);
}

#[test]
fn test_corrupt_log_fails_session_start() {
    let path = temp_log("corrupt");
    fs::write(
        &path,
        "Round,PlayerMove,AIMove,PlayerDamage,AIDamage,PlayerMPUsed,AIMPUsed\n1,9,1,0,0,0,0\n",
    )
    .unwrap();

    let err = RoundEngine::new(Session::seeded(config(), 24).with_log(&path)).unwrap_err();
    assert!(!err.is_persistence());

    let _ = fs::remove_file(&path);
}
