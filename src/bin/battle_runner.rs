//! Headless Battle Runner
//!
//! Plays scripted or random player moves against the adaptive opponent and
//! reports the outcome. Useful for checking how fast the policy picks up a
//! fixed pattern.

use adaptive_arena::core::{ArenaConfig, Move};
use adaptive_arena::engine::{CyclingInput, MoveSource, RandomInput, RoundEngine, Session};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

/// Headless Battle Runner - player strategy vs adaptive AI
#[derive(Parser, Debug)]
#[command(name = "battle_runner")]
#[command(about = "Play a battle against the adaptive AI with a fixed player strategy")]
struct Args {
    /// Player strategy: random, cycle, attack, special or regenerate
    #[arg(long, default_value = "cycle")]
    strategy: String,

    /// Maximum rounds before stopping (no winner)
    #[arg(long, default_value_t = 100)]
    rounds: usize,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Arena config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// History log to read and append to (defaults to the config's log path)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Keep history in memory only
    #[arg(long)]
    no_persist: bool,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print every round to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct BattleResult {
    outcome: String,
    rounds: u32,
    player_health: u32,
    opponent_health: u32,
    last_confidence: Option<f64>,
    weighted_f1: Option<f64>,
    history_len: usize,
    strategy: String,
    seed: u64,
}

fn strategy(name: &str) -> Option<Box<dyn MoveSource>> {
    let source: Box<dyn MoveSource> = match name {
        "random" => Box::new(RandomInput::new([1, 1, 1])?),
        "cycle" => Box::new(CyclingInput::new(Move::ALL.to_vec())),
        other => Box::new(CyclingInput::new(vec![other.parse::<Move>().ok()?])),
    };
    Some(source)
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(if args.verbose {
            "adaptive_arena=debug"
        } else {
            "adaptive_arena=warn"
        })
        .init();

    let config = match &args.config {
        Some(path) => match ArenaConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => ArenaConfig::default(),
    };

    let Some(mut source) = strategy(&args.strategy) else {
        eprintln!("Unknown strategy '{}'", args.strategy);
        return ExitCode::FAILURE;
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut session = Session::seeded(config, seed);
    if args.no_persist {
        session = session.without_persistence();
    } else if let Some(path) = &args.log {
        session = session.with_log(path);
    }

    let mut engine = match RoundEngine::new(session) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Failed to start session: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.verbose {
        eprintln!("=== Battle Started ===");
        eprintln!("Prior history: {} rounds", engine.history().len());
        eprintln!();
    }

    let winner = match engine.run(source.as_mut(), args.rounds) {
        Ok(winner) => winner,
        Err(e) => {
            eprintln!("Battle aborted: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.verbose {
        for line in engine.battle_log() {
            eprintln!("{}", line);
        }
        eprintln!();
    }

    let result = BattleResult {
        outcome: winner.map_or_else(|| "Unfinished".to_string(), |w| w.to_string()),
        rounds: engine.last_report().map_or(0, |r| r.round),
        player_health: engine.player().health,
        opponent_health: engine.opponent().health,
        last_confidence: engine.last_report().map(|r| r.prediction.confidence),
        weighted_f1: engine.metrics().weighted_f1(),
        history_len: engine.history().len(),
        strategy: args.strategy.clone(),
        seed,
    };

    match args.format.as_str() {
        "json" => match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to encode result: {}", e);
                return ExitCode::FAILURE;
            }
        },
        _ => {
            println!("Battle Result");
            println!("=============");
            println!("Outcome: {}", result.outcome);
            println!("Rounds: {}", result.rounds);
            println!("Player health: {}", result.player_health);
            println!("Opponent health: {}", result.opponent_health);
            if let Some(confidence) = result.last_confidence {
                println!("Last AI confidence: {:.1}%", confidence);
            }
            match result.weighted_f1 {
                Some(f1) => println!("Weighted F1: {:.3}", f1),
                None => println!("Weighted F1: n/a"),
            }
            println!("History: {} rounds", result.history_len);
            println!("Seed: {}", result.seed);
        }
    }

    ExitCode::SUCCESS
}
