//! Adaptive Arena - Entry Point
//!
//! Terminal front end: reads one move per line, plays the round and prints
//! the resulting state. Config is read from `data/arena.toml` when present.

use adaptive_arena::core::error::Result;
use adaptive_arena::core::{ArenaConfig, Move};
use adaptive_arena::engine::{EngineView, RoundEngine, Session};
use adaptive_arena::metrics::MetricsSnapshot;

use std::io::{self, Write};
use std::path::Path;

const CONFIG_PATH: &str = "data/arena.toml";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adaptive_arena=info".into()),
        )
        .init();

    let config = if Path::new(CONFIG_PATH).exists() {
        ArenaConfig::load(CONFIG_PATH)?
    } else {
        tracing::warn!("{} not found - using default config", CONFIG_PATH);
        ArenaConfig::default()
    };

    let mut engine = RoundEngine::new(Session::new(config))?;

    println!("\n=== ADAPTIVE ARENA ===");
    println!("Commands:");
    println!("  1 / attack      - Attack (10 MP, 10-20 damage)");
    println!("  2 / special     - Special move (20 MP, 25-35 damage)");
    println!("  3 / regenerate  - Regenerate 5 MP");
    println!("  m / metrics     - Show confusion matrix and report");
    println!("  v / view        - Dump current state as JSON");
    println!("  r / restart     - Start a new battle");
    println!("  q / quit        - Exit");
    println!();

    loop {
        display_status(&engine.view());

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        match input {
            "" => continue,
            "q" | "quit" => break,
            "r" | "restart" => {
                engine.restart();
                continue;
            }
            "m" | "metrics" => {
                display_metrics(engine.metrics());
                continue;
            }
            "v" | "view" => {
                println!("{}", engine.view().to_json()?);
                continue;
            }
            _ => {}
        }

        let mv = match input.parse::<Move>() {
            Ok(mv) => mv,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match engine.submit(mv) {
            Ok(report) => {
                if let Some(winner) = report.winner {
                    println!("\n*** Battle over: {} ***", winner);
                    display_metrics(engine.metrics());
                    println!("Press r to play again or q to quit.");
                }
            }
            Err(e) if e.is_persistence() => {
                tracing::error!("{}", e);
                println!("Warning: round was played but could not be saved ({})", e);
            }
            Err(e) => println!("{}", e),
        }
    }

    let summary = engine.finish();
    println!(
        "\nGoodbye! {} wins, {} losses, {} rounds on record.",
        summary.player_wins, summary.player_losses, summary.history_len
    );
    Ok(())
}

fn display_status(view: &EngineView) {
    println!();
    println!("--- Round {} ({:?}) ---", view.round, view.phase);
    for c in [&view.player, &view.opponent] {
        println!(
            "{:<12} HP {:>3}  MP {:>3}/{:<3}  W/L {}/{}",
            c.name, c.health, c.resource, c.max_resource, c.wins, c.losses
        );
    }
    println!("{}: {}", view.player.name, view.player_description);
    println!("{}: {}", view.opponent.name, view.opponent_description);
    if let Some(prediction) = &view.last_prediction {
        println!("AI confidence: {:.1}%", prediction.confidence);
    }
    println!(
        "Win probability: {} {}% | {} {}%",
        view.player.name,
        view.win_probability.player,
        view.opponent.name,
        view.win_probability.opponent
    );
    match view.metrics.weighted_f1() {
        Some(f1) => println!("F1 score: {:.2}", f1),
        None => println!("F1 score: n/a"),
    }
    for line in &view.live_log {
        println!("  {}", line);
    }
}

fn display_metrics(metrics: &MetricsSnapshot) {
    match metrics {
        MetricsSnapshot::Available {
            confusion, report, ..
        } => {
            println!("\nConfusion matrix (rows: player, columns: AI):");
            print!("{}", confusion);
            println!("\n{}", report);
        }
        MetricsSnapshot::Unavailable { reason } => {
            println!("Metrics unavailable: {:?}", reason);
        }
    }
}
