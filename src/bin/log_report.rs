//! Offline analysis of a history log
//!
//! Prints move counts for both sides, the player-vs-AI confusion matrix and
//! the per-label classification report.

use adaptive_arena::core::Move;
use adaptive_arena::history::{DurableLog, HistoryRecord};
use adaptive_arena::metrics::{ConfusionMatrix, MetricsSnapshot};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "log_report")]
#[command(about = "Summarise a recorded history log")]
struct Args {
    /// History log (CSV)
    #[arg(default_value = "logs/game_logs.csv")]
    path: PathBuf,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct MoveCounts {
    player: [u32; Move::COUNT],
    opponent: [u32; Move::COUNT],
}

impl MoveCounts {
    fn tally(records: &[HistoryRecord]) -> Self {
        let mut counts = Self {
            player: [0; Move::COUNT],
            opponent: [0; Move::COUNT],
        };
        for r in records {
            counts.player[r.player_move.index()] += 1;
            counts.opponent[r.opponent_move.index()] += 1;
        }
        counts
    }
}

#[derive(Serialize)]
struct LogReport {
    rounds: usize,
    counts: MoveCounts,
    confusion: ConfusionMatrix,
    metrics: MetricsSnapshot,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let records = match DurableLog::new(args.path.clone()).load() {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Failed to read '{}': {}", args.path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let report = LogReport {
        rounds: records.len(),
        counts: MoveCounts::tally(&records),
        confusion: ConfusionMatrix::from_pairs(
            records.iter().map(|r| (r.player_move, r.opponent_move)),
        ),
        metrics: MetricsSnapshot::compute(&records),
    };

    if args.json {
        return match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to encode report: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    println!("History: {} ({} rounds)", args.path.display(), report.rounds);
    println!();
    println!("{:<12} {:>8} {:>8}", "Move", "Player", "AI");
    for mv in Move::ALL {
        println!(
            "{:<12} {:>8} {:>8}",
            mv.label(),
            report.counts.player[mv.index()],
            report.counts.opponent[mv.index()]
        );
    }
    println!();
    println!("Confusion matrix (rows: player, columns: AI):");
    print!("{}", report.confusion);
    println!();

    match &report.metrics {
        MetricsSnapshot::Available { report, .. } => println!("{}", report),
        MetricsSnapshot::Unavailable { reason } => {
            println!("Classification report unavailable: {:?}", reason)
        }
    }

    ExitCode::SUCCESS
}
