//! Round engine
//!
//! Processes one player move at a time and runs the whole transition to
//! completion before returning:
//!
//! 1. resolve the player's move against the opponent
//! 2. ask the policy for the opponent's move, using the player's move as feature
//! 3. resolve the opponent's move against the player
//! 4. append the round record (in memory, then durable storage)
//! 5. recompute metrics and retrain the policy from the full history
//! 6. check for a terminal result
//!
//! Rounds are never rolled back. The engine exclusively owns both
//! combatants, the history and the policy; a caller that adds concurrency
//! must treat `submit` as atomic.

use serde::{Deserialize, Serialize};

use crate::combat::{resolve, Combatant, Outcome};
use crate::core::{ArenaError, Move, Result, Round, Winner};
use crate::engine::state::{evaluate_terminal, RoundPhase};
use crate::engine::{MoveSource, Session};
use crate::history::{HistoryLog, HistoryRecord};
use crate::metrics::{MetricsSnapshot, MetricsTracker};
use crate::policy::{AdaptivePolicy, DecisionPolicy, PolicySnapshot};

/// Everything that happened in one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: Round,
    pub player: Outcome,
    pub opponent: Outcome,
    pub prediction: PolicySnapshot,
    pub player_description: String,
    pub opponent_description: String,
    pub winner: Option<Winner>,
}

impl RoundReport {
    /// Line for the live log
    pub fn log_line(&self) -> String {
        format!(
            "Round {}: {} | {}",
            self.round, self.player_description, self.opponent_description
        )
    }
}

/// Totals at the end of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub history_len: usize,
    pub player_wins: u32,
    pub player_losses: u32,
    pub final_phase: RoundPhase,
}

#[derive(Debug)]
pub struct RoundEngine<P: DecisionPolicy = AdaptivePolicy> {
    session: Session,
    player: Combatant,
    opponent: Combatant,
    policy: P,
    history: HistoryLog,
    metrics: MetricsTracker,
    phase: RoundPhase,
    round: Round,
    battle_log: Vec<String>,
    last_report: Option<RoundReport>,
}

impl RoundEngine<AdaptivePolicy> {
    /// Engine with the adaptive ensemble configured from the session
    pub fn new(session: Session) -> Result<Self> {
        let policy = AdaptivePolicy::new(&session.config().policy);
        Self::with_policy(session, policy)
    }
}

impl<P: DecisionPolicy> RoundEngine<P> {
    /// Build the engine and warm-start the policy from the durable log
    pub fn with_policy(session: Session, mut policy: P) -> Result<Self> {
        session.config().validate()?;

        let prior = session.load_history()?;
        let history = HistoryLog::from_records(prior);
        if !history.is_empty() {
            tracing::info!(rounds = history.len(), "replaying prior history into policy");
        }
        policy.train(&history.training_samples());

        let mut metrics = MetricsTracker::new();
        metrics.update(history.records());

        let config = session.config();
        let player = Combatant::from_config(&config.player);
        let opponent = Combatant::from_config(&config.opponent);

        tracing::info!(
            seed = session.seed(),
            player = %player.name,
            opponent = %opponent.name,
            "session started"
        );

        Ok(Self {
            session,
            player,
            opponent,
            policy,
            history,
            metrics,
            phase: RoundPhase::AwaitingInput,
            round: 1,
            battle_log: Vec::new(),
            last_report: None,
        })
    }

    /// Play one round with the player's chosen move
    ///
    /// Returns `BattleOver` once the battle is terminal. A durable append
    /// failure is returned as `Persistence` after the in-memory round has
    /// completed; the report is still available from `last_report`.
    pub fn submit(&mut self, player_move: Move) -> Result<RoundReport> {
        if self.phase.is_terminal() {
            return Err(ArenaError::BattleOver);
        }

        self.phase = RoundPhase::Resolving;
        let rng = &mut self.session.rng;
        let player_out = resolve(&mut self.player, &mut self.opponent, player_move, rng);
        let prediction = self.policy.decide(player_move, rng);
        let opponent_out = resolve(&mut self.opponent, &mut self.player, prediction.predicted, rng);

        let record = HistoryRecord::from_outcomes(self.round, &player_out, &opponent_out);
        self.history.append(record);
        let persisted = self.session.persist(&record, self.round);

        self.phase = RoundPhase::Evaluating;
        self.metrics.update(self.history.records());
        self.policy.train(&self.history.training_samples());

        let winner = evaluate_terminal(
            &self.player,
            &self.opponent,
            self.session.config().session.stalemate_on_exhaustion,
        );

        let report = RoundReport {
            round: self.round,
            player_description: player_out.describe(&self.player.name),
            opponent_description: opponent_out.describe(&self.opponent.name),
            player: player_out,
            opponent: opponent_out,
            prediction,
            winner,
        };

        tracing::debug!(
            round = self.round,
            player_move = %player_move,
            opponent_move = %prediction.predicted,
            confidence = prediction.confidence,
            player_health = self.player.health,
            opponent_health = self.opponent.health,
            "round resolved"
        );

        self.battle_log.push(report.log_line());
        self.last_report = Some(report.clone());

        match winner {
            Some(winner) => self.finish_battle(winner),
            None => {
                self.phase = RoundPhase::AwaitingInput;
                self.round += 1;
            }
        }

        persisted?;
        Ok(report)
    }

    fn finish_battle(&mut self, winner: Winner) {
        match winner {
            Winner::Player => {
                self.player.wins += 1;
                self.opponent.losses += 1;
            }
            Winner::Opponent => {
                self.opponent.wins += 1;
                self.player.losses += 1;
            }
            Winner::Stalemate => {}
        }
        self.phase = RoundPhase::Terminal(winner);
        tracing::info!(round = self.round, winner = %winner, "battle over");
    }

    /// Drive the battle from a move source until it ends, the source runs
    /// dry, or `max_rounds` rounds have been played
    pub fn run(
        &mut self,
        source: &mut dyn MoveSource,
        max_rounds: usize,
    ) -> Result<Option<Winner>> {
        for _ in 0..max_rounds {
            if self.phase.is_terminal() {
                break;
            }
            let Some(mv) = source.next_move(&mut self.session.rng) else {
                break;
            };
            self.submit(mv)?;
        }
        Ok(self.phase.winner())
    }

    /// Start a new battle: fresh combatants, round 1
    ///
    /// History, policy and win/loss tallies carry over.
    pub fn restart(&mut self) {
        self.player.reset_for_battle();
        self.opponent.reset_for_battle();
        self.phase = RoundPhase::AwaitingInput;
        self.round = 1;
        self.battle_log.clear();
        self.last_report = None;
        tracing::info!(history = self.history.len(), "battle restarted");
    }

    /// End the session
    pub fn finish(self) -> SessionSummary {
        let summary = SessionSummary {
            seed: self.session.seed(),
            history_len: self.history.len(),
            player_wins: self.player.wins,
            player_losses: self.player.losses,
            final_phase: self.phase,
        };
        tracing::info!(
            history = summary.history_len,
            wins = summary.player_wins,
            losses = summary.player_losses,
            "session finished"
        );
        summary
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Round number the next move will be played in
    pub fn round(&self) -> Round {
        self.round
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn opponent(&self) -> &Combatant {
        &self.opponent
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn metrics(&self) -> &MetricsSnapshot {
        self.metrics.latest()
    }

    pub fn last_report(&self) -> Option<&RoundReport> {
        self.last_report.as_ref()
    }

    /// Every live log line of the current battle
    pub fn battle_log(&self) -> &[String] {
        &self.battle_log
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}
