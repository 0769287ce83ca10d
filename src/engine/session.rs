//! Session context: configuration, random source and durable log
//!
//! Created at session start and handed to the engine; there is no global
//! state. Dropping the engine ends the session.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

use crate::core::{ArenaConfig, ArenaError, Result, Round};
use crate::history::{DurableLog, HistoryRecord};

#[derive(Debug)]
pub struct Session {
    config: ArenaConfig,
    seed: u64,
    pub(crate) rng: ChaCha8Rng,
    store: Option<DurableLog>,
}

impl Session {
    /// Session persisting to `config.session.log_path`, seeded from entropy
    pub fn new(config: ArenaConfig) -> Self {
        Self::seeded(config, rand::random())
    }

    /// Reproducible session
    pub fn seeded(config: ArenaConfig, seed: u64) -> Self {
        let store = Some(DurableLog::new(config.session.log_path.clone()));
        Self {
            config,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            store,
        }
    }

    /// Persist to `path` instead of the configured log
    pub fn with_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.store = Some(DurableLog::new(path));
        self
    }

    /// Keep history in memory only
    pub fn without_persistence(mut self) -> Self {
        self.store = None;
        self
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn store(&self) -> Option<&DurableLog> {
        self.store.as_ref()
    }

    /// Records from prior sessions; empty without a store
    pub(crate) fn load_history(&self) -> Result<Vec<HistoryRecord>> {
        match &self.store {
            Some(store) => store.load(),
            None => Ok(Vec::new()),
        }
    }

    /// Synchronously append one record to durable storage
    pub(crate) fn persist(&self, record: &HistoryRecord, round: Round) -> Result<()> {
        match &self.store {
            Some(store) => store
                .append(record)
                .map_err(|source| ArenaError::Persistence { round, source }),
            None => Ok(()),
        }
    }
}
