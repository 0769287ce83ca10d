use thiserror::Error;

use crate::core::types::Round;

#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Malformed history log at line {line}: {reason}")]
    LogFormat { line: usize, reason: String },

    #[error("Failed to persist round {round}: {source}")]
    Persistence {
        round: Round,
        #[source]
        source: std::io::Error,
    },

    #[error("Battle is over; restart before submitting more moves")]
    BattleOver,

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl ArenaError {
    /// True when the in-memory simulation advanced but the durable append failed
    pub fn is_persistence(&self) -> bool {
        matches!(self, ArenaError::Persistence { .. })
    }
}

pub type Result<T> = std::result::Result<T, ArenaError>;
