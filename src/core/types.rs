//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Round counter (1-based within a battle)
pub type Round = u32;

/// The three moves available to either side each round
///
/// Ordinals double as the feature encoding for the policy and as the
/// move codes in the durable log (1 = Attack, 2 = Special, 3 = Regenerate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Move {
    Attack,
    Special,
    Regenerate,
}

impl Move {
    /// All moves in label order
    pub const ALL: [Move; 3] = [Move::Attack, Move::Special, Move::Regenerate];

    /// Number of distinct labels
    pub const COUNT: usize = 3;

    /// 1-based ordinal used as feature value and log code
    pub fn code(self) -> u32 {
        self.index() as u32 + 1
    }

    /// 0-based index into per-label arrays
    pub fn index(self) -> usize {
        match self {
            Move::Attack => 0,
            Move::Special => 1,
            Move::Regenerate => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_code(code: u32) -> Option<Self> {
        code.checked_sub(1)
            .and_then(|i| Self::from_index(i as usize))
    }

    /// Single numeric feature fed to the classifiers
    pub fn feature(self) -> f64 {
        f64::from(self.code())
    }

    /// Short lowercase label for logs and reports
    pub fn label(self) -> &'static str {
        match self {
            Move::Attack => "attack",
            Move::Special => "special",
            Move::Regenerate => "regenerate",
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Move::Attack => "Attack",
            Move::Special => "Special",
            Move::Regenerate => "Regenerate",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Move {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "attack" | "a" => Ok(Move::Attack),
            "2" | "special" | "s" => Ok(Move::Special),
            "3" | "regenerate" | "regen" | "r" => Ok(Move::Regenerate),
            other => Err(format!("unknown move '{}'", other)),
        }
    }
}

/// Final result of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Player,
    Opponent,
    Stalemate,
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::Player => f.write_str("player"),
            Winner::Opponent => f.write_str("opponent"),
            Winner::Stalemate => f.write_str("stalemate"),
        }
    }
}
