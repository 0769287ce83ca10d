//! Arena configuration loaded from TOML
//!
//! Every section is optional; missing sections and fields fall back to the
//! defaults of the classic Hero vs Adaptive AI duel. Move rules (costs and
//! damage ranges) are fixed and live in `combat::constants`.

use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{ArenaError, Result};

/// Starting values for one combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantConfig {
    /// Display name used in round descriptions
    pub name: String,
    /// Starting health
    pub health: u32,
    /// Resource cap; combatants start full
    pub max_resource: u32,
}

impl CombatantConfig {
    pub fn player() -> Self {
        Self {
            name: "Hero".to_string(),
            health: 100,
            max_resource: 50,
        }
    }

    pub fn opponent() -> Self {
        Self {
            name: "Adaptive AI".to_string(),
            health: 100,
            max_resource: 100,
        }
    }
}

fn default_player() -> CombatantConfig {
    CombatantConfig::player()
}

fn default_opponent() -> CombatantConfig {
    CombatantConfig::opponent()
}

/// A `[player]` / `[opponent]` table as written; absent keys fall back to
/// that side's defaults
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CombatantOverrides {
    name: Option<String>,
    health: Option<u32>,
    max_resource: Option<u32>,
}

impl CombatantOverrides {
    fn apply(self, base: CombatantConfig) -> CombatantConfig {
        CombatantConfig {
            name: self.name.unwrap_or(base.name),
            health: self.health.unwrap_or(base.health),
            max_resource: self.max_resource.unwrap_or(base.max_resource),
        }
    }
}

fn player_section<'de, D>(deserializer: D) -> std::result::Result<CombatantConfig, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(CombatantOverrides::deserialize(deserializer)?.apply(CombatantConfig::player()))
}

fn opponent_section<'de, D>(deserializer: D) -> std::result::Result<CombatantConfig, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(CombatantOverrides::deserialize(deserializer)?.apply(CombatantConfig::opponent()))
}

/// Hyperparameters for the three classifiers of the adaptive policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Seed every classifier derives its fitting RNG from
    ///
    /// Refits reseed from this value, so the fitted policy depends only on
    /// the sample sequence.
    pub seed: u64,

    /// Number of trees in the forest
    pub forest_trees: usize,

    /// Maximum depth of each tree
    ///
    /// With a single three-valued feature, depth 2 already separates every
    /// value; deeper trees only matter if the encoding grows.
    pub forest_max_depth: usize,

    /// Width of the hidden layer of the neural classifier
    pub hidden_units: usize,

    /// Full-batch gradient steps per refit
    pub epochs: usize,

    /// Gradient descent step size
    pub learning_rate: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            forest_trees: 25,
            forest_max_depth: 4,
            hidden_units: 8,
            epochs: 200,
            learning_rate: 0.5,
        }
    }
}

/// Session-level behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Durable append-only history log (CSV)
    pub log_path: PathBuf,
    /// Number of round lines the presentation view keeps
    pub live_log_len: usize,
    /// End the battle as a stalemate when both sides run dry on resource
    pub stalemate_on_exhaustion: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("logs/game_logs.csv"),
            live_log_len: 4,
            stalemate_on_exhaustion: true,
        }
    }
}

/// Complete arena configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    #[serde(default = "default_player", deserialize_with = "player_section")]
    pub player: CombatantConfig,
    #[serde(default = "default_opponent", deserialize_with = "opponent_section")]
    pub opponent: CombatantConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            player: CombatantConfig::player(),
            opponent: CombatantConfig::opponent(),
            policy: PolicyConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl ArenaConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string and validate
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: ArenaConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file and validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&contents)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        for side in [&self.player, &self.opponent] {
            if side.health == 0 {
                return Err(ArenaError::InvalidConfig(format!(
                    "{} must start with positive health",
                    side.name
                )));
            }
            if side.max_resource == 0 {
                return Err(ArenaError::InvalidConfig(format!(
                    "{} must have a positive resource cap",
                    side.name
                )));
            }
        }

        let policy = &self.policy;
        if policy.forest_trees == 0 || policy.forest_max_depth == 0 {
            return Err(ArenaError::InvalidConfig(
                "forest needs at least one tree of depth >= 1".into(),
            ));
        }
        if policy.hidden_units == 0 || policy.epochs == 0 {
            return Err(ArenaError::InvalidConfig(
                "neural classifier needs hidden units and epochs".into(),
            ));
        }
        if !policy.learning_rate.is_finite() || policy.learning_rate <= 0.0 {
            return Err(ArenaError::InvalidConfig(format!(
                "learning_rate ({}) must be positive and finite",
                policy.learning_rate
            )));
        }

        Ok(())
    }
}
