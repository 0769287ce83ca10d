pub mod config;
pub mod error;
pub mod types;

pub use config::{ArenaConfig, CombatantConfig, PolicyConfig, SessionConfig};
pub use error::{ArenaError, Result};
pub use types::{Move, Round, Winner};
