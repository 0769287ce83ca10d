pub mod combatant;
pub mod constants;
pub mod resolution;

pub use combatant::{Combatant, MoveUsage};
pub use resolution::{move_cost, resolve, Outcome};
