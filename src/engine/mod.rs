pub mod input;
pub mod round;
pub mod session;
pub mod state;
pub mod view;

pub use input::{CyclingInput, MoveSource, RandomInput, ScriptedInput};
pub use round::{RoundEngine, RoundReport, SessionSummary};
pub use session::Session;
pub use state::{evaluate_terminal, RoundPhase};
pub use view::{EngineView, WinProbability};
