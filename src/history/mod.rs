//! Round history: in-memory log, training samples and the durable CSV store

pub mod log;
pub mod record;
pub mod store;

pub use log::HistoryLog;
pub use record::{HistoryRecord, TrainingSample};
pub use store::DurableLog;
