//! Adaptive Arena - turn-based duel against an opponent that learns

pub mod combat;
pub mod core;
pub mod engine;
pub mod history;
pub mod metrics;
pub mod policy;
