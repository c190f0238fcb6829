//! The balance-tracking state machine

pub mod rebase_engine;

// Re-export for convenience
pub use rebase_engine::RebaseEngine;
