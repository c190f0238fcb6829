//! Durable state over flat files

pub mod file_store;

// Re-export for convenience
pub use file_store::{FileStateStore, RunLockGuard};
