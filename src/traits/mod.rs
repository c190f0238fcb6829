//! Core traits for the rebase tracker

pub mod balance_source;
pub mod report_handler;
pub mod state_store;

// Re-export for convenience
pub use balance_source::BalanceSource;
pub use report_handler::ReportHandler;
pub use state_store::StateStore;
