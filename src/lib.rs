//! stETH Rebase Tracker Library
//!
//! Samples the stETH balance of a tracked address once per invocation,
//! diffs it against the last recorded balance, appends the signed delta to
//! an append-only ledger, and reports the outcome. An external scheduler
//! provides the cadence; the process exits after each run.

// Public modules - these are the API surface
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod providers;
pub mod store;
pub mod tracker;
pub mod traits;
pub mod utils;

// Re-export commonly used items for easier access
pub use config::Config;
pub use error::TrackerError;
pub use handlers::{CompositeReportHandler, ConsoleReportHandler, EmailReportHandler};
pub use models::{
    balance::{format_balance, format_token_value, Balance},
    rebase::{RebaseEvent, RunOutcome, RunReport},
};
pub use providers::etherscan::EtherscanBalanceSource;
pub use store::file_store::FileStateStore;
pub use tracker::rebase_engine::RebaseEngine;
pub use traits::{
    balance_source::BalanceSource, report_handler::ReportHandler, state_store::StateStore,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type alias for library functions
pub type Result<T> = std::result::Result<T, TrackerError>;
