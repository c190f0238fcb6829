//! Data models for the rebase tracker

pub mod balance;
pub mod rebase;

// Re-export for convenience
pub use balance::{format_balance, format_token_value, parse_balance, Balance, ERC20_TOKEN_PRECISION};
pub use rebase::{RebaseEvent, RunOutcome, RunReport};
