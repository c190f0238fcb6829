//! Balance sources for fetching the tracked address's holdings

pub mod etherscan;

// Re-export for convenience
pub use etherscan::EtherscanBalanceSource;
