use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TrackerError;

/// Lido's stETH token contract.
/// <https://etherscan.io/address/0xae7ab96520de3a18e5e111b5eaab095312d7fe84>
pub const STETH_CONTRACT_ADDRESS: &str = "0xae7ab96520de3a18e5e111b5eaab095312d7fe84";

const DEFAULT_ETHERSCAN_BASE_URL: &str = "https://api.etherscan.io";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Validated run configuration, built once at startup and passed into the
/// components. No ambient globals; nothing reads the environment after this.
#[derive(Debug, Clone)]
pub struct Config {
    /// Ethereum address that holds the stETH to be tracked.
    pub tracked_address: String,
    /// Etherscan API key. Secret; keep it out of logs and reports.
    pub api_key: String,
    /// File holding the last recorded balance. Absent before the first run.
    pub balance_file: PathBuf,
    /// Append-only ledger of rebase records.
    pub rebase_file: PathBuf,
    /// Where result emails go.
    pub email_recipient: String,
    /// Base URL of the Etherscan-compatible API. Overridable for tests.
    pub etherscan_base_url: String,
    /// Token contract to query; defaults to Lido stETH.
    pub token_contract_address: String,
    /// Upper bound on the single outbound fetch.
    pub fetch_timeout_secs: u64,
}

impl Config {
    /// Read and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, TrackerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read and validate configuration through a lookup function. Tests use
    /// this with a map instead of mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TrackerError> {
        let config = Self {
            tracked_address: required(&lookup, "ETH_ADDRESS")?,
            api_key: required(&lookup, "ETHERSCAN_API_KEY")?,
            balance_file: PathBuf::from(required(&lookup, "BALANCE_FILE")?),
            rebase_file: PathBuf::from(required(&lookup, "REBASING_TRACKING_FILE")?),
            email_recipient: required(&lookup, "EMAIL_ADDRESS")?,
            etherscan_base_url: lookup("ETHERSCAN_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ETHERSCAN_BASE_URL.to_string()),
            token_contract_address: lookup("TOKEN_CONTRACT_ADDRESS")
                .unwrap_or_else(|| STETH_CONTRACT_ADDRESS.to_string()),
            fetch_timeout_secs: match lookup("FETCH_TIMEOUT_SECS") {
                Some(raw) => raw.parse().map_err(|_| {
                    TrackerError::Configuration(format!(
                        "FETCH_TIMEOUT_SECS must be a number of seconds, got {raw:?}"
                    ))
                })?,
                None => DEFAULT_FETCH_TIMEOUT_SECS,
            },
        };
        config.validate_paths()?;
        Ok(config)
    }

    /// The balance file, when it already exists, must be readable; both
    /// state files must sit in an existing directory. Checked before any
    /// network or file activity so a bad deployment fails immediately.
    fn validate_paths(&self) -> Result<(), TrackerError> {
        if self.balance_file.exists() {
            fs::File::open(&self.balance_file).map_err(|e| {
                TrackerError::Configuration(format!(
                    "balance file {} is not readable: {e}",
                    self.balance_file.display()
                ))
            })?;
        }
        for path in [&self.balance_file, &self.rebase_file] {
            let parent = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            if !parent.is_dir() {
                return Err(TrackerError::Configuration(format!(
                    "directory {} for state file {} does not exist",
                    parent.display(),
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, TrackerError> {
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(TrackerError::Configuration(format!("{name} is set but empty"))),
        None => Err(TrackerError::Configuration(format!("missing required setting {name}"))),
    }
}
