use std::path::PathBuf;

use thiserror::Error;

/// Every way a tracking run can fail.
///
/// An absent balance file is deliberately *not* represented here: it is the
/// first-run signal and surfaces as `Ok(None)` from
/// [`crate::traits::state_store::StateStore::read_balance`].
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A required setting is missing or failed validation. Raised before any
    /// network or file activity.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The remote balance query failed, timed out, or returned a non-OK
    /// status. Carries the raw response detail for diagnostics.
    #[error("balance source unavailable: {detail}")]
    SourceUnavailable { detail: String },

    /// The balance file exists but its content is not a parsable integer.
    #[error("balance file is corrupt, content was {content:?}")]
    CorruptState { content: String },

    /// The change between two samples does not fit a signed 128-bit value.
    /// The run fails before any state is mutated rather than ledgering a
    /// wrapped amount.
    #[error("rebase between previous balance {previous} and current balance {current} exceeds the representable delta range")]
    DeltaOutOfRange { previous: u128, current: u128 },

    /// A write or append to one of the state files failed.
    #[error("state persistence failed while {context}: {source}")]
    Persistence {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Another run holds the lock file. The run aborts before any mutation.
    #[error("run lock {path} is already held; is another run in flight?")]
    LockHeld { path: PathBuf },
}

impl TrackerError {
    /// Wrap an I/O error with a description of the operation that failed.
    pub fn persistence(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Persistence { context: context.into(), source }
    }
}
