use crate::error::TrackerError;
use crate::models::balance::Balance;
use crate::models::rebase::RebaseEvent;

/// Durable state owned by the tracker: the last-known-balance scalar file
/// and the append-only rebase ledger.
///
/// The rebase engine is the only writer. Overlapping invocations are kept
/// out by the run lock, not by this trait.
pub trait StateStore: Send + Sync {
    /// Read the last recorded balance. `Ok(None)` means the balance file
    /// does not exist yet, which is the first-run signal and not an error.
    fn read_balance(&self) -> Result<Option<Balance>, TrackerError>;

    /// Replace the balance file's entire content with the decimal form of
    /// `balance` plus a trailing newline.
    fn write_balance(&self, balance: Balance) -> Result<(), TrackerError>;

    /// Append one record to the ledger file, creating it if absent.
    fn append_rebase(&self, event: &RebaseEvent) -> Result<(), TrackerError>;

    /// Create an empty ledger file if none exists. Called on the first run
    /// so later runs always have a ledger to append to.
    fn initialize_ledger(&self) -> Result<(), TrackerError>;
}
