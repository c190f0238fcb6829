use tracing::info;

use crate::error::TrackerError;
use crate::models::balance::Balance;
use crate::models::rebase::{RebaseEvent, RunOutcome};
use crate::traits::state_store::StateStore;

/// The balance-tracking state machine. Each run reads the prior balance,
/// diffs the freshly fetched one against it, and drives the state store
/// updates.
pub struct RebaseEngine<S: StateStore> {
    store: S,
}

impl<S: StateStore> RebaseEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run one tracking cycle against an already-fetched balance.
    ///
    /// No prior balance on record: initialize an empty ledger, persist the
    /// baseline, and report a first recording. Nothing is appended; there is
    /// no prior value to diff against.
    ///
    /// Prior balance on record: compute the exact signed delta, persist the
    /// new balance, then append the rebase record. The balance write comes
    /// first, so a crash between the two steps keeps the latest balance but
    /// permanently loses that one ledger line; the delta of that interval is
    /// unrecoverable on the next run. Known, accepted gap.
    pub fn run(&self, current: Balance) -> Result<RunOutcome, TrackerError> {
        let previous = match self.store.read_balance()? {
            Some(previous) => previous,
            None => {
                info!("No prior balance recorded, establishing baseline {}", current);
                self.store.initialize_ledger()?;
                self.store.write_balance(current)?;
                return Ok(RunOutcome::FirstRecording { balance: current });
            }
        };

        // Exact signed subtraction; the balance can shrink (burns, slashing,
        // negative rebases), so the magnitude of the smaller side is negated.
        // A difference too large for i128 fails the run before any write
        // instead of wrapping into a wrong ledger amount.
        let rebase_amount = if current >= previous {
            i128::try_from(current - previous)
        } else {
            i128::try_from(previous - current).map(|magnitude| -magnitude)
        }
        .map_err(|_| TrackerError::DeltaOutOfRange { previous, current })?;
        info!(
            "Previous balance {}, current balance {}, rebase {}",
            previous, current, rebase_amount
        );

        self.store.write_balance(current)?;
        self.store.append_rebase(&RebaseEvent::new(rebase_amount))?;

        Ok(RunOutcome::RebaseComputed { balance: current, rebase_amount })
    }
}
