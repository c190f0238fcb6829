use async_trait::async_trait;

use crate::error::TrackerError;
use crate::models::balance::Balance;

/// Core trait for fetching the tracked address's current token balance.
///
/// One outbound query per run, awaited before any state mutation begins. A
/// failed or non-OK query is [`TrackerError::SourceUnavailable`]; the source
/// never retries.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Fetch the current balance in base units.
    async fn fetch_current_balance(&self) -> Result<Balance, TrackerError>;
}
