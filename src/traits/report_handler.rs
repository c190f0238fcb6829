use async_trait::async_trait;

use crate::error::TrackerError;
use crate::models::rebase::RunReport;

/// Handler for run results, success or failure.
///
/// Delivery problems are the handler's own business: they are logged, never
/// retried, and never fail the run.
#[async_trait]
pub trait ReportHandler: Send + Sync {
    /// Deliver the figures of a successful run.
    async fn handle_success(&self, report: &RunReport);

    /// Deliver the diagnostic detail of a failed run.
    async fn handle_failure(&self, error: &TrackerError);
}
