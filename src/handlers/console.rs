use async_trait::async_trait;
use tracing::{error, info};

use crate::error::TrackerError;
use crate::models::rebase::RunReport;
use crate::traits::report_handler::ReportHandler;

/// Console logging report handler
pub struct ConsoleReportHandler;

impl ConsoleReportHandler {
    /// Create a new console report handler
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleReportHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportHandler for ConsoleReportHandler {
    async fn handle_success(&self, report: &RunReport) {
        info!("Total balance: {}", report.total_balance);
        match &report.rebase_amount {
            Some(amount) => info!("Rebased amount: {}", amount),
            None => info!("Rebased amount: N/A (first recording)"),
        }
    }

    async fn handle_failure(&self, err: &TrackerError) {
        error!("Tracking run failed: {}", err);
    }
}
