use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TrackerError;
use crate::models::rebase::RunReport;
use crate::traits::report_handler::ReportHandler;

/// Composite report handler that fans a result out to multiple handlers
pub struct CompositeReportHandler {
    handlers: Vec<Arc<dyn ReportHandler>>,
}

impl CompositeReportHandler {
    /// Create a new composite report handler
    pub fn new() -> Self {
        Self { handlers: Vec::new() }
    }

    /// Add a handler to the composite
    pub fn add_handler(&mut self, handler: Arc<dyn ReportHandler>) {
        self.handlers.push(handler);
    }

    /// Check if there are any handlers
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Number of handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for CompositeReportHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportHandler for CompositeReportHandler {
    async fn handle_success(&self, report: &RunReport) {
        for handler in &self.handlers {
            handler.handle_success(report).await;
        }
    }

    async fn handle_failure(&self, error: &TrackerError) {
        for handler in &self.handlers {
            handler.handle_failure(error).await;
        }
    }
}
