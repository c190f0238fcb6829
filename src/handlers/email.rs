use std::process::Stdio;

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::TrackerError;
use crate::models::rebase::RunReport;
use crate::traits::report_handler::ReportHandler;
use crate::utils::helper::serialize_error;

const EMAIL_SUBJECT: &str = "stETH rebase calculation result";

/// Report handler that pipes the result through the system `mail` command.
/// A missing or failing `mail` binary is logged and swallowed; delivery is
/// best-effort and never retried.
pub struct EmailReportHandler {
    recipient: String,
}

impl EmailReportHandler {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self { recipient: recipient.into() }
    }

    async fn send(&self, subject: &str, body: String) {
        let mut child = match Command::new("mail")
            .arg("-s")
            .arg(subject)
            .arg(&self.recipient)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to spawn mail command: {}", e);
                return;
            }
        };

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(body.as_bytes()).await {
                warn!("Failed to write mail body: {}", e);
                return;
            }
        }

        match child.wait().await {
            Ok(status) if status.success() => {
                debug!("Mail sent to {}", self.recipient);
            }
            Ok(status) => warn!("mail command exited with {}", status),
            Err(e) => warn!("Failed to wait for mail command: {}", e),
        }
    }

    fn format_body(total_balance: &str, rebase_amount: &str, error: &str) -> String {
        format!(
            "Total balance: {total_balance}\n\
             Rebased amount: {rebase_amount}\n\
             Date: {}\n\
             Error: {error}\n",
            Utc::now().to_rfc3339()
        )
    }
}

#[async_trait]
impl ReportHandler for EmailReportHandler {
    async fn handle_success(&self, report: &RunReport) {
        let body = Self::format_body(
            &report.total_balance,
            report.rebase_amount.as_deref().unwrap_or("N/A"),
            "N/A",
        );
        self.send(&format!("[SUCCESS] {EMAIL_SUBJECT}"), body).await;
    }

    async fn handle_failure(&self, err: &TrackerError) {
        let body = Self::format_body("N/A", "N/A", &serialize_error(err));
        self.send(&format!("[FAILURE] {EMAIL_SUBJECT}"), body).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_carries_figures_and_na_placeholders() {
        let body = EmailReportHandler::format_body("1.000000000000000000", "N/A", "N/A");
        assert!(body.contains("Total balance: 1.000000000000000000"));
        assert!(body.contains("Rebased amount: N/A"));
        assert!(body.contains("Error: N/A"));
    }
}
