use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::balance::{format_balance, format_token_value, Balance};

/// One immutable ledger record: the signed balance change between two
/// consecutive runs. Serialized as a single JSON line, e.g.
/// `{"rebase_amount":"-0.100000000000000000","processing_time":"2024-03-01T06:00:00Z"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebaseEvent {
    /// 18-decimal fixed-point string, possibly negative.
    pub rebase_amount: String,
    /// When this run processed the rebase.
    pub processing_time: DateTime<Utc>,
}

impl RebaseEvent {
    /// Build a record for a base-unit delta, stamped with the current time.
    pub fn new(delta: i128) -> Self {
        Self {
            rebase_amount: format_token_value(delta),
            processing_time: Utc::now(),
        }
    }
}

/// What a single run produced. Lives only for the duration of one
/// invocation; the report handlers consume it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No prior balance existed; this run established the baseline.
    FirstRecording { balance: Balance },
    /// A prior balance existed; the delta was computed and ledgered.
    RebaseComputed { balance: Balance, rebase_amount: i128 },
}

impl RunOutcome {
    /// Formatted figures for the report handlers.
    pub fn to_report(&self) -> RunReport {
        match self {
            Self::FirstRecording { balance } => RunReport {
                total_balance: format_balance(*balance),
                rebase_amount: None,
            },
            Self::RebaseComputed { balance, rebase_amount } => RunReport {
                total_balance: format_balance(*balance),
                rebase_amount: Some(format_token_value(*rebase_amount)),
            },
        }
    }
}

/// Success payload handed to report handlers. `rebase_amount` is absent on
/// the first recording, when there is no prior value to diff against.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub total_balance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rebase_amount: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebase_event_serializes_to_one_json_object() {
        let event = RebaseEvent::new(150);
        let line = serde_json::to_string(&event).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["rebase_amount"], "0.000000000000000150");
        assert!(parsed["processing_time"].is_string());
    }

    #[test]
    fn first_recording_report_has_no_rebase_amount() {
        let outcome = RunOutcome::FirstRecording { balance: 1_000_000_000_000_000_000 };
        let report = outcome.to_report();
        assert_eq!(report.total_balance, "1.000000000000000000");
        assert!(report.rebase_amount.is_none());
    }

    #[test]
    fn rebase_report_formats_signed_delta() {
        let outcome = RunOutcome::RebaseComputed {
            balance: 900_000_000_000_000_000,
            rebase_amount: -100_000_000_000_000_000,
        };
        let report = outcome.to_report();
        assert_eq!(report.total_balance, "0.900000000000000000");
        assert_eq!(report.rebase_amount.as_deref(), Some("-0.100000000000000000"));
    }
}
