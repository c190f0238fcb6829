use serde_json::json;

/// Serialize an error and its source chain to a JSON string for failure
/// reports, so the operator sees the full cause, not just the top message.
pub fn serialize_error(error: &(dyn std::error::Error + 'static)) -> String {
    let mut chain = Vec::new();
    let mut current: Option<&(dyn std::error::Error + 'static)> = error.source();
    while let Some(cause) = current {
        chain.push(cause.to_string());
        current = cause.source();
    }

    json!({
        "message": error.to_string(),
        "chain": chain,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;

    #[test]
    fn serializes_message_and_cause_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = TrackerError::persistence("appending to ledger", io);

        let serialized = serialize_error(&err);
        let value: serde_json::Value = serde_json::from_str(&serialized).unwrap();
        assert!(value["message"].as_str().unwrap().contains("appending to ledger"));
        assert_eq!(value["chain"][0], "denied");
    }
}
