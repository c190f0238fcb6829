use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::TrackerError;
use crate::models::balance::Balance;
use crate::traits::balance_source::BalanceSource;

/// Etherscan `account/tokenbalance` response envelope. `result` holds the
/// balance as a decimal integer string when `message` is `"OK"`, and an
/// error description otherwise.
#[derive(Debug, Deserialize)]
struct TokenBalanceResponse {
    status: String,
    message: String,
    result: String,
}

/// Balance source backed by the Etherscan token-balance API.
pub struct EtherscanBalanceSource {
    client: Client,
    base_url: String,
    tracked_address: String,
    api_key: String,
    contract_address: String,
}

impl EtherscanBalanceSource {
    /// Build a source from the validated configuration. The request timeout
    /// bounds the single outbound call; a timed-out fetch fails the run
    /// before any state is touched.
    pub fn new(config: &Config) -> Result<Self, TrackerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .map_err(|e| TrackerError::SourceUnavailable {
                detail: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.etherscan_base_url.clone(),
            tracked_address: config.tracked_address.clone(),
            api_key: config.api_key.clone(),
            contract_address: config.token_contract_address.clone(),
        })
    }
}

#[async_trait]
impl BalanceSource for EtherscanBalanceSource {
    async fn fetch_current_balance(&self) -> Result<Balance, TrackerError> {
        let url = format!("{}/api", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .query(&[
                ("module", "account"),
                ("action", "tokenbalance"),
                ("tag", "latest"),
                ("address", self.tracked_address.as_str()),
                ("contractaddress", self.contract_address.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| TrackerError::SourceUnavailable {
                detail: format!("request to {url} failed: {e}"),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| TrackerError::SourceUnavailable {
            detail: format!("failed to read response body: {e}"),
        })?;

        if !status.is_success() {
            return Err(TrackerError::SourceUnavailable {
                detail: format!("HTTP {status}, body: {body}"),
            });
        }

        debug!("Etherscan response: {}", body);
        parse_token_balance(&body)
    }
}

/// Interpret an Etherscan response body. Anything but `message == "OK"` with
/// an integer `result` means the balance could not be retrieved.
fn parse_token_balance(body: &str) -> Result<Balance, TrackerError> {
    let response: TokenBalanceResponse =
        serde_json::from_str(body).map_err(|e| TrackerError::SourceUnavailable {
            detail: format!("unexpected response shape ({e}), body: {body}"),
        })?;

    if response.message != "OK" {
        return Err(TrackerError::SourceUnavailable {
            detail: format!(
                "Etherscan was not able to retrieve the current balance, \
                 status {}, message {}, result {}",
                response.status, response.message, response.result
            ),
        });
    }

    // The arithmetic downstream is exact integer math, so the balance must
    // arrive as an integer string, never a float approximation.
    response.result.parse::<Balance>().map_err(|_| TrackerError::SourceUnavailable {
        detail: format!("balance {:?} is not a decimal integer", response.result),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ok_response() {
        let body = r#"{"status":"1","message":"OK","result":"135499618707924429295"}"#;
        assert_eq!(parse_token_balance(body).unwrap(), 135_499_618_707_924_429_295);
    }

    #[test]
    fn non_ok_message_is_source_unavailable() {
        let body = r#"{"status":"0","message":"NOTOK","result":"Max rate limit reached"}"#;
        let err = parse_token_balance(body).unwrap_err();
        match err {
            TrackerError::SourceUnavailable { detail } => {
                assert!(detail.contains("NOTOK"));
                assert!(detail.contains("Max rate limit reached"));
            }
            other => panic!("expected SourceUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn non_integer_result_is_source_unavailable() {
        let body = r#"{"status":"1","message":"OK","result":"1.5e20"}"#;
        assert!(matches!(
            parse_token_balance(body),
            Err(TrackerError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn garbage_body_is_source_unavailable() {
        assert!(matches!(
            parse_token_balance("<html>502</html>"),
            Err(TrackerError::SourceUnavailable { .. })
        ));
    }
}
