//! # HTTP Adapter
//!
//! Pull/control plane over the witness service's stateless endpoints:
//! `GET /state`, `POST /tx`, `POST /control`.

use crate::domain::{ClientError, ControlAction, LedgerSnapshot};
use crate::ports::LedgerApi;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::TransferIntent;

/// Reply shape of the mutation endpoints.
#[derive(Debug, Deserialize)]
struct OkReply {
    ok: bool,
}

#[derive(Debug, Serialize)]
struct ControlBody {
    action: ControlAction,
}

/// HTTP implementation of [`LedgerApi`].
pub struct HttpLedgerApi {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpLedgerApi {
    /// Create an adapter for `base_url` (no trailing slash).
    pub fn new(base_url: String, timeout_secs: u64) -> Self {
        // Fall back to the default client if the builder fails; the default
        // constructor is infallible.
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http_client,
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl LedgerApi for HttpLedgerApi {
    async fn fetch_state(&self) -> Result<LedgerSnapshot, ClientError> {
        let response = self
            .http_client
            .get(self.url("/state"))
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        response
            .json::<LedgerSnapshot>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn send_transfer(&self, intent: &TransferIntent) -> Result<bool, ClientError> {
        let response = self
            .http_client
            .post(self.url("/tx"))
            .json(intent)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        // A 4xx means the service refused the transfer; that is an answer,
        // not a transport failure.
        if !response.status().is_success() {
            return Ok(false);
        }
        Ok(response.json::<OkReply>().await.map(|r| r.ok).unwrap_or(false))
    }

    async fn control(&self, action: ControlAction) -> Result<bool, ClientError> {
        let response = self
            .http_client
            .post(self.url("/control"))
            .json(&ControlBody { action })
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Ok(false);
        }
        Ok(response.json::<OkReply>().await.map(|r| r.ok).unwrap_or(false))
    }
}
