//! Fee relayer HTTP API

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

use super::context::FeeLimitForAuthorityResponse;
use super::error::{ApiErrorBody, RelayError};

#[async_trait]
pub trait FeeRelayerApi: Send + Sync {
    /// Public key of the relayer's fee payer account
    async fn get_fee_payer_pubkey(&self) -> Result<Pubkey, RelayError>;

    /// Free fee quota of `authority` for the current period
    async fn get_free_fee_limits(
        &self,
        authority: &Pubkey,
    ) -> Result<FeeLimitForAuthorityResponse, RelayError>;
}

#[async_trait]
impl<T: FeeRelayerApi + ?Sized> FeeRelayerApi for std::sync::Arc<T> {
    async fn get_fee_payer_pubkey(&self) -> Result<Pubkey, RelayError> {
        (**self).get_fee_payer_pubkey().await
    }

    async fn get_free_fee_limits(
        &self,
        authority: &Pubkey,
    ) -> Result<FeeLimitForAuthorityResponse, RelayError> {
        (**self).get_free_fee_limits(authority).await
    }
}

#[derive(Clone)]
pub struct FeeRelayerApiClient {
    http: Client,
    base_url: String,
    version: u32,
}

impl FeeRelayerApiClient {
    pub fn new(
        base_url: &str,
        version: u32,
        timeout: Option<Duration>,
    ) -> Result<Self, RelayError> {
        Url::parse(base_url).map_err(|e| RelayError::InvalidUrl(format!("{base_url}: {e}")))?;

        let mut builder = Client::builder()
            .pool_idle_timeout(Duration::from_secs(60))
            .tcp_nodelay(true)
            .connect_timeout(Duration::from_secs(5));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            version,
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// `{base}/v{version}/{path}`; version 1 has no prefix
    fn endpoint(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if self.version > 1 {
            format!("{}/v{}/{}", self.base_url, self.version, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn get_text(&self, path: &str) -> Result<String, RelayError> {
        let url = self.endpoint(path);
        debug!(%url, "fee relayer request");

        let resp = self.http.get(&url).header("Content-Type", "application/json").send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if status.is_success() {
            return Ok(body);
        }

        warn!(%url, %status, "fee relayer request failed");
        Err(api_error(status, &body))
    }
}

/// Decodes the relayer's structured error body, falling back to the status line
fn api_error(status: StatusCode, body: &str) -> RelayError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(body) => body.into(),
        Err(_) => RelayError::Api {
            code: i64::from(status.as_u16()),
            message: if body.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body.to_string()
            },
            data: None,
        },
    }
}

/// Fee payer is returned either as a bare string or as a JSON string
fn parse_fee_payer(body: &str) -> Result<Pubkey, RelayError> {
    let raw = serde_json::from_str::<String>(body).unwrap_or_else(|_| body.trim().to_string());
    Pubkey::from_str(raw.trim()).map_err(|_| RelayError::InvalidFeePayer(raw))
}

#[async_trait]
impl FeeRelayerApi for FeeRelayerApiClient {
    async fn get_fee_payer_pubkey(&self) -> Result<Pubkey, RelayError> {
        let body = self.get_text("/fee_payer/pubkey").await?;
        parse_fee_payer(&body)
    }

    async fn get_free_fee_limits(
        &self,
        authority: &Pubkey,
    ) -> Result<FeeLimitForAuthorityResponse, RelayError> {
        let body = self.get_text(&format!("/free_fee_limits/{authority}")).await?;
        serde_json::from_str(&body).map_err(|e| RelayError::Api {
            code: 0,
            message: format!("invalid free fee limits response: {e}"),
            data: None,
        })
    }
}
