use anyhow::Context;
use solana_commitment_config::CommitmentConfig;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{DEFAULT_RELAY_CONTEXT_CACHE_SIZE, DEFAULT_RELAY_CONTEXT_TTL, Network};

/// Fee relayer client configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub rpc_url: String,
    /// Base url of the fee relayer service
    pub relay_api_url: String,
    /// Relayer api version; `/v{n}` is prefixed to paths when greater than 1
    pub api_version: u32,
    pub network: Network,
    pub commitment: CommitmentConfig,
    /// How long a fetched relay context may be reused
    pub context_ttl: Duration,
    pub context_cache_size: usize,
    /// Request timeout of the Solana RPC client, the relayer API client and each
    /// destination lookup; `None` keeps the client defaults
    pub rpc_timeout: Option<Duration>,
}

impl RelayConfig {
    pub fn new(rpc_url: String, relay_api_url: String, commitment: CommitmentConfig) -> Self {
        Self {
            rpc_url,
            relay_api_url,
            api_version: 1,
            network: Network::MainnetBeta,
            commitment,
            context_ttl: DEFAULT_RELAY_CONTEXT_TTL,
            context_cache_size: DEFAULT_RELAY_CONTEXT_CACHE_SIZE,
            rpc_timeout: None,
        }
    }

    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    pub fn with_api_version(mut self, api_version: u32) -> Self {
        self.api_version = api_version;
        self
    }

    pub fn with_context_cache(mut self, ttl: Duration, max_entries: usize) -> Self {
        self.context_ttl = ttl;
        self.context_cache_size = max_entries;
        self
    }

    pub fn with_rpc_timeout(mut self, timeout: Duration) -> Self {
        self.rpc_timeout = Some(timeout);
        self
    }

    /// Reads the configuration from environment variables
    ///
    /// - `RPC_URL` (default `http://127.0.0.1:8899`)
    /// - `FEE_RELAYER_URL` (required)
    /// - `FEE_RELAYER_API_VERSION` (default 1)
    /// - `SOLANA_NETWORK` (default mainnet-beta)
    /// - `RELAY_CONTEXT_TTL_SECS`
    /// - `RPC_TIMEOUT_MS`
    pub fn from_env() -> AnyResult<Self> {
        let rpc_url =
            std::env::var("RPC_URL").unwrap_or_else(|_| "http://127.0.0.1:8899".to_string());
        let relay_api_url =
            std::env::var("FEE_RELAYER_URL").context("FEE_RELAYER_URL is not set")?;

        let mut config = Self::new(rpc_url, relay_api_url, CommitmentConfig::confirmed());

        if let Ok(version) = std::env::var("FEE_RELAYER_API_VERSION") {
            config.api_version =
                version.parse().context("FEE_RELAYER_API_VERSION must be an integer")?;
        }
        if let Ok(network) = std::env::var("SOLANA_NETWORK") {
            config.network = Network::from_str(&network).map_err(anyhow::Error::msg)?;
        }
        if let Ok(ttl) = std::env::var("RELAY_CONTEXT_TTL_SECS") {
            let secs: u64 = ttl.parse().context("RELAY_CONTEXT_TTL_SECS must be an integer")?;
            config.context_ttl = Duration::from_secs(secs);
        }
        if let Ok(timeout) = std::env::var("RPC_TIMEOUT_MS") {
            let millis: u64 = timeout.parse().context("RPC_TIMEOUT_MS must be an integer")?;
            config.rpc_timeout = Some(Duration::from_millis(millis));
        }

        Ok(config)
    }
}

pub type SolanaRpcClient = solana_client::nonblocking::rpc_client::RpcClient;
pub type AnyResult<T> = anyhow::Result<T>;
