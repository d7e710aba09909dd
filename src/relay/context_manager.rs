//! Per-owner relay context cache

use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::api_client::FeeRelayerApi;
use super::context::{RelayAccountStatus, RelayContext, UsageStatus};
use super::error::RelayError;
use super::program::get_user_relay_address;
use crate::common::network_fees::fetch_network_fees;
use crate::common::rpc_client::RelayRpcClient;
use crate::common::ttl_cache::TtlCache;
use crate::constants::Network;

/// Loads [`RelayContext`]s and keeps them for a short time.
///
/// Every field of a context is fetched concurrently. A failed load leaves the
/// cache untouched.
pub struct RelayContextManager {
    rpc: Arc<dyn RelayRpcClient>,
    api: Arc<dyn FeeRelayerApi>,
    network: Network,
    cache: TtlCache<Pubkey, RelayContext>,
}

impl RelayContextManager {
    pub fn new(
        rpc: Arc<dyn RelayRpcClient>,
        api: Arc<dyn FeeRelayerApi>,
        network: Network,
        ttl: Duration,
        max_entries: usize,
    ) -> Self {
        Self { rpc, api, network, cache: TtlCache::new(ttl, max_entries) }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Cached context of `owner`, loaded when missing or expired
    pub async fn current_context_or_update(&self, owner: &Pubkey) -> Result<RelayContext, RelayError> {
        if let Some(context) = self.cache.get(owner) {
            return Ok(context);
        }
        self.update(owner).await
    }

    /// Reloads the context of `owner` and replaces the cached one
    pub async fn update(&self, owner: &Pubkey) -> Result<RelayContext, RelayError> {
        let context = self.load(owner).await?;
        self.cache.insert(*owner, context.clone());
        Ok(context)
    }

    pub fn invalidate(&self, owner: &Pubkey) {
        self.cache.remove(owner);
    }

    async fn load(&self, owner: &Pubkey) -> Result<RelayContext, RelayError> {
        let relay_address = get_user_relay_address(owner, self.network);

        let (fees, relay_account, fee_payer_address, limits) = tokio::try_join!(
            fetch_network_fees(self.rpc.as_ref()),
            self.rpc.get_account(&relay_address),
            self.api.get_fee_payer_pubkey(),
            self.api.get_free_fee_limits(owner),
        )?;

        let relay_account_status = match relay_account {
            Some(account) => RelayAccountStatus::Created { balance: account.lamports },
            None => RelayAccountStatus::NotYetCreated,
        };

        debug!(
            %owner,
            %relay_address,
            ?relay_account_status,
            lamports_per_signature = fees.lamports_per_signature,
            "relay context loaded"
        );

        Ok(RelayContext {
            minimum_token_account_balance: fees.minimum_token_account_balance,
            minimum_relay_account_balance: fees.minimum_relay_account_balance,
            fee_payer_address,
            lamports_per_signature: fees.lamports_per_signature,
            relay_account_status,
            usage_status: UsageStatus::from(limits),
        })
    }
}
