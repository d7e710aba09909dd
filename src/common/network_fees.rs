//! Network fee oracle
//!
//! Signature cost and rent-exempt minimums change rarely, so they are kept in
//! a process-wide cache refreshed by a background task.

use once_cell::sync::Lazy;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::time::sleep;
use tracing::{debug, warn};

use super::rpc_client::RelayRpcClient;
use crate::constants::{NETWORK_FEE_REFRESH_INTERVAL, RELAY_ACCOUNT_LEN, TOKEN_ACCOUNT_LEN};
use crate::relay::error::RelayError;

// u64::MAX marks a value that has not been fetched yet
static LAMPORTS_PER_SIGNATURE: Lazy<AtomicU64> = Lazy::new(|| AtomicU64::new(u64::MAX));
static TOKEN_ACCOUNT_RENT: Lazy<AtomicU64> = Lazy::new(|| AtomicU64::new(u64::MAX));
static RELAY_ACCOUNT_RENT: Lazy<AtomicU64> = Lazy::new(|| AtomicU64::new(u64::MAX));

/// Current network-state inputs of every fee estimation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkFees {
    pub lamports_per_signature: u64,
    /// Rent-exempt minimum of an SPL token account
    pub minimum_token_account_balance: u64,
    /// Rent-exempt minimum of the user relay account
    pub minimum_relay_account_balance: u64,
}

/// Fetches the current network fees
pub async fn fetch_network_fees<C: RelayRpcClient + ?Sized>(
    client: &C,
) -> Result<NetworkFees, RelayError> {
    let (lamports_per_signature, minimum_token_account_balance, minimum_relay_account_balance) = tokio::try_join!(
        client.get_lamports_per_signature(),
        client.get_minimum_balance_for_rent_exemption(TOKEN_ACCOUNT_LEN),
        client.get_minimum_balance_for_rent_exemption(RELAY_ACCOUNT_LEN),
    )?;

    Ok(NetworkFees {
        lamports_per_signature,
        minimum_token_account_balance,
        minimum_relay_account_balance,
    })
}

/// Refreshes the process-wide cache
pub async fn update_network_fees<C: RelayRpcClient + ?Sized>(
    client: &C,
) -> Result<NetworkFees, RelayError> {
    let fees = fetch_network_fees(client).await?;
    store_network_fees(&fees);
    debug!(
        lamports_per_signature = fees.lamports_per_signature,
        minimum_token_account_balance = fees.minimum_token_account_balance,
        "network fees updated"
    );
    Ok(fees)
}

pub(crate) fn store_network_fees(fees: &NetworkFees) {
    LAMPORTS_PER_SIGNATURE.store(fees.lamports_per_signature, Ordering::Release);
    TOKEN_ACCOUNT_RENT.store(fees.minimum_token_account_balance, Ordering::Release);
    RELAY_ACCOUNT_RENT.store(fees.minimum_relay_account_balance, Ordering::Release);
}

/// Reads the cache; fails until the first successful update
pub fn cached_network_fees() -> Result<NetworkFees, RelayError> {
    let load = |value: &AtomicU64| match value.load(Ordering::Acquire) {
        u64::MAX => Err(RelayError::NetworkFeesUninitialized),
        v => Ok(v),
    };
    Ok(NetworkFees {
        lamports_per_signature: load(&LAMPORTS_PER_SIGNATURE)?,
        minimum_token_account_balance: load(&TOKEN_ACCOUNT_RENT)?,
        minimum_relay_account_balance: load(&RELAY_ACCOUNT_RENT)?,
    })
}

/// Spawns a task refreshing the cache every hour
pub fn start_network_fee_updater<C>(client: Arc<C>) -> tokio::task::JoinHandle<()>
where
    C: RelayRpcClient + ?Sized + 'static,
{
    tokio::spawn(async move {
        loop {
            if let Err(e) = update_network_fees(client.as_ref()).await {
                warn!("network fee refresh failed: {}", e);
            }
            sleep(NETWORK_FEE_REFRESH_INTERVAL).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::rpc_client::AccountSnapshot;
    use async_trait::async_trait;
    use solana_sdk::pubkey::Pubkey;

    struct FixedRpc;

    #[async_trait]
    impl RelayRpcClient for FixedRpc {
        async fn get_account(&self, _: &Pubkey) -> Result<Option<AccountSnapshot>, RelayError> {
            Ok(None)
        }

        async fn get_minimum_balance_for_rent_exemption(
            &self,
            data_len: usize,
        ) -> Result<u64, RelayError> {
            Ok(match data_len {
                TOKEN_ACCOUNT_LEN => 2_039_280,
                RELAY_ACCOUNT_LEN => 890_880,
                _ => unreachable!(),
            })
        }

        async fn get_lamports_per_signature(&self) -> Result<u64, RelayError> {
            Ok(5000)
        }
    }

    struct BrokenRpc;

    #[async_trait]
    impl RelayRpcClient for BrokenRpc {
        async fn get_account(&self, _: &Pubkey) -> Result<Option<AccountSnapshot>, RelayError> {
            Err(RelayError::Rpc("down".into()))
        }

        async fn get_minimum_balance_for_rent_exemption(&self, _: usize) -> Result<u64, RelayError> {
            Ok(2_039_280)
        }

        async fn get_lamports_per_signature(&self) -> Result<u64, RelayError> {
            Err(RelayError::Rpc("down".into()))
        }
    }

    #[tokio::test]
    async fn test_fetch_network_fees() {
        let fees = fetch_network_fees(&FixedRpc).await.unwrap();
        assert_eq!(
            fees,
            NetworkFees {
                lamports_per_signature: 5000,
                minimum_token_account_balance: 2_039_280,
                minimum_relay_account_balance: 890_880,
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_network_fees_propagates_rpc_error() {
        assert!(matches!(fetch_network_fees(&BrokenRpc).await, Err(RelayError::Rpc(_))));
    }

    #[tokio::test]
    async fn test_update_fills_cache() {
        update_network_fees(&FixedRpc).await.unwrap();
        let cached = cached_network_fees().unwrap();
        assert_eq!(cached.lamports_per_signature, 5000);
        assert_eq!(cached.minimum_relay_account_balance, 890_880);
    }
}
