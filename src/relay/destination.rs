//! Destination account analysis
//!
//! Before a swap the relayer needs to know whether the receiving token
//! account exists, because creating it costs a rent-exempt deposit.

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::error::RelayError;
use crate::common::rpc_client::RelayRpcClient;
use crate::constants::{TOKEN_PROGRAM, is_wsol_mint};
use crate::utils::token::get_associated_token_address;

/// What is known about a destination account before a transfer or swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DestinationAnalysisResult {
    /// Destination receives native SOL through a wrapped SOL account
    WsolAccount,
    /// Destination is the owner's associated SPL token account
    SplAccount { needs_creation: bool },
}

impl DestinationAnalysisResult {
    pub fn needs_creation(&self) -> bool {
        matches!(self, DestinationAnalysisResult::SplAccount { needs_creation: true })
    }
}

#[async_trait]
pub trait DestinationAnalyzer: Send + Sync {
    async fn analyse_destination(
        &self,
        owner: &Pubkey,
        mint: &Pubkey,
    ) -> Result<DestinationAnalysisResult, RelayError>;
}

#[async_trait]
impl<T: DestinationAnalyzer + ?Sized> DestinationAnalyzer for Arc<T> {
    async fn analyse_destination(
        &self,
        owner: &Pubkey,
        mint: &Pubkey,
    ) -> Result<DestinationAnalysisResult, RelayError> {
        (**self).analyse_destination(owner, mint).await
    }
}

/// Analyzer looking the owner's associated token account up over RPC
pub struct RpcDestinationAnalyzer<C: ?Sized> {
    rpc: Arc<C>,
    timeout: Option<Duration>,
}

impl<C: RelayRpcClient + ?Sized> RpcDestinationAnalyzer<C> {
    pub fn new(rpc: Arc<C>) -> Self {
        Self { rpc, timeout: None }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn lookup(&self, address: &Pubkey) -> Result<bool, RelayError> {
        let fetch = self.rpc.get_account(address);
        let account = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, fetch)
                .await
                .map_err(|_| RelayError::Timeout("destination lookup"))??,
            None => fetch.await?,
        };
        Ok(account.is_some_and(|account| account.owner == TOKEN_PROGRAM))
    }
}

#[async_trait]
impl<C: RelayRpcClient + ?Sized> DestinationAnalyzer for RpcDestinationAnalyzer<C> {
    async fn analyse_destination(
        &self,
        owner: &Pubkey,
        mint: &Pubkey,
    ) -> Result<DestinationAnalysisResult, RelayError> {
        if is_wsol_mint(mint) {
            return Ok(DestinationAnalysisResult::WsolAccount);
        }

        let address = get_associated_token_address(owner, mint);
        let exists = self.lookup(&address).await?;
        debug!(%owner, %mint, %address, exists, "destination analysed");
        Ok(DestinationAnalysisResult::SplAccount { needs_creation: !exists })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::rpc_client::AccountSnapshot;
    use crate::constants::{SYSTEM_PROGRAM, USDC_MINT, WSOL_MINT};
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct AccountsRpc {
        accounts: Mutex<HashMap<Pubkey, AccountSnapshot>>,
        fail: bool,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RelayRpcClient for AccountsRpc {
        async fn get_account(
            &self,
            address: &Pubkey,
        ) -> Result<Option<AccountSnapshot>, RelayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                return Err(RelayError::Rpc("node unavailable".into()));
            }
            Ok(self.accounts.lock().get(address).copied())
        }

        async fn get_minimum_balance_for_rent_exemption(&self, _: usize) -> Result<u64, RelayError> {
            Ok(2_039_280)
        }

        async fn get_lamports_per_signature(&self) -> Result<u64, RelayError> {
            Ok(5000)
        }
    }

    fn token_account(owner: Pubkey) -> AccountSnapshot {
        AccountSnapshot { owner, lamports: 2_039_280, data_len: 165 }
    }

    #[tokio::test]
    async fn test_wsol_destination_skips_rpc() {
        let rpc = Arc::new(AccountsRpc::default());
        let analyzer = RpcDestinationAnalyzer::new(rpc.clone());
        let result = analyzer.analyse_destination(&Pubkey::new_unique(), &WSOL_MINT).await;
        assert_eq!(result.unwrap(), DestinationAnalysisResult::WsolAccount);
        assert_eq!(rpc.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_account_needs_creation() {
        let rpc = Arc::new(AccountsRpc::default());
        let analyzer = RpcDestinationAnalyzer::new(rpc.clone());
        let result = analyzer.analyse_destination(&Pubkey::new_unique(), &USDC_MINT).await.unwrap();
        assert_eq!(result, DestinationAnalysisResult::SplAccount { needs_creation: true });
        assert!(result.needs_creation());
        assert_eq!(rpc.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_existing_token_account() {
        let owner = Pubkey::new_unique();
        let rpc = Arc::new(AccountsRpc::default());
        rpc.accounts
            .lock()
            .insert(get_associated_token_address(&owner, &USDC_MINT), token_account(TOKEN_PROGRAM));

        let analyzer = RpcDestinationAnalyzer::new(rpc);
        let result = analyzer.analyse_destination(&owner, &USDC_MINT).await.unwrap();
        assert_eq!(result, DestinationAnalysisResult::SplAccount { needs_creation: false });
    }

    #[tokio::test]
    async fn test_account_with_foreign_owner_needs_creation() {
        let owner = Pubkey::new_unique();
        let rpc = Arc::new(AccountsRpc::default());
        rpc.accounts
            .lock()
            .insert(get_associated_token_address(&owner, &USDC_MINT), token_account(SYSTEM_PROGRAM));

        let analyzer = RpcDestinationAnalyzer::new(rpc);
        let result = analyzer.analyse_destination(&owner, &USDC_MINT).await.unwrap();
        assert!(result.needs_creation());
    }

    #[tokio::test]
    async fn test_rpc_failure_propagates() {
        let rpc = Arc::new(AccountsRpc { fail: true, ..Default::default() });
        let analyzer = RpcDestinationAnalyzer::new(rpc);
        let result = analyzer.analyse_destination(&Pubkey::new_unique(), &USDC_MINT).await;
        assert!(matches!(result, Err(RelayError::Rpc(_))));
    }

    #[tokio::test]
    async fn test_lookup_timeout() {
        let rpc = Arc::new(AccountsRpc {
            delay: Some(Duration::from_millis(200)),
            ..Default::default()
        });
        let analyzer =
            RpcDestinationAnalyzer::new(rpc).with_timeout(Some(Duration::from_millis(10)));
        let result = analyzer.analyse_destination(&Pubkey::new_unique(), &USDC_MINT).await;
        assert!(matches!(result, Err(RelayError::Timeout(_))));
    }
}
