//! RPC seam used by the fee relayer
//!
//! Production code talks to [`SolanaRpcClient`]; tests plug in-memory
//! implementations of [`RelayRpcClient`] instead.

use async_trait::async_trait;
use solana_sdk::{message::Message, pubkey::Pubkey};
use std::sync::Arc;

use super::SolanaRpcClient;
use crate::relay::error::RelayError;

/// The parts of an on-chain account the fee relayer looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountSnapshot {
    pub owner: Pubkey,
    pub lamports: u64,
    pub data_len: usize,
}

#[async_trait]
pub trait RelayRpcClient: Send + Sync {
    /// Fetches an account; `Ok(None)` when it does not exist
    async fn get_account(&self, address: &Pubkey) -> Result<Option<AccountSnapshot>, RelayError>;

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, RelayError>;

    /// Current cost of a single signature
    async fn get_lamports_per_signature(&self) -> Result<u64, RelayError>;
}

fn rpc_error(e: impl std::fmt::Display) -> RelayError {
    RelayError::Rpc(e.to_string())
}

#[async_trait]
impl RelayRpcClient for SolanaRpcClient {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<AccountSnapshot>, RelayError> {
        let response = self
            .get_account_with_commitment(address, self.commitment())
            .await
            .map_err(rpc_error)?;
        Ok(response.value.map(|account| AccountSnapshot {
            owner: account.owner,
            lamports: account.lamports,
            data_len: account.data.len(),
        }))
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, RelayError> {
        SolanaRpcClient::get_minimum_balance_for_rent_exemption(self, data_len)
            .await
            .map_err(rpc_error)
    }

    async fn get_lamports_per_signature(&self) -> Result<u64, RelayError> {
        // fee of an empty message equals the cost of its single fee-payer signature
        let blockhash = self.get_latest_blockhash().await.map_err(rpc_error)?;
        let payer = Pubkey::new_unique();
        let message = Message::new_with_blockhash(&[], Some(&payer), &blockhash);
        self.get_fee_for_message(&message).await.map_err(rpc_error)
    }
}

#[async_trait]
impl<T: RelayRpcClient + ?Sized> RelayRpcClient for Arc<T> {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<AccountSnapshot>, RelayError> {
        (**self).get_account(address).await
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, RelayError> {
        (**self).get_minimum_balance_for_rent_exemption(data_len).await
    }

    async fn get_lamports_per_signature(&self) -> Result<u64, RelayError> {
        (**self).get_lamports_per_signature().await
    }
}
