//! Network fee of a swap routed through the fee relayer
//!
//! Signature accounting per swap:
//! - fee payer (relayer) and owner always sign
//! - a WSOL source or destination adds the signature of the temporary WSOL account
//! - a missing destination token account adds its rent-exempt deposit
//! - a two-hop swap out of SOL into an unknown destination is split into two
//!   transactions, each paying for fee payer and owner signatures

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use super::destination::{DestinationAnalysisResult, DestinationAnalyzer};
use super::error::RelayError;
use super::fee_amount::FeeAmount;
use crate::constants::is_wsol_mint;

/// Hop count of a transitive route through an intermediate token
pub const TRANSITIVE_SWAP_HOPS: usize = 2;

#[async_trait]
pub trait SwapFeeRelayerCalculator: Send + Sync {
    /// Estimates the lamports a swap transaction will cost.
    ///
    /// `destination_address` is the destination token account when it is
    /// already known; `None` means it is derived and possibly created.
    async fn estimate_swap_fee(
        &self,
        lamports_per_signature: u64,
        minimum_token_account_balance: u64,
        swap_hop_count: usize,
        source_token_mint: &Pubkey,
        destination_token_mint: &Pubkey,
        destination_address: Option<&Pubkey>,
    ) -> Result<FeeAmount, RelayError>;
}

/// Stateless calculator; the only shared state lives in the analyzer
pub struct DefaultSwapFeeRelayerCalculator<A> {
    destination_analyzer: A,
    owner: Pubkey,
}

impl<A: DestinationAnalyzer> DefaultSwapFeeRelayerCalculator<A> {
    pub fn new(destination_analyzer: A, owner: Pubkey) -> Self {
        Self { destination_analyzer, owner }
    }

    pub fn owner(&self) -> &Pubkey {
        &self.owner
    }
}

#[async_trait]
impl<A: DestinationAnalyzer> SwapFeeRelayerCalculator for DefaultSwapFeeRelayerCalculator<A> {
    async fn estimate_swap_fee(
        &self,
        lamports_per_signature: u64,
        minimum_token_account_balance: u64,
        swap_hop_count: usize,
        source_token_mint: &Pubkey,
        destination_token_mint: &Pubkey,
        destination_address: Option<&Pubkey>,
    ) -> Result<FeeAmount, RelayError> {
        let mut fee = FeeAmount::ZERO;

        // fee payer's signature
        fee.add_transaction_fee(lamports_per_signature)?;
        // owner's signature
        fee.add_transaction_fee(lamports_per_signature)?;

        let source_is_wsol = is_wsol_mint(source_token_mint);
        if source_is_wsol {
            fee.add_transaction_fee(lamports_per_signature)?;
        }

        if is_wsol_mint(destination_token_mint) {
            fee.add_transaction_fee(lamports_per_signature)?;
        } else if destination_address.is_none() {
            let analysis = self
                .destination_analyzer
                .analyse_destination(&self.owner, destination_token_mint)
                .await?;
            if let DestinationAnalysisResult::SplAccount { needs_creation: true } = analysis {
                fee.add_account_balance(minimum_token_account_balance)?;
            }
        }

        // the destination account cannot be created in the same transaction as
        // the second hop, so a separate transaction with its own signatures is sent
        if swap_hop_count == TRANSITIVE_SWAP_HOPS && source_is_wsol && destination_address.is_none()
        {
            fee.add_signatures(2, lamports_per_signature)?;
        }

        debug!(
            source = %source_token_mint,
            destination = %destination_token_mint,
            swap_hop_count,
            transaction = fee.transaction,
            account_balances = fee.account_balances,
            "swap network fee estimated"
        );

        Ok(fee)
    }
}
