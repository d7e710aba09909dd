//! Top-up amount for the user relay account
//!
//! When a user pays fees in an SPL token the relayer first tops up the user's
//! relay account, which then acts as fee payer. The top-up must cover the
//! transaction fee, new account rent and keep the relay account rent exempt,
//! minus whatever the free quota and the current relay balance already cover.

use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use super::context::RelayContext;
use super::error::RelayError;
use super::fee_amount::FeeAmount;
use crate::constants::{MINIMUM_TOP_UP_AMOUNT, TOP_UP_SIGNATURES, is_wsol_mint};

pub trait RelayFeeCalculator: Send + Sync {
    /// Lamports to top up the relay account with before sending a
    /// transaction whose fee would be `expected_fee` if sent directly.
    fn calculate_needed_top_up_amount(
        &self,
        context: &RelayContext,
        expected_fee: FeeAmount,
        paying_token_mint: Option<&Pubkey>,
    ) -> Result<FeeAmount, RelayError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRelayFeeCalculator;

impl DefaultRelayFeeCalculator {
    pub fn new() -> Self {
        Self
    }

    fn calculate_min_top_up_amount(
        &self,
        context: &RelayContext,
        expected_fee: FeeAmount,
        paying_token_mint: Option<&Pubkey>,
    ) -> Result<FeeAmount, RelayError> {
        let expected_top_up_fee = context
            .lamports_per_signature
            .checked_mul(TOP_UP_SIGNATURES)
            .ok_or(RelayError::Overflow("top up fee"))?;

        let usage = &context.usage_status;
        let top_up_fee = if usage.is_free_transaction_fee_available(expected_top_up_fee) {
            0
        } else {
            expected_top_up_fee
        };
        let transaction_fee = if usage
            .after_transaction(expected_top_up_fee)
            .is_free_transaction_fee_available(expected_fee.transaction)
        {
            0
        } else {
            expected_fee.transaction
        };

        let mut needed = FeeAmount::new(top_up_fee, expected_fee.account_balances);
        needed.add_transaction_fee(transaction_fee)?;
        if needed.is_zero() {
            return Ok(needed);
        }

        let without_relay_account = needed;
        let minimum_relay_balance = context.minimum_relay_account_balance;

        match context.relay_account_status.balance() {
            None => needed.add_account_balance(minimum_relay_balance)?,
            Some(balance) if balance < minimum_relay_balance => {
                needed.add_account_balance(minimum_relay_balance - balance)?
            }
            Some(balance) => {
                // surplus above the rent-exempt minimum pays transaction fee first
                let mut surplus = balance - minimum_relay_balance;
                if surplus >= needed.transaction {
                    surplus -= needed.transaction;
                    needed.transaction = 0;
                    needed.account_balances = needed.account_balances.saturating_sub(surplus);
                } else {
                    needed.transaction -= surplus;
                }
            }
        }

        // paying with SOL skips the relay account entirely
        if !needed.is_zero() && paying_token_mint.is_some_and(is_wsol_mint) {
            return Ok(without_relay_account);
        }

        Ok(needed)
    }
}

impl RelayFeeCalculator for DefaultRelayFeeCalculator {
    fn calculate_needed_top_up_amount(
        &self,
        context: &RelayContext,
        expected_fee: FeeAmount,
        paying_token_mint: Option<&Pubkey>,
    ) -> Result<FeeAmount, RelayError> {
        let mut amount = self.calculate_min_top_up_amount(context, expected_fee, paying_token_mint)?;

        let total = amount.total();
        if total > 0 && total < MINIMUM_TOP_UP_AMOUNT {
            amount.add_transaction_fee(MINIMUM_TOP_UP_AMOUNT - total)?;
        }

        debug!(
            expected_transaction = expected_fee.transaction,
            expected_account_balances = expected_fee.account_balances,
            transaction = amount.transaction,
            account_balances = amount.account_balances,
            "relay top up amount calculated"
        );
        Ok(amount)
    }
}
