//! Relay account and free-fee state of a user

use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;

/// Free transaction quota the relayer grants an authority for the current period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UsageStatus {
    pub max_usage: u64,
    pub current_usage: u64,
    pub max_amount: u64,
    pub amount_used: u64,
    pub reached_limit_link_creation: bool,
}

impl UsageStatus {
    pub fn is_free_transaction_fee_available(&self, transaction_fee: u64) -> bool {
        self.current_usage < self.max_usage
            && self
                .amount_used
                .checked_add(transaction_fee)
                .is_some_and(|used| used <= self.max_amount)
    }

    /// State after one more free transaction of `transaction_fee` lamports
    pub fn after_transaction(&self, transaction_fee: u64) -> UsageStatus {
        UsageStatus {
            current_usage: self.current_usage.saturating_add(1),
            amount_used: self.amount_used.saturating_add(transaction_fee),
            ..*self
        }
    }

    pub fn free_transactions_left(&self) -> u64 {
        self.max_usage.saturating_sub(self.current_usage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayAccountStatus {
    NotYetCreated,
    Created { balance: u64 },
}

impl RelayAccountStatus {
    pub fn balance(&self) -> Option<u64> {
        match self {
            RelayAccountStatus::NotYetCreated => None,
            RelayAccountStatus::Created { balance } => Some(*balance),
        }
    }
}

/// Everything a fee calculation needs to know about the network and the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayContext {
    pub minimum_token_account_balance: u64,
    pub minimum_relay_account_balance: u64,
    pub fee_payer_address: Pubkey,
    pub lamports_per_signature: u64,
    pub relay_account_status: RelayAccountStatus,
    pub usage_status: UsageStatus,
}

/// `GET /free_fee_limits/{authority}` response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeeLimitForAuthorityResponse {
    pub authority: Vec<u8>,
    pub limits: FeeLimits,
    pub processed_fee: ProcessedFee,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeeLimits {
    pub use_free_fee: bool,
    pub max_fee_amount: u64,
    pub max_fee_count: u64,
    pub max_token_account_creation_amount: u64,
    pub max_token_account_creation_count: u64,
    pub period: LimitPeriod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LimitPeriod {
    pub secs: u64,
    pub nanos: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ProcessedFee {
    pub total_fee_amount: u64,
    pub fee_count: u64,
    pub rent_count: u64,
}

impl From<FeeLimitForAuthorityResponse> for UsageStatus {
    fn from(response: FeeLimitForAuthorityResponse) -> Self {
        UsageStatus {
            max_usage: response.limits.max_fee_count,
            current_usage: response.processed_fee.fee_count,
            max_amount: response.limits.max_fee_amount,
            amount_used: response.processed_fee.total_fee_amount,
            reached_limit_link_creation: response.processed_fee.rent_count
                >= response.limits.max_token_account_creation_count,
        }
    }
}
