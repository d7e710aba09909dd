//! Lamport fee accounting

use serde::{Deserialize, Serialize};

use super::error::RelayError;

/// Fee of a transaction split into signature costs and rent deposits.
///
/// Both parts only ever grow while a fee is being estimated. Accumulation is
/// checked: an overflow is reported as [`RelayError::Overflow`] so an
/// understated fee is never returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FeeAmount {
    /// Lamports paid for required signatures
    pub transaction: u64,
    /// Lamports deposited as rent-exempt balance of newly created accounts
    #[serde(rename = "accountBalances", alias = "account_balances")]
    pub account_balances: u64,
}

impl FeeAmount {
    pub const ZERO: FeeAmount = FeeAmount { transaction: 0, account_balances: 0 };

    pub const fn new(transaction: u64, account_balances: u64) -> Self {
        Self { transaction, account_balances }
    }

    /// Sum of both parts, saturating at `u64::MAX`
    pub fn total(&self) -> u64 {
        self.transaction.saturating_add(self.account_balances)
    }

    pub fn is_zero(&self) -> bool {
        self.transaction == 0 && self.account_balances == 0
    }

    /// Adds `lamports` to the signature part
    pub fn add_transaction_fee(&mut self, lamports: u64) -> Result<(), RelayError> {
        self.transaction = self
            .transaction
            .checked_add(lamports)
            .ok_or(RelayError::Overflow("transaction fee"))?;
        Ok(())
    }

    /// Adds `count` signatures of `lamports_per_signature` each
    pub fn add_signatures(
        &mut self,
        count: u64,
        lamports_per_signature: u64,
    ) -> Result<(), RelayError> {
        let lamports = lamports_per_signature
            .checked_mul(count)
            .ok_or(RelayError::Overflow("signature fee"))?;
        self.add_transaction_fee(lamports)
    }

    /// Adds `lamports` to the rent part
    pub fn add_account_balance(&mut self, lamports: u64) -> Result<(), RelayError> {
        self.account_balances = self
            .account_balances
            .checked_add(lamports)
            .ok_or(RelayError::Overflow("account balances"))?;
        Ok(())
    }

    pub fn checked_add(&self, other: &FeeAmount) -> Result<FeeAmount, RelayError> {
        let mut sum = *self;
        sum.add_transaction_fee(other.transaction)?;
        sum.add_account_balance(other.account_balances)?;
        Ok(sum)
    }
}
