//! Token account address helpers

use solana_sdk::pubkey::Pubkey;

use crate::constants::TOKEN_PROGRAM;

/// Associated token account of `owner` for `mint` under a given token program
pub use spl_associated_token_account::get_associated_token_address_with_program_id;

/// Associated token account under the classic SPL token program
#[inline]
pub fn get_associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(owner, mint, &TOKEN_PROGRAM)
}
