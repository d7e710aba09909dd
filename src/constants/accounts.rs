use solana_sdk::{pubkey, pubkey::Pubkey};
use spl_token::solana_program::program_pack::Pack;

pub const SYSTEM_PROGRAM: Pubkey = pubkey!("11111111111111111111111111111111");

pub const TOKEN_PROGRAM: Pubkey = spl_token::ID;

pub const TOKEN_PROGRAM_2022: Pubkey = spl_token_2022::ID;

/// Size of an SPL token account, used for the rent-exempt minimum
pub const TOKEN_ACCOUNT_LEN: usize = spl_token::state::Account::LEN;

/// The user relay account is a plain system account holding lamports only
pub const RELAY_ACCOUNT_LEN: usize = 0;
