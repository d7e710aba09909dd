//! Well-known token mints
//!
//! Mint addresses are compared by equality only, so they live here as
//! compile-time constants.

use solana_sdk::pubkey;

pub use solana_sdk::pubkey::Pubkey;

/// Wrapped SOL mint, the token-account form of the native currency
pub const WSOL_MINT: Pubkey = pubkey!("So11111111111111111111111111111111111111112");

/// USDC Mint (mainnet)
pub const USDC_MINT: Pubkey = pubkey!("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");

/// USDT Mint (mainnet)
pub const USDT_MINT: Pubkey = pubkey!("Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB");

/// Returns `true` when `mint` is the wrapped native mint.
#[inline]
pub fn is_wsol_mint(mint: &Pubkey) -> bool {
    *mint == WSOL_MINT
}
