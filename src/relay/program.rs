//! Relay program addresses

use solana_sdk::pubkey::Pubkey;

use crate::constants::Network;

const RELAY_SEED: &[u8] = b"relay";
const TEMPORARY_WSOL_SEED: &[u8] = b"temporary_wsol";
const TRANSIT_SEED: &[u8] = b"transit";

/// Account holding the lamports the relayer spends on behalf of `user`
pub fn get_user_relay_address(user: &Pubkey, network: Network) -> Pubkey {
    Pubkey::find_program_address(&[user.as_ref(), RELAY_SEED], &network.relay_program_id()).0
}

pub fn get_user_temporary_wsol_address(user: &Pubkey, network: Network) -> Pubkey {
    Pubkey::find_program_address(
        &[user.as_ref(), TEMPORARY_WSOL_SEED],
        &network.relay_program_id(),
    )
    .0
}

/// Intermediate token account used by two-hop swaps
pub fn get_transit_token_account_address(
    user: &Pubkey,
    transit_token_mint: &Pubkey,
    network: Network,
) -> Pubkey {
    Pubkey::find_program_address(
        &[user.as_ref(), transit_token_mint.as_ref(), TRANSIT_SEED],
        &network.relay_program_id(),
    )
    .0
}
