//! Fee relayer tests against a live RPC node and relayer service
//!
//! Configuration comes from the environment (or a local `.env`):
//! `RPC_URL`, `FEE_RELAYER_URL`, optionally `FEE_RELAYER_API_VERSION` and
//! `SOLANA_NETWORK`.
//!
//!     cargo test --test live_relay_tests -- --ignored --nocapture


use dotenvy::dotenv;
use sol_fee_relayer::FeeRelayer;
use sol_fee_relayer::common::{RelayConfig, SolanaRpcClient, fetch_network_fees};
use sol_fee_relayer::constants::{USDC_MINT, WSOL_MINT};
use test_helpers::owner;

fn live_config() -> RelayConfig {
    let _ = dotenv();
    RelayConfig::from_env().expect("FEE_RELAYER_URL must be set for live tests")
}

#[tokio::test]
#[ignore]
async fn test_live_network_fees() {
    let config = live_config();
    let rpc = SolanaRpcClient::new_with_commitment(config.rpc_url.clone(), config.commitment);

    let fees = fetch_network_fees(&rpc).await.unwrap();
    println!("network fees: {:?}", fees);
    assert!(fees.lamports_per_signature > 0);
    assert!(fees.minimum_token_account_balance > fees.minimum_relay_account_balance);
}

#[tokio::test]
#[ignore]
async fn test_live_swap_network_fees() {
    let relayer = FeeRelayer::new(live_config()).unwrap();

    let context = relayer.relay_context(&owner()).await.unwrap();
    println!("relay context: {:?}", context);

    let fees = relayer
        .calculate_swap_network_fees(&owner(), 1, &WSOL_MINT, &USDC_MINT, None, Some(&WSOL_MINT))
        .await
        .unwrap();
    println!("swap network fees: {:?}", fees);
    assert!(fees.network_fee.transaction <= 3 * context.lamports_per_signature);
}
