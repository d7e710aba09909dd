use solana_sdk::{pubkey, pubkey::Pubkey};
use std::str::FromStr;

pub const RELAY_PROGRAM_MAINNET: Pubkey = pubkey!("12YKFL4mnZz6CBEGePrf293mEzueQM3h8VLPUJsKpGs9");

pub const RELAY_PROGRAM_DEVNET: Pubkey = pubkey!("6xKJFyuM6UHCT8F5SBxnjGt6ZrZYjsVfnAnAeHPU775k");

/// Solana cluster the relay program is deployed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Network {
    #[default]
    MainnetBeta,
    Devnet,
    Testnet,
}

impl Network {
    pub fn relay_program_id(&self) -> Pubkey {
        match self {
            Network::MainnetBeta => RELAY_PROGRAM_MAINNET,
            // testnet has no dedicated deployment
            Network::Devnet | Network::Testnet => RELAY_PROGRAM_DEVNET,
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "mainnet-beta" | "mainnetbeta" => Ok(Network::MainnetBeta),
            "devnet" => Ok(Network::Devnet),
            "testnet" => Ok(Network::Testnet),
            _ => Err(format!("Invalid network: {}", s)),
        }
    }
}
