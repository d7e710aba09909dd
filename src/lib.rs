pub mod common;
pub mod constants;
pub mod relay;
pub mod utils;

use log::debug;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

use crate::common::{RelayConfig, RelayRpcClient, SolanaRpcClient, start_network_fee_updater};
use crate::constants::is_wsol_mint;
pub use crate::relay::{
    DefaultRelayFeeCalculator, DefaultSwapFeeRelayerCalculator, DestinationAnalysisResult,
    DestinationAnalyzer, FeeAmount, FeeRelayerApi, FeeRelayerApiClient, RelayContext,
    RelayContextManager, RelayError, RelayFeeCalculator, RpcDestinationAnalyzer,
    SwapFeeRelayerCalculator,
};

/// Network fee of a swap as it will be charged to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapNetworkFees {
    /// Lamports the user pays: the direct transaction fee when swapping
    /// natively, otherwise the relay top-up amount
    pub network_fee: FeeAmount,
    /// The user pays with SOL and sends the transaction without the relayer
    pub swapping_natively: bool,
    /// No transaction fee is charged to the user
    pub is_free: bool,
    pub free_transactions_left: u64,
}

/// Fee relayer client
///
/// Shares one RPC connection between the relay context loader, the destination
/// analyzer and the network fee updater.
pub struct FeeRelayer {
    config: RelayConfig,
    rpc: Arc<dyn RelayRpcClient>,
    context_manager: RelayContextManager,
    destination_analyzer: Arc<dyn DestinationAnalyzer>,
    relay_fee_calculator: Arc<dyn RelayFeeCalculator>,
}

impl FeeRelayer {
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let rpc = match config.rpc_timeout {
            Some(timeout) => SolanaRpcClient::new_with_timeout_and_commitment(
                config.rpc_url.clone(),
                timeout,
                config.commitment,
            ),
            None => SolanaRpcClient::new_with_commitment(config.rpc_url.clone(), config.commitment),
        };
        let api = FeeRelayerApiClient::new(
            &config.relay_api_url,
            config.api_version,
            config.rpc_timeout,
        )?;
        Ok(Self::with_components(config, Arc::new(rpc), Arc::new(api)))
    }

    /// Builds the client around caller-provided RPC and relayer API implementations
    pub fn with_components(
        config: RelayConfig,
        rpc: Arc<dyn RelayRpcClient>,
        api: Arc<dyn FeeRelayerApi>,
    ) -> Self {
        let destination_analyzer =
            Arc::new(RpcDestinationAnalyzer::new(rpc.clone()).with_timeout(config.rpc_timeout));
        let context_manager = RelayContextManager::new(
            rpc.clone(),
            api,
            config.network,
            config.context_ttl,
            config.context_cache_size,
        );
        Self {
            config,
            rpc,
            context_manager,
            destination_analyzer,
            relay_fee_calculator: Arc::new(DefaultRelayFeeCalculator::new()),
        }
    }

    pub fn with_destination_analyzer(mut self, analyzer: Arc<dyn DestinationAnalyzer>) -> Self {
        self.destination_analyzer = analyzer;
        self
    }

    pub fn with_relay_fee_calculator(mut self, calculator: Arc<dyn RelayFeeCalculator>) -> Self {
        self.relay_fee_calculator = calculator;
        self
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub fn context_manager(&self) -> &RelayContextManager {
        &self.context_manager
    }

    /// Swap fee calculator acting on behalf of `owner`
    pub fn swap_fee_calculator(
        &self,
        owner: Pubkey,
    ) -> DefaultSwapFeeRelayerCalculator<Arc<dyn DestinationAnalyzer>> {
        DefaultSwapFeeRelayerCalculator::new(self.destination_analyzer.clone(), owner)
    }

    /// Keeps the process-wide network fee cache fresh
    pub fn spawn_network_fee_updater(&self) -> tokio::task::JoinHandle<()> {
        start_network_fee_updater(self.rpc.clone())
    }

    pub async fn relay_context(&self, owner: &Pubkey) -> Result<RelayContext, RelayError> {
        self.context_manager.current_context_or_update(owner).await
    }

    /// Fee the user pays for a swap through `swap_pools_count` pools.
    ///
    /// Paying with SOL without free transactions left sends the swap directly,
    /// saving the relayer's fee payer signature. Any other case goes through
    /// the relay account and costs its top-up amount.
    pub async fn calculate_swap_network_fees(
        &self,
        owner: &Pubkey,
        swap_pools_count: usize,
        source_token_mint: &Pubkey,
        destination_token_mint: &Pubkey,
        destination_address: Option<&Pubkey>,
        paying_token_mint: Option<&Pubkey>,
    ) -> Result<SwapNetworkFees, RelayError> {
        let context = self.relay_context(owner).await?;

        let mut network_fee = self
            .swap_fee_calculator(*owner)
            .estimate_swap_fee(
                context.lamports_per_signature,
                context.minimum_token_account_balance,
                swap_pools_count,
                source_token_mint,
                destination_token_mint,
                destination_address,
            )
            .await?;

        let swapping_natively = paying_token_mint.is_some_and(is_wsol_mint)
            && !context
                .usage_status
                .is_free_transaction_fee_available(network_fee.transaction);

        if swapping_natively {
            network_fee.transaction =
                network_fee.transaction.saturating_sub(context.lamports_per_signature);
        } else {
            network_fee = self.relay_fee_calculator.calculate_needed_top_up_amount(
                &context,
                network_fee,
                paying_token_mint,
            )?;
        }

        let fees = SwapNetworkFees {
            network_fee,
            swapping_natively,
            is_free: network_fee.transaction == 0,
            free_transactions_left: context.usage_status.free_transactions_left(),
        };
        debug!(
            "swap network fees for {}: {:?} (natively: {}, free: {})",
            owner, fees.network_fee, fees.swapping_natively, fees.is_free
        );
        Ok(fees)
    }
}
