pub mod api_client;
pub mod context;
pub mod context_manager;
pub mod destination;
pub mod error;
pub mod fee_amount;
pub mod program;
pub mod relay_fee;
pub mod swap_fee;

pub use api_client::{FeeRelayerApi, FeeRelayerApiClient};
pub use context::{FeeLimitForAuthorityResponse, RelayAccountStatus, RelayContext, UsageStatus};
pub use context_manager::RelayContextManager;
pub use destination::{DestinationAnalysisResult, DestinationAnalyzer, RpcDestinationAnalyzer};
pub use error::RelayError;
pub use fee_amount::FeeAmount;
pub use program::*;
pub use relay_fee::{DefaultRelayFeeCalculator, RelayFeeCalculator};
pub use swap_fee::{DefaultSwapFeeRelayerCalculator, SwapFeeRelayerCalculator};
