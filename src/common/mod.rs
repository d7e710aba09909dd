pub mod network_fees;
pub mod rpc_client;
pub mod ttl_cache;
pub mod types;

pub use network_fees::{NetworkFees, cached_network_fees, fetch_network_fees, start_network_fee_updater, update_network_fees};
pub use rpc_client::{AccountSnapshot, RelayRpcClient};
pub use ttl_cache::TtlCache;
pub use types::*;
