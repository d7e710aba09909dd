use std::time::Duration;

/// Smallest non-zero top-up the relayer accepts, in lamports
pub const MINIMUM_TOP_UP_AMOUNT: u64 = 10_000;

/// Signatures a relay top-up transaction carries: fee payer and owner
pub const TOP_UP_SIGNATURES: u64 = 2;

/// How long a relay context stays valid in the cache
pub const DEFAULT_RELAY_CONTEXT_TTL: Duration = Duration::from_secs(30);

/// Upper bound on cached relay contexts (one per owner)
pub const DEFAULT_RELAY_CONTEXT_CACHE_SIZE: usize = 64;

/// Refresh interval of the process-wide network fee cache
pub const NETWORK_FEE_REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);
