//! Central repository for timeouts, limits, wire constants and legacy sentinels
//!
//! Constants are grouped by category so the dialect adapters, the aggregator
//! and the config defaults all read from a single place.

/// HTTP transport constants
pub mod http {
    /// API version requested from Ark v2 nodes
    pub const ARKV2_API_VERSION: &str = "2";
}

/// Limits and constraints
pub mod limits {
    /// Maximum number of discovered peers polled per status cycle
    pub const PEER_NODE_FANOUT: usize = 3;

    /// Largest node response body read before the call is treated as malformed
    pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;
}

/// Default configuration values
pub mod defaults {
    /// Default interval between status cycles in seconds
    pub const CHECK_INTERVAL_SECONDS: u64 = 300;

    /// Default request timeout in seconds, applied to every single node request
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 10;

    /// Default number of hosts polled at once within a group
    pub const MAX_CONCURRENT_POLLS: usize = 4;
}

/// Sentinel values used by the legacy status rendering
pub mod sentinels {
    pub const HEIGHT_FORBIDDEN: u64 = 403;
    pub const HEIGHT_SERVER_ERROR: u64 = 500;
    pub const HEIGHT_UNREACHABLE: u64 = 0;

    pub const VERSION_FORBIDDEN: &str = "403";
    pub const VERSION_SERVER_ERROR: &str = "500";
    pub const VERSION_UNREACHABLE: &str = "";
}
