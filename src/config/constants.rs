//! Configuration constants.
//!
//! Defaults and limits shared by the CLI, the resolver setup and query
//! validation.

use std::time::Duration;

// Server defaults
/// Address the HTTP server binds to when none is given
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
/// Port the HTTP server listens on when none is given
pub const DEFAULT_PORT: u16 = 4000;

// DNS resolution
/// Per-kind lookup timeout in milliseconds
/// Most lookups settle well under a second; 3s leaves room for a slow upstream
/// while still failing fast on an unresponsive one
pub const DEFAULT_DNS_TIMEOUT_MS: u64 = 3000;
/// Upper bound accepted for the per-kind timeout
pub const MAX_DNS_TIMEOUT_MS: u64 = 60_000;
/// Port assumed for an upstream server given without one
pub const DEFAULT_DNS_PORT: u16 = 53;
/// Extra time granted to the resolver's own I/O timeout over the per-kind
/// deadline, so the engine deadline is the one that fires first
pub const RESOLVER_IO_GRACE: Duration = Duration::from_millis(500);

// Query validation
/// Maximum length of a domain name in presentation form
pub const MAX_DOMAIN_LENGTH: usize = 253;
