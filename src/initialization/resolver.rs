//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use std::sync::Arc;

use hickory_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use log::{info, warn};

use crate::config::{Config, RESOLVER_IO_GRACE};
use crate::error_handling::InitializationError;

/// Initializes the DNS resolver used for record lookups.
///
/// Uses the configured upstream servers (UDP with TCP fallback) or, when none
/// are configured, the system resolver configuration. If the system
/// configuration cannot be read, hickory's default upstreams are used.
///
/// The resolver makes a single attempt per query and keeps no cache, so
/// every request sees fresh answers and the engine's per-kind deadline is
/// the effective bound. The resolver's own I/O timeout sits slightly above
/// that deadline.
///
/// # Returns
///
/// A configured `TokioAsyncResolver` wrapped in `Arc` for sharing across tasks,
/// or an error if initialization fails.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if a configured upstream
/// server is not a valid address.
pub fn init_resolver(config: &Config) -> Result<Arc<TokioAsyncResolver>, InitializationError> {
    let servers = config
        .dns_server_addrs()
        .map_err(|e| InitializationError::DnsResolverError(e.to_string()))?;

    let (resolver_config, mut opts) = if servers.is_empty() {
        match hickory_resolver::system_conf::read_system_conf() {
            Ok(system) => {
                info!("Using system DNS resolver configuration");
                system
            }
            Err(e) => {
                warn!("Failed to read system DNS configuration, using defaults: {e}");
                (ResolverConfig::default(), ResolverOpts::default())
            }
        }
    } else {
        let mut resolver_config = ResolverConfig::new();
        for addr in &servers {
            resolver_config.add_name_server(NameServerConfig::new(*addr, Protocol::Udp));
            resolver_config.add_name_server(NameServerConfig::new(*addr, Protocol::Tcp));
        }
        info!(
            "Using DNS servers: {}",
            servers
                .iter()
                .map(|a| a.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        (resolver_config, ResolverOpts::default())
    };

    opts.timeout = config.dns_timeout() + RESOLVER_IO_GRACE;
    opts.attempts = 1;
    // No search-domain appending; names are looked up as given
    opts.ndots = 0;
    opts.cache_size = 0;

    Ok(Arc::new(TokioAsyncResolver::tokio(resolver_config, opts)))
}
