//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources the
//! server needs before it starts accepting requests:
//! - Logger
//! - DNS resolver
//! - Resolution engine
//!
//! All initialization functions return proper error types for error handling.

mod logger;
mod resolver;

use std::sync::Arc;

use crate::config::Config;
use crate::dns::{DnsService, HickoryLookup};
use crate::error_handling::InitializationError;

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::init_resolver;

/// Initializes the resolution engine over a hickory-backed lookup.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if the resolver cannot be
/// configured from `config`.
pub fn init_dns_service(config: &Config) -> Result<Arc<DnsService>, InitializationError> {
    let resolver = init_resolver(config)?;
    let lookup = Arc::new(HickoryLookup::new(resolver));
    Ok(Arc::new(DnsService::new(lookup, config.dns_timeout())))
}
