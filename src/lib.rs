//! netdiag library: concurrent multi-record DNS diagnostics
//!
//! This library resolves several DNS record kinds (A, AAAA, MX, CNAME, NS, SOA,
//! TXT) for one domain concurrently, each under its own timeout, and returns
//! whatever succeeded. Failures are classified into stable error codes with a
//! transport-independent severity, and an axum router exposes both over HTTP.
//!
//! # Example
//!
//! ```no_run
//! use netdiag::{run_server, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     port: 8080,
//!     dns_servers: vec!["1.1.1.1".to_string()],
//!     ..Default::default()
//! };
//!
//! run_server(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod config;
pub mod dns;
pub mod error_handling;
pub mod initialization;
pub mod server;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use dns::{DnsService, DomainQuery, LookupResult, RecordKind, RecordLookup, ResolvedRecords};
pub use error_handling::{ClassifiedError, ErrorCode, StatusSeverity};
pub use run::run_server;
pub use server::{build_router, AppState};

// Internal run module (server startup sequence)
mod run {
    use anyhow::{Context, Result};
    use log::info;

    use crate::config::Config;
    use crate::initialization::init_dns_service;
    use crate::server::{start_server, AppState};

    /// Validates `config`, builds the resolver and engine, and serves the
    /// API until shutdown.
    ///
    /// The logger is not initialized here; callers set it up first.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the resolver cannot
    /// be built, or the server fails to bind or serve.
    pub async fn run_server(config: Config) -> Result<()> {
        config.validate().context("Invalid configuration")?;

        let dns = init_dns_service(&config).context("Failed to initialize DNS resolver")?;
        info!(
            "DNS engine ready ({}ms per record type)",
            dns.default_timeout().as_millis()
        );

        start_server(&config, AppState::new(dns)).await
    }
}
