//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration. Every option can also be supplied through its
//! environment variable.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_DNS_PORT, DEFAULT_DNS_TIMEOUT_MS, DEFAULT_PORT,
    MAX_DNS_TIMEOUT_MS,
};
use crate::error_handling::ConfigValidationError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: One JSON object per line for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Server configuration.
///
/// Parsed from the command line with environment fallbacks, or built
/// programmatically from `Default`.
///
/// # Examples
///
/// ```bash
/// # Defaults: 0.0.0.0:4000, system resolvers, 3000ms per record kind
/// netdiag
///
/// # Custom upstream servers and a tighter timeout
/// netdiag --dns-server 1.1.1.1,9.9.9.9:53 --dns-timeout-ms 1500
///
/// # Same thing through the environment
/// DNS_RESOLVER_HOST=1.1.1.1 DNS_RESOLVER_TIMEOUT_MS=1500 netdiag
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "netdiag",
    about = "Serves concurrent multi-record DNS lookups over HTTP."
)]
pub struct Config {
    /// Address to bind the HTTP server to
    #[arg(long = "bind", env = "BIND_ADDRESS", default_value = DEFAULT_BIND_ADDRESS)]
    pub bind_address: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Upstream DNS servers (`ip` or `ip:port`, comma separated).
    /// Uses the system resolver configuration when empty.
    #[arg(
        long = "dns-server",
        env = "DNS_RESOLVER_HOST",
        value_delimiter = ','
    )]
    pub dns_servers: Vec<String>,

    /// Per-record-kind lookup timeout in milliseconds
    #[arg(long, env = "DNS_RESOLVER_TIMEOUT_MS", default_value_t = DEFAULT_DNS_TIMEOUT_MS)]
    pub dns_timeout_ms: u64,

    /// Browser origin allowed to call the API (enables CORS when set)
    #[arg(long, env = "FRONTEND_ORIGIN")]
    pub frontend_origin: Option<String>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, env = "LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            dns_servers: Vec::new(),
            dns_timeout_ms: DEFAULT_DNS_TIMEOUT_MS,
            frontend_origin: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// The per-kind lookup timeout.
    pub fn dns_timeout(&self) -> Duration {
        Duration::from_millis(self.dns_timeout_ms)
    }

    /// The socket address the HTTP server listens on.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// Parses the configured upstream servers, defaulting the port to 53.
    ///
    /// Blank entries are skipped. An empty result means "use the system
    /// resolver configuration".
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` for the first entry that is neither an
    /// IP address nor an `ip:port` pair.
    pub fn dns_server_addrs(&self) -> Result<Vec<SocketAddr>, ConfigValidationError> {
        self.dns_servers
            .iter()
            .map(|entry| entry.trim())
            .filter(|entry| !entry.is_empty())
            .map(parse_dns_server)
            .collect()
    }

    /// Checks option values that clap's type parsing cannot catch.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` naming the first invalid option.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.dns_timeout_ms == 0 {
            return Err(ConfigValidationError {
                field: "dns_timeout_ms",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.dns_timeout_ms > MAX_DNS_TIMEOUT_MS {
            return Err(ConfigValidationError {
                field: "dns_timeout_ms",
                message: format!("must be at most {MAX_DNS_TIMEOUT_MS}ms"),
            });
        }
        if self.port == 0 {
            return Err(ConfigValidationError {
                field: "port",
                message: "must be greater than 0".to_string(),
            });
        }
        self.dns_server_addrs()?;
        Ok(())
    }
}

fn parse_dns_server(entry: &str) -> Result<SocketAddr, ConfigValidationError> {
    if let Ok(addr) = entry.parse::<SocketAddr>() {
        return Ok(addr);
    }
    entry
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
        .map_err(|_| ConfigValidationError {
            field: "dns_servers",
            message: format!("'{entry}' is not an IP address or ip:port pair"),
        })
}
