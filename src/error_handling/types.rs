//! Error type definitions.
//!
//! This module defines the raw failures produced by record lookups and the
//! resolution engine, the pre-flight query validation errors, and the
//! caller-facing classified shape they are all mapped onto.

use std::fmt;
use std::time::Duration;

use log::SetLoggerError;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::dns::RecordKind;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error building the DNS resolver (e.g. an unparsable upstream server).
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}

/// A configuration value rejected before the server starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid configuration for {field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending option (e.g. `dns_timeout_ms`)
    pub field: &'static str,
    pub message: String,
}

/// Reply codes reported by the name-resolution facility.
///
/// These are carried verbatim from the resolver; mapping them to
/// caller-facing codes is the classifier's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FaultCode {
    /// The name does not exist (NXDOMAIN).
    NotFound,
    /// The name exists but has no records of the requested type.
    NoData,
    /// The upstream server failed to answer (SERVFAIL).
    ServerFailure,
    /// The upstream server refused the query (REFUSED).
    Refused,
    /// The resolver library gave up waiting on its own I/O.
    Timeout,
    /// Anything else (connection errors, malformed replies, ...).
    Other,
}

impl FaultCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultCode::NotFound => "ENOTFOUND",
            FaultCode::NoData => "ENODATA",
            FaultCode::ServerFailure => "SERVFAIL",
            FaultCode::Refused => "REFUSED",
            FaultCode::Timeout => "ETIMEOUT",
            FaultCode::Other => "EOTHER",
        }
    }
}

impl fmt::Display for FaultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure raised by a single record lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct ResolverFault {
    pub code: FaultCode,
    pub message: String,
}

impl ResolverFault {
    pub fn new(code: FaultCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// The engine stopped waiting on a lookup because its deadline elapsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Timeout while resolving {kind} after {}ms", .timeout.as_millis())]
pub struct TimeoutFailure {
    pub kind: RecordKind,
    pub timeout: Duration,
}

/// Outcome of a record kind that did not produce data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    #[error(transparent)]
    Timeout(#[from] TimeoutFailure),

    #[error(transparent)]
    Resolver(#[from] ResolverFault),
}

impl LookupFailure {
    /// Raw code used in debug output.
    pub fn raw_code(&self) -> &'static str {
        match self {
            LookupFailure::Timeout(_) => "TIMEOUT",
            LookupFailure::Resolver(fault) => fault.code.as_str(),
        }
    }
}

/// A failed record kind together with its cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindFailure {
    pub kind: RecordKind,
    pub cause: LookupFailure,
}

/// Raised when no requested record kind produced data.
///
/// Carries the per-kind causes in canonical kind order and never any
/// partial records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("DNS resolution failed for all record types of {domain}")]
pub struct EngineFailure {
    pub domain: String,
    pub failures: Vec<KindFailure>,
}

/// Pre-flight validation errors for an incoming DNS query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Domain is required")]
    MissingDomain,

    #[error("Invalid domain format: {0}")]
    InvalidDomain(String),

    /// The query string itself could not be decoded.
    #[error("Malformed query string: {0}")]
    Malformed(String),

    /// Every unrecognized record-kind token, in input order.
    #[error("Invalid DNS record types: {}", .0.join(", "))]
    InvalidTypes(Vec<String>),
}

/// Caller-facing error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    DnsTimeout,
    DnsNotFound,
    DnsServerFailure,
    DnsRefused,
    DnsError,
    InvalidRecordTypes,
    InvalidQuery,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::DnsTimeout => "DNS_TIMEOUT",
            ErrorCode::DnsNotFound => "DNS_NOT_FOUND",
            ErrorCode::DnsServerFailure => "DNS_SERVER_FAILURE",
            ErrorCode::DnsRefused => "DNS_REFUSED",
            ErrorCode::DnsError => "DNS_ERROR",
            ErrorCode::InvalidRecordTypes => "INVALID_RECORD_TYPES",
            ErrorCode::InvalidQuery => "INVALID_QUERY",
        }
    }

    pub fn severity(&self) -> StatusSeverity {
        match self {
            ErrorCode::DnsTimeout => StatusSeverity::GatewayTimeout,
            ErrorCode::DnsNotFound => StatusSeverity::NotFound,
            ErrorCode::DnsServerFailure | ErrorCode::DnsRefused => StatusSeverity::BadGateway,
            ErrorCode::DnsError => StatusSeverity::InternalError,
            ErrorCode::InvalidRecordTypes | ErrorCode::InvalidQuery => StatusSeverity::BadRequest,
        }
    }

    /// Message shown to callers for resolution failures.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::DnsTimeout => "DNS lookup timed out",
            ErrorCode::DnsNotFound => "Domain not found",
            ErrorCode::DnsServerFailure => "DNS server failure",
            ErrorCode::DnsRefused => "DNS query refused",
            ErrorCode::DnsError => "DNS lookup failed",
            ErrorCode::InvalidRecordTypes => "Invalid DNS record types",
            ErrorCode::InvalidQuery => "Invalid query",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-distinguishable severity, rendered by the transport as a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum StatusSeverity {
    BadRequest,
    NotFound,
    BadGateway,
    GatewayTimeout,
    InternalError,
}

impl StatusSeverity {
    pub fn status_code(&self) -> u16 {
        match self {
            StatusSeverity::BadRequest => 400,
            StatusSeverity::NotFound => 404,
            StatusSeverity::BadGateway => 502,
            StatusSeverity::GatewayTimeout => 504,
            StatusSeverity::InternalError => 500,
        }
    }
}

/// Raw diagnostic detail, attached only when the caller asked for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugDetail {
    pub code: String,
    pub message: String,
    pub trace: Vec<String>,
}

/// Stable, caller-facing error shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedError {
    #[serde(skip)]
    pub status: StatusSeverity,
    #[serde(rename = "error")]
    pub error_code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugDetail>,
}
