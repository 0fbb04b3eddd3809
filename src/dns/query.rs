//! DNS query parsing.
//!
//! Turns the raw query-string parameters into a validated `DomainQuery`.
//! Record-kind validation reports every unknown token, not just the first.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::types::{DomainQuery, RecordKind};
use crate::config::MAX_DOMAIN_LENGTH;
use crate::error_handling::QueryError;

static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Labels of 1-63 alphanumerics/hyphens, never starting or ending with a hyphen
    Regex::new(
        r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\.?$",
    )
    .expect("domain pattern is valid")
});

/// Query-string parameters as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDnsQuery {
    pub domain: Option<String>,
    pub types: Option<String>,
    pub debug: Option<String>,
}

/// Returns true for `1`, `true`, `yes` and `on`, case-insensitively.
pub fn is_truthy(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

/// Validates a hostname and returns it trimmed.
pub fn validate_domain(domain: &str) -> Result<String, QueryError> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err(QueryError::MissingDomain);
    }
    if domain.len() > MAX_DOMAIN_LENGTH || !DOMAIN_RE.is_match(domain) {
        return Err(QueryError::InvalidDomain(domain.to_string()));
    }
    Ok(domain.to_string())
}

/// Parses a comma-separated record-kind list.
///
/// Tokens are trimmed and upper-cased; blank tokens are dropped. Returns
/// `Ok(None)` when nothing remains, meaning "all kinds".
pub fn parse_record_kinds(raw: &str) -> Result<Option<Vec<RecordKind>>, QueryError> {
    let tokens: Vec<String> = raw
        .split(',')
        .map(|t| t.trim().to_ascii_uppercase())
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return Ok(None);
    }

    let mut kinds = Vec::with_capacity(tokens.len());
    let mut invalid = Vec::new();
    for token in tokens {
        match token.parse::<RecordKind>() {
            Ok(kind) => kinds.push(kind),
            Err(_) => invalid.push(token),
        }
    }
    if !invalid.is_empty() {
        return Err(QueryError::InvalidTypes(invalid));
    }
    Ok(Some(kinds))
}

/// Builds a `DomainQuery` from raw parameters.
pub fn parse_dns_query(raw: &RawDnsQuery) -> Result<DomainQuery, QueryError> {
    let domain = validate_domain(raw.domain.as_deref().unwrap_or_default())?;
    let types = match raw.types.as_deref() {
        Some(types) => parse_record_kinds(types)?,
        None => None,
    };
    Ok(DomainQuery::new(domain, types, is_truthy(raw.debug.as_deref())))
}
