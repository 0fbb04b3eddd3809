//! Multi-record resolution engine.
//!
//! `DnsService::resolve_all` launches one lookup per requested kind, races
//! each against its own deadline, waits for all of them to settle and
//! assembles the successes in canonical kind order. Only when nothing
//! succeeded does it fail, with an `EngineFailure` carrying every cause.
//!
//! All lookups run as futures inside the calling task; they interleave at
//! the network and timer suspension points and are never spawned.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use log::{debug, info, warn};
use strum::IntoEnumIterator;

use super::lookup::RecordLookup;
use super::types::{DomainQuery, LookupResult, RecordData, RecordKind, ResolvedRecords};
use crate::error_handling::{EngineFailure, KindFailure, LookupFailure, ResolverFault, TimeoutFailure};

/// Resolution engine over a `RecordLookup` backend.
#[derive(Clone)]
pub struct DnsService {
    lookup: Arc<dyn RecordLookup>,
    default_timeout: Duration,
}

impl DnsService {
    pub fn new(lookup: Arc<dyn RecordLookup>, default_timeout: Duration) -> Self {
        Self {
            lookup,
            default_timeout,
        }
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Resolves a validated query with the default per-kind timeout.
    pub async fn resolve(&self, query: &DomainQuery) -> Result<LookupResult, EngineFailure> {
        self.resolve_all(&query.domain, query.types.as_deref(), None)
            .await
    }

    /// Resolves `kinds` (all seven when `None` or empty) for `domain`.
    ///
    /// Each kind gets its own `timeout` (default when `None`); a slow kind
    /// neither cancels nor delays the others. Succeeds with whatever kinds
    /// produced data, even if only one did.
    ///
    /// # Errors
    ///
    /// Returns `EngineFailure` when no requested kind produced data.
    pub async fn resolve_all(
        &self,
        domain: &str,
        kinds: Option<&[RecordKind]>,
        timeout: Option<Duration>,
    ) -> Result<LookupResult, EngineFailure> {
        let selected = effective_kinds(kinds);
        let timeout = timeout.unwrap_or(self.default_timeout);
        debug!(
            "Resolving {} for {domain} with {}ms per-kind timeout",
            join_kinds(&selected),
            timeout.as_millis()
        );

        // Built in canonical order; join_all hands outcomes back in that same order
        let tasks = selected.iter().map(|&kind| async move {
            (kind, self.lookup_with_timeout(domain, kind, timeout).await)
        });
        let outcomes = join_all(tasks).await;

        let mut records = ResolvedRecords::default();
        let mut failures = Vec::new();
        for (kind, outcome) in outcomes {
            match outcome {
                Ok(data) => {
                    debug!("{kind} lookup for {domain} succeeded");
                    records.insert(data);
                }
                Err(cause) => {
                    warn!("{kind} lookup for {domain} failed: {cause}");
                    failures.push(KindFailure { kind, cause });
                }
            }
        }

        if records.is_empty() {
            warn!(
                "DNS resolution failed for all {} requested record types of {domain}",
                selected.len()
            );
            return Err(EngineFailure {
                domain: domain.to_string(),
                failures,
            });
        }

        info!(
            "Resolved {}/{} record types for {domain}",
            records.kinds().len(),
            selected.len()
        );
        Ok(LookupResult {
            domain: domain.to_string(),
            records,
            resolved_at: Utc::now(),
        })
    }

    /// Races one lookup against its deadline.
    ///
    /// Whichever side loses is dropped: the timer when the lookup settles
    /// first, the in-flight lookup when the deadline fires.
    async fn lookup_with_timeout(
        &self,
        domain: &str,
        kind: RecordKind,
        timeout: Duration,
    ) -> Result<RecordData, LookupFailure> {
        match tokio::time::timeout(timeout, self.lookup_kind(domain, kind)).await {
            Ok(outcome) => outcome.map_err(LookupFailure::from),
            Err(_) => Err(TimeoutFailure { kind, timeout }.into()),
        }
    }

    async fn lookup_kind(&self, domain: &str, kind: RecordKind) -> Result<RecordData, ResolverFault> {
        let lookup = self.lookup.as_ref();
        Ok(match kind {
            RecordKind::A => RecordData::A(lookup.ipv4(domain).await?),
            RecordKind::Aaaa => RecordData::Aaaa(lookup.ipv6(domain).await?),
            RecordKind::Mx => RecordData::Mx(lookup.mx(domain).await?),
            RecordKind::Cname => RecordData::Cname(lookup.cname(domain).await?),
            RecordKind::Ns => RecordData::Ns(lookup.ns(domain).await?),
            RecordKind::Soa => RecordData::Soa(lookup.soa(domain).await?),
            RecordKind::Txt => RecordData::Txt(lookup.txt(domain).await?),
        })
    }
}

/// The kinds to schedule: the requested ones de-duplicated in canonical
/// order, or all seven when none were requested.
pub fn effective_kinds(kinds: Option<&[RecordKind]>) -> Vec<RecordKind> {
    match kinds {
        Some(kinds) if !kinds.is_empty() => {
            let mut kinds = kinds.to_vec();
            kinds.sort();
            kinds.dedup();
            kinds
        }
        _ => RecordKind::iter().collect(),
    }
}

fn join_kinds(kinds: &[RecordKind]) -> String {
    kinds
        .iter()
        .map(RecordKind::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
