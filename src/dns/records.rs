//! DNS record queries (A, AAAA, MX, CNAME, NS, SOA, TXT).
//!
//! `HickoryLookup` implements `RecordLookup` over `hickory-resolver`. Each
//! method issues a single query and keeps only the answer data of the
//! requested type (an address query that follows a CNAME chain reports the
//! addresses, not the alias). Resolver errors are passed through as
//! `ResolverFault`s carrying the facility's own reply code.

use std::sync::Arc;

use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::rdata::SOA;
use hickory_resolver::proto::rr::{Name, RData, RecordType};
use hickory_resolver::lookup::Lookup;
use hickory_resolver::TokioAsyncResolver;

use super::lookup::RecordLookup;
use super::types::{MxRecord, SoaRecord};
use crate::error_handling::{FaultCode, ResolverFault};

/// Record lookups backed by a shared hickory resolver.
#[derive(Clone)]
pub struct HickoryLookup {
    resolver: Arc<TokioAsyncResolver>,
}

impl HickoryLookup {
    pub fn new(resolver: Arc<TokioAsyncResolver>) -> Self {
        Self { resolver }
    }

    async fn query(&self, domain: &str, record_type: RecordType) -> Result<Lookup, ResolverFault> {
        self.resolver.lookup(domain, record_type).await.map_err(|e| {
            log::debug!("{record_type} lookup for {domain} failed: {e}");
            ResolverFault::from(e)
        })
    }
}

#[async_trait]
impl RecordLookup for HickoryLookup {
    async fn ipv4(&self, domain: &str) -> Result<Vec<String>, ResolverFault> {
        Ok(ipv4_addresses(&self.query(domain, RecordType::A).await?))
    }

    async fn ipv6(&self, domain: &str) -> Result<Vec<String>, ResolverFault> {
        Ok(ipv6_addresses(&self.query(domain, RecordType::AAAA).await?))
    }

    async fn mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolverFault> {
        Ok(mx_records(&self.query(domain, RecordType::MX).await?))
    }

    async fn cname(&self, domain: &str) -> Result<Vec<String>, ResolverFault> {
        Ok(cname_targets(&self.query(domain, RecordType::CNAME).await?))
    }

    async fn ns(&self, domain: &str) -> Result<Vec<String>, ResolverFault> {
        Ok(ns_hosts(&self.query(domain, RecordType::NS).await?))
    }

    async fn soa(&self, domain: &str) -> Result<Option<SoaRecord>, ResolverFault> {
        soa_answer(self.query(domain, RecordType::SOA).await)
    }

    async fn txt(&self, domain: &str) -> Result<Vec<String>, ResolverFault> {
        Ok(txt_strings(&self.query(domain, RecordType::TXT).await?))
    }
}

// Each extractor keeps only answer data of its own type, so a CNAME hop
// returned alongside the addresses is not reported as an address.

fn ipv4_addresses(lookup: &Lookup) -> Vec<String> {
    lookup
        .iter()
        .filter_map(|rdata| match rdata {
            RData::A(a) => Some(a.0.to_string()),
            _ => None,
        })
        .collect()
}

fn ipv6_addresses(lookup: &Lookup) -> Vec<String> {
    lookup
        .iter()
        .filter_map(|rdata| match rdata {
            RData::AAAA(aaaa) => Some(aaaa.0.to_string()),
            _ => None,
        })
        .collect()
}

/// Resolver order is preserved; no re-sorting by priority.
fn mx_records(lookup: &Lookup) -> Vec<MxRecord> {
    lookup
        .iter()
        .filter_map(|rdata| match rdata {
            RData::MX(mx) => Some(MxRecord {
                priority: mx.preference(),
                exchange: host_name(mx.exchange()),
            }),
            _ => None,
        })
        .collect()
}

fn cname_targets(lookup: &Lookup) -> Vec<String> {
    lookup
        .iter()
        .filter_map(|rdata| match rdata {
            RData::CNAME(cname) => Some(host_name(&cname.0)),
            _ => None,
        })
        .collect()
}

fn ns_hosts(lookup: &Lookup) -> Vec<String> {
    lookup
        .iter()
        .filter_map(|rdata| match rdata {
            RData::NS(ns) => Some(host_name(&ns.0)),
            _ => None,
        })
        .collect()
}

fn txt_strings(lookup: &Lookup) -> Vec<String> {
    lookup
        .iter()
        .filter_map(|rdata| match rdata {
            RData::TXT(txt) => Some(join_txt_fragments(txt.iter().map(|b| &b[..]))),
            _ => None,
        })
        .collect()
}

/// An empty authority answer is absence, not a failure.
fn soa_answer(outcome: Result<Lookup, ResolverFault>) -> Result<Option<SoaRecord>, ResolverFault> {
    match outcome {
        Ok(lookup) => Ok(lookup.iter().find_map(|rdata| match rdata {
            RData::SOA(soa) => Some(soa_record(soa)),
            _ => None,
        })),
        Err(fault) if fault.code == FaultCode::NoData => Ok(None),
        Err(fault) => Err(fault),
    }
}

impl From<ResolveError> for ResolverFault {
    fn from(error: ResolveError) -> Self {
        let code = match error.kind() {
            ResolveErrorKind::NoRecordsFound { response_code, .. } => match response_code {
                ResponseCode::NXDomain => FaultCode::NotFound,
                ResponseCode::NoError => FaultCode::NoData,
                ResponseCode::ServFail => FaultCode::ServerFailure,
                ResponseCode::Refused => FaultCode::Refused,
                _ => FaultCode::Other,
            },
            ResolveErrorKind::Timeout => FaultCode::Timeout,
            _ => FaultCode::Other,
        };
        ResolverFault::new(code, error.to_string())
    }
}

/// Concatenates the fragments of one text record with no separator.
///
/// Bytes are joined before decoding so a multi-byte character split across
/// fragments survives.
pub fn join_txt_fragments<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let bytes: Vec<u8> = fragments.into_iter().flatten().copied().collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Renders a name without the trailing root dot.
fn host_name(name: &Name) -> String {
    let name = name.to_utf8();
    match name.strip_suffix('.') {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => name,
    }
}

fn soa_record(soa: &SOA) -> SoaRecord {
    SoaRecord {
        primary: host_name(soa.mname()),
        admin: host_name(soa.rname()),
        serial: soa.serial(),
        refresh: soa.refresh(),
        retry: soa.retry(),
        expire: soa.expire(),
        minimum: soa.minimum(),
    }
}
