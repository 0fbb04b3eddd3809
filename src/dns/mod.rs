//! DNS resolution and record querying.
//!
//! This module provides async multi-record DNS resolution using `hickory-resolver`:
//! - Address records (A/AAAA)
//! - Mail exchangers (MX), aliases (CNAME) and nameservers (NS)
//! - Zone authority (SOA)
//! - Text records (TXT), reassembled from their fragments
//!
//! Lookups for the requested kinds run concurrently, each bounded by its own
//! timeout, and are joined into a single `LookupResult`.

mod engine;
mod lookup;
mod query;
mod records;
mod types;

// Re-export public API
pub use engine::{effective_kinds, DnsService};
pub use lookup::RecordLookup;
pub use query::{is_truthy, parse_dns_query, parse_record_kinds, validate_domain, RawDnsQuery};
pub use records::{join_txt_fragments, HickoryLookup};
pub use types::{
    DomainQuery, LookupResult, MxRecord, RecordData, RecordKind, ResolvedRecords, SoaRecord,
    UnknownRecordKind,
};
