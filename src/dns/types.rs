//! DNS data structures.
//!
//! This module defines the record kinds, the validated query, the normalized
//! per-kind record shapes and the final lookup result.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

/// The seven supported record kinds, declared in canonical order.
///
/// `Ord` follows declaration order, so sorting a list of kinds puts it in
/// canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum RecordKind {
    A,
    Aaaa,
    Mx,
    Cname,
    Ns,
    Soa,
    Txt,
}

impl RecordKind {
    /// Every kind, in canonical order.
    pub const ALL: [RecordKind; 7] = [
        RecordKind::A,
        RecordKind::Aaaa,
        RecordKind::Mx,
        RecordKind::Cname,
        RecordKind::Ns,
        RecordKind::Soa,
        RecordKind::Txt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::A => "A",
            RecordKind::Aaaa => "AAAA",
            RecordKind::Mx => "MX",
            RecordKind::Cname => "CNAME",
            RecordKind::Ns => "NS",
            RecordKind::Soa => "SOA",
            RecordKind::Txt => "TXT",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token that is not one of the seven record kinds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown DNS record type: {0}")]
pub struct UnknownRecordKind(pub String);

impl FromStr for RecordKind {
    type Err = UnknownRecordKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(RecordKind::A),
            "AAAA" => Ok(RecordKind::Aaaa),
            "MX" => Ok(RecordKind::Mx),
            "CNAME" => Ok(RecordKind::Cname),
            "NS" => Ok(RecordKind::Ns),
            "SOA" => Ok(RecordKind::Soa),
            "TXT" => Ok(RecordKind::Txt),
            _ => Err(UnknownRecordKind(s.to_string())),
        }
    }
}

/// A validated DNS query.
///
/// `types`, when present, is non-empty, de-duplicated and in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainQuery {
    pub domain: String,
    pub types: Option<Vec<RecordKind>>,
    pub debug: bool,
}

impl DomainQuery {
    pub fn new(domain: impl Into<String>, types: Option<Vec<RecordKind>>, debug: bool) -> Self {
        let types = types
            .map(|mut kinds| {
                kinds.sort();
                kinds.dedup();
                kinds
            })
            .filter(|kinds| !kinds.is_empty());
        Self {
            domain: domain.into(),
            types,
            debug,
        }
    }
}

/// A mail-exchange entry, kept in resolver order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MxRecord {
    pub priority: u16,
    pub exchange: String,
}

/// Zone-authority data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoaRecord {
    pub primary: String,
    pub admin: String,
    pub serial: u32,
    pub refresh: i32,
    pub retry: i32,
    pub expire: i32,
    pub minimum: u32,
}

/// Normalized data produced by one successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Vec<String>),
    Aaaa(Vec<String>),
    Mx(Vec<MxRecord>),
    Cname(Vec<String>),
    Ns(Vec<String>),
    Soa(Option<SoaRecord>),
    Txt(Vec<String>),
}

impl RecordData {
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordData::A(_) => RecordKind::A,
            RecordData::Aaaa(_) => RecordKind::Aaaa,
            RecordData::Mx(_) => RecordKind::Mx,
            RecordData::Cname(_) => RecordKind::Cname,
            RecordData::Ns(_) => RecordKind::Ns,
            RecordData::Soa(_) => RecordKind::Soa,
            RecordData::Txt(_) => RecordKind::Txt,
        }
    }
}

/// Records keyed by kind. A key is present only if its lookup produced data.
///
/// Field order is canonical order, which is also the serialized key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedRecords {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aaaa: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mx: Option<Vec<MxRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cname: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soa: Option<SoaRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txt: Option<Vec<String>>,
}

impl ResolvedRecords {
    /// Stores one lookup's data. An empty zone-authority answer leaves the key absent.
    pub fn insert(&mut self, data: RecordData) {
        match data {
            RecordData::A(v) => self.a = Some(v),
            RecordData::Aaaa(v) => self.aaaa = Some(v),
            RecordData::Mx(v) => self.mx = Some(v),
            RecordData::Cname(v) => self.cname = Some(v),
            RecordData::Ns(v) => self.ns = Some(v),
            RecordData::Soa(v) => self.soa = v,
            RecordData::Txt(v) => self.txt = Some(v),
        }
    }

    pub fn contains(&self, kind: RecordKind) -> bool {
        match kind {
            RecordKind::A => self.a.is_some(),
            RecordKind::Aaaa => self.aaaa.is_some(),
            RecordKind::Mx => self.mx.is_some(),
            RecordKind::Cname => self.cname.is_some(),
            RecordKind::Ns => self.ns.is_some(),
            RecordKind::Soa => self.soa.is_some(),
            RecordKind::Txt => self.txt.is_some(),
        }
    }

    /// Present kinds, in canonical order.
    pub fn kinds(&self) -> Vec<RecordKind> {
        RecordKind::iter()
            .filter(|kind| self.contains(*kind))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds().is_empty()
    }
}

/// Result of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub domain: String,
    pub records: ResolvedRecords,
    #[serde(serialize_with = "serialize_timestamp")]
    pub resolved_at: DateTime<Utc>,
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_kind_canonical_order() {
        let iterated: Vec<RecordKind> = RecordKind::iter().collect();
        assert_eq!(iterated, RecordKind::ALL.to_vec());

        let mut shuffled = vec![RecordKind::Txt, RecordKind::A, RecordKind::Ns];
        shuffled.sort();
        assert_eq!(shuffled, vec![RecordKind::A, RecordKind::Ns, RecordKind::Txt]);
    }

    #[test]
    fn test_record_kind_round_trips_through_str() {
        for kind in RecordKind::iter() {
            assert_eq!(kind.as_str().parse::<RecordKind>(), Ok(kind));
        }
        assert_eq!("aaaa".parse::<RecordKind>(), Ok(RecordKind::Aaaa));
        assert_eq!(
            "BOGUS".parse::<RecordKind>(),
            Err(UnknownRecordKind("BOGUS".to_string()))
        );
    }

    #[test]
    fn test_domain_query_normalizes_types() {
        let query = DomainQuery::new(
            "example.com",
            Some(vec![RecordKind::Ns, RecordKind::A, RecordKind::Ns]),
            false,
        );
        assert_eq!(query.types, Some(vec![RecordKind::A, RecordKind::Ns]));

        let empty = DomainQuery::new("example.com", Some(Vec::new()), false);
        assert_eq!(empty.types, None);
    }

    #[test]
    fn test_empty_soa_leaves_key_absent() {
        let mut records = ResolvedRecords::default();
        records.insert(RecordData::Soa(None));
        assert!(records.soa.is_none());
        assert!(records.is_empty());

        let json = serde_json::to_value(&records).unwrap();
        assert!(json.get("soa").is_none());
    }

    #[test]
    fn test_empty_list_is_present() {
        let mut records = ResolvedRecords::default();
        records.insert(RecordData::Txt(Vec::new()));
        assert!(!records.is_empty());
        assert_eq!(records.kinds(), vec![RecordKind::Txt]);

        let json = serde_json::to_string(&records).unwrap();
        assert_eq!(json, r#"{"txt":[]}"#);
    }

    #[test]
    fn test_lookup_result_serialization() {
        let mut records = ResolvedRecords::default();
        records.insert(RecordData::Ns(vec!["ns1.example.com".to_string()]));
        records.insert(RecordData::A(vec!["1.1.1.1".to_string()]));
        let result = LookupResult {
            domain: "example.com".to_string(),
            records,
            resolved_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        };

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"domain":"example.com","records":{"a":["1.1.1.1"],"ns":["ns1.example.com"]},"resolvedAt":"2024-01-02T03:04:05.000Z"}"#
        );
    }

    #[test]
    fn test_record_data_kind() {
        assert_eq!(RecordData::Soa(None).kind(), RecordKind::Soa);
        assert_eq!(RecordData::Mx(Vec::new()).kind(), RecordKind::Mx);
    }
}
