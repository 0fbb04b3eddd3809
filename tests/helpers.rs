// Shared test helpers: a scripted record lookup and request plumbing.
//
// No test touches the network; every lookup answer comes from the script.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderValue, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use netdiag::dns::{DnsService, MxRecord, RecordData, RecordKind, RecordLookup, SoaRecord};
use netdiag::error_handling::{FaultCode, ResolverFault};
use netdiag::{build_router, AppState};

pub enum Reply {
    Data(RecordData),
    Fail(FaultCode),
    Hang,
}

/// Record lookup answering from a fixed script. Unscripted kinds fail with
/// `ENOTFOUND`.
#[derive(Default)]
pub struct ScriptedLookup {
    replies: HashMap<RecordKind, Reply>,
    calls: AtomicUsize,
}

#[allow(dead_code)] // Not every test file uses every builder
impl ScriptedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, data: RecordData) -> Self {
        self.replies.insert(data.kind(), Reply::Data(data));
        self
    }

    pub fn failing(mut self, kind: RecordKind, code: FaultCode) -> Self {
        self.replies.insert(kind, Reply::Fail(code));
        self
    }

    pub fn hanging(mut self, kind: RecordKind) -> Self {
        self.replies.insert(kind, Reply::Hang);
        self
    }

    pub fn failing_all(mut self, code: FaultCode) -> Self {
        for kind in RecordKind::ALL {
            self.replies.insert(kind, Reply::Fail(code));
        }
        self
    }

    /// Number of lookups started so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn reply(&self, kind: RecordKind) -> Result<RecordData, ResolverFault> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.replies.get(&kind) {
            Some(Reply::Data(data)) => Ok(data.clone()),
            Some(Reply::Fail(code)) => Err(ResolverFault::new(
                *code,
                format!("scripted {code} for {kind}"),
            )),
            Some(Reply::Hang) => std::future::pending().await,
            None => Err(ResolverFault::new(
                FaultCode::NotFound,
                format!("no {kind} records scripted"),
            )),
        }
    }
}

#[async_trait]
impl RecordLookup for ScriptedLookup {
    async fn ipv4(&self, _domain: &str) -> Result<Vec<String>, ResolverFault> {
        match self.reply(RecordKind::A).await? {
            RecordData::A(v) => Ok(v),
            other => panic!("scripted {other:?} for A"),
        }
    }

    async fn ipv6(&self, _domain: &str) -> Result<Vec<String>, ResolverFault> {
        match self.reply(RecordKind::Aaaa).await? {
            RecordData::Aaaa(v) => Ok(v),
            other => panic!("scripted {other:?} for AAAA"),
        }
    }

    async fn mx(&self, _domain: &str) -> Result<Vec<MxRecord>, ResolverFault> {
        match self.reply(RecordKind::Mx).await? {
            RecordData::Mx(v) => Ok(v),
            other => panic!("scripted {other:?} for MX"),
        }
    }

    async fn cname(&self, _domain: &str) -> Result<Vec<String>, ResolverFault> {
        match self.reply(RecordKind::Cname).await? {
            RecordData::Cname(v) => Ok(v),
            other => panic!("scripted {other:?} for CNAME"),
        }
    }

    async fn ns(&self, _domain: &str) -> Result<Vec<String>, ResolverFault> {
        match self.reply(RecordKind::Ns).await? {
            RecordData::Ns(v) => Ok(v),
            other => panic!("scripted {other:?} for NS"),
        }
    }

    async fn soa(&self, _domain: &str) -> Result<Option<SoaRecord>, ResolverFault> {
        match self.reply(RecordKind::Soa).await? {
            RecordData::Soa(v) => Ok(v),
            other => panic!("scripted {other:?} for SOA"),
        }
    }

    async fn txt(&self, _domain: &str) -> Result<Vec<String>, ResolverFault> {
        match self.reply(RecordKind::Txt).await? {
            RecordData::Txt(v) => Ok(v),
            other => panic!("scripted {other:?} for TXT"),
        }
    }
}

/// Builds the API router over `lookup` with the given per-kind timeout.
#[allow(dead_code)]
pub fn test_app(lookup: Arc<ScriptedLookup>, timeout: Duration) -> Router {
    let dns = Arc::new(DnsService::new(lookup, timeout));
    build_router(AppState::new(dns), None)
}

/// Same as `test_app`, with CORS enabled for `origin`.
#[allow(dead_code)]
pub fn test_app_with_cors(lookup: Arc<ScriptedLookup>, origin: &str) -> Router {
    let dns = Arc::new(DnsService::new(lookup, Duration::from_millis(3000)));
    build_router(
        AppState::new(dns),
        Some(HeaderValue::from_str(origin).expect("valid origin")),
    )
}

/// Sends a GET and returns the status with the parsed JSON body
/// (`Value::Null` for an empty body).
#[allow(dead_code)]
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is JSON")
    };
    (status, body)
}
