//! DNS lookup handler.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use log::debug;

use super::super::types::AppState;
use crate::dns::{is_truthy, parse_dns_query, LookupResult, RawDnsQuery};
use crate::error_handling::{
    classify_engine_failure, classify_query_error, ClassifiedError, QueryError,
};

/// `GET /api/dns?domain=&types=&debug=`
///
/// Validates the query before any lookup starts, then resolves the requested
/// record kinds. Partial results are a success; only a total failure is
/// reported as an error.
pub async fn dns_handler(
    State(state): State<AppState>,
    query: Result<Query<RawDnsQuery>, QueryRejection>,
) -> Result<Json<LookupResult>, ClassifiedError> {
    let Query(raw) = query.map_err(|rejection| {
        classify_query_error(&QueryError::Malformed(rejection.body_text()), false)
    })?;

    // Decided before validation so rejected queries can carry debug detail too
    let debug = is_truthy(raw.debug.as_deref());

    let query = parse_dns_query(&raw).map_err(|e| {
        debug!("Rejected DNS query {:?}: {e}", raw);
        classify_query_error(&e, debug)
    })?;

    let result = state
        .dns
        .resolve(&query)
        .await
        .map_err(|e| classify_engine_failure(&e, query.debug))?;
    Ok(Json(result))
}
