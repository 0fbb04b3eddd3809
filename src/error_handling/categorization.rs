//! Error categorization.
//!
//! Maps lookup, engine and query failures onto the fixed
//! `ErrorCode`/`StatusSeverity` vocabulary. Debug detail is only attached
//! when the originating query asked for it.

use super::types::{
    ClassifiedError, DebugDetail, EngineFailure, ErrorCode, FaultCode, KindFailure,
    LookupFailure, QueryError,
};

/// Categorizes a single lookup failure into an `ErrorCode`.
///
/// Only the engine's own per-kind timer yields `DnsTimeout`; a timeout
/// reported by the resolver library is an unclassified failure.
pub fn categorize_lookup_failure(failure: &LookupFailure) -> ErrorCode {
    match failure {
        LookupFailure::Timeout(_) => ErrorCode::DnsTimeout,
        LookupFailure::Resolver(fault) => categorize_fault_code(fault.code),
    }
}

/// Categorizes a raw resolver reply code.
pub fn categorize_fault_code(code: FaultCode) -> ErrorCode {
    match code {
        FaultCode::NotFound => ErrorCode::DnsNotFound,
        FaultCode::ServerFailure => ErrorCode::DnsServerFailure,
        FaultCode::Refused => ErrorCode::DnsRefused,
        FaultCode::NoData | FaultCode::Timeout | FaultCode::Other => ErrorCode::DnsError,
    }
}

/// Classifies a single lookup failure.
pub fn classify_lookup_failure(failure: &LookupFailure, debug: bool) -> ClassifiedError {
    let code = categorize_lookup_failure(failure);
    let detail = debug.then(|| DebugDetail {
        code: failure.raw_code().to_string(),
        message: failure.to_string(),
        trace: Vec::new(),
    });
    classified(code, code.default_message().to_string(), detail)
}

/// Classifies an aggregate engine failure.
///
/// The category shared by the most failed kinds wins; ties go to the
/// earliest kind in canonical order. A failure without recorded causes
/// means every lookup answered with no data, and is categorized exactly
/// like an `ENODATA` reply for any other kind.
pub fn classify_engine_failure(failure: &EngineFailure, debug: bool) -> ClassifiedError {
    let dominant = dominant_failure(&failure.failures);
    let code = dominant
        .map(|(code, _)| code)
        .unwrap_or_else(|| categorize_fault_code(FaultCode::NoData));

    let detail = debug.then(|| DebugDetail {
        code: dominant
            .map(|(_, f)| f.cause.raw_code())
            .unwrap_or(FaultCode::NoData.as_str())
            .to_string(),
        message: failure.to_string(),
        trace: failure
            .failures
            .iter()
            .map(|f| format!("{}: {}: {}", f.kind, f.cause.raw_code(), f.cause))
            .collect(),
    });

    classified(code, code.default_message().to_string(), detail)
}

/// Classifies a pre-flight query validation error.
pub fn classify_query_error(error: &QueryError, debug: bool) -> ClassifiedError {
    let (code, invalid_types) = match error {
        QueryError::InvalidTypes(tokens) => (ErrorCode::InvalidRecordTypes, Some(tokens.clone())),
        QueryError::MissingDomain | QueryError::InvalidDomain(_) | QueryError::Malformed(_) => {
            (ErrorCode::InvalidQuery, None)
        }
    };
    let detail = debug.then(|| DebugDetail {
        code: code.as_str().to_string(),
        message: error.to_string(),
        trace: Vec::new(),
    });

    let mut classified = classified(code, error.to_string(), detail);
    classified.invalid_types = invalid_types;
    classified
}

fn dominant_failure(failures: &[KindFailure]) -> Option<(ErrorCode, &KindFailure)> {
    let codes: Vec<ErrorCode> = failures
        .iter()
        .map(|f| categorize_lookup_failure(&f.cause))
        .collect();

    let mut best: Option<(ErrorCode, usize, &KindFailure)> = None;
    for (failure, code) in failures.iter().zip(&codes) {
        let count = codes.iter().filter(|c| *c == code).count();
        if best.map_or(true, |(_, best_count, _)| count > best_count) {
            best = Some((*code, count, failure));
        }
    }
    best.map(|(code, _, failure)| (code, failure))
}

fn classified(code: ErrorCode, message: String, debug: Option<DebugDetail>) -> ClassifiedError {
    ClassifiedError {
        status: code.severity(),
        error_code: code,
        message,
        invalid_types: None,
        debug,
    }
}
