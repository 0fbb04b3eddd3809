//! Error handling and classification.
//!
//! This module provides:
//! - Raw failure types produced by record lookups and the resolution engine
//! - Query validation errors raised before any lookup starts
//! - The classifier mapping all of the above onto stable error codes and
//!   status severities
//!
//! Failures are categorized into:
//! - **Validation**: bad caller input, reported before resolution (bad request)
//! - **Per-kind**: timeouts and resolver faults, tolerated individually
//! - **Aggregate**: every requested kind failed, the only hard failure

mod categorization;
mod types;

// Re-export public API
pub use categorization::{
    categorize_fault_code, categorize_lookup_failure, classify_engine_failure,
    classify_lookup_failure, classify_query_error,
};
pub use types::{
    ClassifiedError, ConfigValidationError, DebugDetail, EngineFailure, ErrorCode, FaultCode,
    InitializationError, KindFailure, LookupFailure, QueryError, ResolverFault, StatusSeverity,
    TimeoutFailure,
};
