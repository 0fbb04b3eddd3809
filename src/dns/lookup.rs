//! Record lookup seam.
//!
//! One async method per record kind. The engine only talks to this trait,
//! so it can be driven by the hickory-backed adapter or a scripted stub.

use async_trait::async_trait;

use super::types::{MxRecord, SoaRecord};
use crate::error_handling::ResolverFault;

#[async_trait]
pub trait RecordLookup: Send + Sync {
    async fn ipv4(&self, domain: &str) -> Result<Vec<String>, ResolverFault>;

    async fn ipv6(&self, domain: &str) -> Result<Vec<String>, ResolverFault>;

    /// Entries in resolver-returned order.
    async fn mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolverFault>;

    async fn cname(&self, domain: &str) -> Result<Vec<String>, ResolverFault>;

    async fn ns(&self, domain: &str) -> Result<Vec<String>, ResolverFault>;

    /// `Ok(None)` when the answer carried no zone-authority record.
    async fn soa(&self, domain: &str) -> Result<Option<SoaRecord>, ResolverFault>;

    /// One string per record, fragments concatenated without a separator.
    async fn txt(&self, domain: &str) -> Result<Vec<String>, ResolverFault>;
}
