use crate::store::query::QueryDescriptor;
use crate::store::types::{FetchResponse, RecordResponse, UpdateRequest, UpdateResponse};
use anyhow::Result;
use async_trait::async_trait;

/// Client-side seam to the external record store.
/// The gateway runs against the HTTP client in production and against a
/// scripted store in tests.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Run a query descriptor against a table
    async fn fetch_records(&self, table: &str, query: &QueryDescriptor) -> Result<FetchResponse>;

    /// Fetch a single record by its store-assigned identifier
    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        query: &QueryDescriptor,
    ) -> Result<RecordResponse>;

    /// Apply partial updates to existing records
    async fn update_records(&self, table: &str, request: &UpdateRequest) -> Result<UpdateResponse>;
}
