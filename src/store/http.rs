use crate::store::query::QueryDescriptor;
use crate::store::traits::RecordStore;
use crate::store::types::{FetchResponse, RecordResponse, UpdateRequest, UpdateResponse};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const PROJECT_HEADER: &str = "X-Project-Id";
const KEY_HEADER: &str = "X-Public-Key";

/// Endpoint and credentials for the hosted record store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub project_id: String,
    pub public_key: String,
}

impl StoreConfig {
    /// Read the store endpoint and credentials from the environment
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: std::env::var("RECORD_STORE_URL").context("RECORD_STORE_URL is not set")?,
            project_id: std::env::var("RECORD_STORE_PROJECT_ID")
                .context("RECORD_STORE_PROJECT_ID is not set")?,
            public_key: std::env::var("RECORD_STORE_PUBLIC_KEY")
                .context("RECORD_STORE_PUBLIC_KEY is not set")?,
        })
    }
}

/// HTTP implementation of [`RecordStore`] talking to the hosted platform.
/// One request per call; a `success: false` envelope is passed through to
/// the gateway, only transport-level problems surface as errors here.
pub struct HttpRecordStore {
    client: Client,
    config: StoreConfig,
}

impl HttpRecordStore {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    fn records_url(&self, table: &str) -> String {
        format!(
            "{}/api/v1/tables/{}/records",
            self.config.base_url.trim_end_matches('/'),
            table
        )
    }

    async fn submit<B, R>(&self, method: Method, url: String, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!("Calling record store: {method} {url}");

        let response = self
            .client
            .request(method, &url)
            .header(PROJECT_HEADER, &self.config.project_id)
            .header(KEY_HEADER, &self.config.public_key)
            .json(body)
            .send()
            .await
            .context("Failed to reach the record store")?
            .error_for_status()
            .context("Record store returned an error status")?;

        response
            .json()
            .await
            .context("Failed to decode record store response")
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn fetch_records(&self, table: &str, query: &QueryDescriptor) -> Result<FetchResponse> {
        let url = format!("{}/query", self.records_url(table));
        self.submit(Method::POST, url, query).await
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        query: &QueryDescriptor,
    ) -> Result<RecordResponse> {
        let url = format!("{}/{}", self.records_url(table), id);
        self.submit(Method::POST, url, query).await
    }

    async fn update_records(&self, table: &str, request: &UpdateRequest) -> Result<UpdateResponse> {
        self.submit(Method::PATCH, self.records_url(table), request)
            .await
    }
}
