// file: src/database/client.rs
// description: hosted table store client speaking the PostgREST protocol over reqwest
// reference: https://postgrest.org/en/stable/references/api/tables_views.html

use crate::config::{StoreConfig, StoreCredentials};
use crate::database::store::TableStore;
use crate::error::{PipelineError, Result};
use crate::models::Row;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::{debug, info};

/// Store-assigned serial key; gives offset paging a stable row order.
const ORDER_COLUMN: &str = "id";

#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    credentials: StoreCredentials,
    page_size: usize,
}

impl SupabaseClient {
    pub fn new(credentials: StoreCredentials, config: &StoreConfig) -> Result<Self> {
        info!("Creating table store client for {}", credentials.url);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            credentials,
            page_size: config.page_size.max(1),
        })
    }

    /// Reads secrets from the environment and builds the client in one step.
    pub fn from_env(config: &StoreConfig) -> Result<Self> {
        Self::new(StoreCredentials::from_env()?, config)
    }

    fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.credentials.url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", self.credentials.key.as_str())
            .header("Authorization", format!("Bearer {}", self.credentials.key))
    }

    async fn fetch_page(&self, table: &str, limit: usize, offset: usize) -> Result<Vec<Row>> {
        let url = format!(
            "{}?select=*&order={}.asc&limit={}&offset={}",
            self.endpoint(table),
            ORDER_COLUMN,
            limit,
            offset
        );

        let response = self.authorized(self.client.get(&url)).send().await?;
        let response = check_status(response, "select").await?;

        response.json::<Vec<Row>>().await.map_err(|e| {
            PipelineError::Store(format!("Failed to parse rows from {}: {}", table, e))
        })
    }
}

async fn check_status(response: Response, operation: &str) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    Err(PipelineError::Store(format!(
        "{} failed with status {}: {}",
        operation, status, body
    )))
}

#[async_trait]
impl TableStore for SupabaseClient {
    fn describe(&self) -> String {
        self.credentials.url.clone()
    }

    async fn ping(&self, table: &str) -> Result<()> {
        debug!("Checking table store connection");
        self.fetch_page(table, 1, 0).await?;
        info!("Table store connection successful");
        Ok(())
    }

    async fn select_all(&self, table: &str) -> Result<Vec<Row>> {
        let mut rows = Vec::new();

        // The server may cap a response below page_size, so only an empty page ends the read.
        loop {
            let page = self.fetch_page(table, self.page_size, rows.len()).await?;
            if page.is_empty() {
                break;
            }

            let fetched = page.len();
            rows.extend(page);
            debug!("Fetched {} rows from {} ({} total)", fetched, table, rows.len());
        }

        info!("Fetched {} rows from {}", rows.len(), table);
        Ok(rows)
    }

    async fn insert(&self, table: &str, rows: &[Row]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let response = self
            .authorized(self.client.post(self.endpoint(table)))
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await?;

        check_status(response, "insert").await?;
        Ok(())
    }
}
