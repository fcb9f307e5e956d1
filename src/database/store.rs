// file: src/database/store.rs
// description: record-oriented table store abstraction shared by loader, validator and analyzer
// reference: https://docs.rs/async-trait

use crate::error::Result;
use crate::models::Row;
use async_trait::async_trait;

/// A named collection of rows supporting read-all and append.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Short human-readable description used in log lines.
    fn describe(&self) -> String;

    /// Confirms the store is reachable and the table can be read.
    async fn ping(&self, table: &str) -> Result<()>;

    async fn select_all(&self, table: &str) -> Result<Vec<Row>>;

    /// Appends rows. Never updates or deletes existing rows.
    async fn insert(&self, table: &str, rows: &[Row]) -> Result<()>;
}
