// file: src/database/memory.rs
// description: in-process table store used for dry runs and tests
// reference: internal data structures

use crate::database::store::TableStore;
use crate::error::{PipelineError, Result};
use crate::models::Row;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Default)]
struct Tables {
    rows: HashMap<String, Vec<Row>>,
    batch_sizes: Vec<usize>,
    next_id: u64,
}

/// Append-only tables held in memory. Each inserted row receives a serial `id`
/// the way the hosted table does.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| PipelineError::Store("memory store lock poisoned".to_string()))
    }

    pub fn row_count(&self, table: &str) -> usize {
        self.lock()
            .map(|t| t.rows.get(table).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    /// Size of every insert call received so far, in call order.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.lock().map(|t| t.batch_sizes.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    fn describe(&self) -> String {
        "in-memory store".to_string()
    }

    async fn ping(&self, _table: &str) -> Result<()> {
        self.lock().map(|_| ())
    }

    async fn select_all(&self, table: &str) -> Result<Vec<Row>> {
        Ok(self.lock()?.rows.get(table).cloned().unwrap_or_default())
    }

    async fn insert(&self, table: &str, rows: &[Row]) -> Result<()> {
        let mut tables = self.lock()?;
        tables.batch_sizes.push(rows.len());

        let mut stamped = Vec::with_capacity(rows.len());
        for row in rows {
            tables.next_id += 1;
            let mut row = row.clone();
            row.insert("id".to_string(), Value::from(tables.next_id));
            stamped.push(row);
        }

        tables.rows.entry(table.to_string()).or_default().extend(stamped);
        debug!("Appended {} rows to in-memory table {}", rows.len(), table);
        Ok(())
    }
}
