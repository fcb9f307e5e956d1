// file: src/database/insert.rs
// description: fixed-size batch insertion with skip-and-continue failure handling
// reference: internal data structures

use crate::database::store::TableStore;
use crate::error::Result;
use crate::models::{Row, StoredRow};
use crate::pipeline::progress::ProgressTracker;
use tracing::{info, warn};

pub const DEFAULT_BATCH_SIZE: usize = 200;

pub struct BatchInserter<'a> {
    store: &'a dyn TableStore,
    batch_size: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertStats {
    pub rows_inserted: usize,
    pub rows_failed: usize,
    pub batches_inserted: usize,
    pub batches_failed: usize,
}

impl InsertStats {
    pub fn batches(&self) -> usize {
        self.batches_inserted + self.batches_failed
    }
}

impl<'a> BatchInserter<'a> {
    pub fn new(store: &'a dyn TableStore, batch_size: usize) -> Self {
        Self {
            store,
            batch_size: batch_size.max(1),
        }
    }

    /// Inserts rows batch by batch. A failed batch is logged and skipped; earlier
    /// batches stay in the table.
    pub async fn insert_rows(
        &self,
        table: &str,
        rows: &[StoredRow],
        progress: &ProgressTracker,
    ) -> InsertStats {
        let total_rows = rows.len();
        let mut stats = InsertStats::default();

        for (index, batch) in rows.chunks(self.batch_size).enumerate() {
            let batch_number = index + 1;
            let start = index * self.batch_size;
            let end = start + batch.len();

            match self.insert_batch(table, batch).await {
                Ok(()) => {
                    stats.rows_inserted += batch.len();
                    stats.batches_inserted += 1;
                    progress.batch_done(batch.len(), batch_number, true);
                    info!("Inserted rows {}-{} of {}", start + 1, end, total_rows);
                }
                Err(e) => {
                    stats.rows_failed += batch.len();
                    stats.batches_failed += 1;
                    progress.batch_done(batch.len(), batch_number, false);
                    warn!("Error in batch {}: {}", batch_number, e);
                }
            }
        }

        stats
    }

    async fn insert_batch(&self, table: &str, batch: &[StoredRow]) -> Result<()> {
        let records = batch
            .iter()
            .map(StoredRow::to_row)
            .collect::<Result<Vec<Row>>>()?;

        self.store.insert(table, &records).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::error::PipelineError;
    use crate::models::customer::{fixtures, Imputation, StagedCustomer};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Fails the insert calls whose 1-based number is listed.
    struct FlakyStore {
        fail_calls: Vec<usize>,
        calls: Mutex<Vec<usize>>,
        inner: MemoryStore,
    }

    #[async_trait]
    impl TableStore for FlakyStore {
        fn describe(&self) -> String {
            "flaky".to_string()
        }

        async fn ping(&self, _table: &str) -> Result<()> {
            Ok(())
        }

        async fn select_all(&self, table: &str) -> Result<Vec<Row>> {
            self.inner.select_all(table).await
        }

        async fn insert(&self, table: &str, rows: &[Row]) -> Result<()> {
            let call = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(rows.len());
                calls.len()
            };
            if self.fail_calls.contains(&call) {
                return Err(PipelineError::Store("simulated outage".to_string()));
            }
            self.inner.insert(table, rows).await
        }
    }

    fn stored_rows(n: usize) -> Vec<StoredRow> {
        let fill = Imputation {
            tenure: 1.0,
            monthly_charges: 1.0,
            total_charges: 1.0,
        };
        (0..n)
            .map(|i| {
                let raw = fixtures::raw(Some(i as f64 % 72.0), Some(50.0), Some(100.0));
                StoredRow::from(&StagedCustomer::from_raw(raw, &fill))
            })
            .collect()
    }

    #[tokio::test]
    async fn test_450_rows_issue_three_inserts() {
        let store = MemoryStore::new();
        let inserter = BatchInserter::new(&store, DEFAULT_BATCH_SIZE);

        let stats = inserter
            .insert_rows("customer_churn", &stored_rows(450), &ProgressTracker::hidden(450))
            .await;

        assert_eq!(store.batch_sizes(), vec![200, 200, 50]);
        assert_eq!(stats.rows_inserted, 450);
        assert_eq!(stats.batches(), 3);
        assert_eq!(store.row_count("customer_churn"), 450);
    }

    #[tokio::test]
    async fn test_failed_batch_is_skipped_and_loop_continues() {
        let store = FlakyStore {
            fail_calls: vec![2],
            calls: Mutex::new(Vec::new()),
            inner: MemoryStore::new(),
        };
        let inserter = BatchInserter::new(&store, 200);

        let stats = inserter
            .insert_rows("customer_churn", &stored_rows(450), &ProgressTracker::hidden(450))
            .await;

        assert_eq!(*store.calls.lock().unwrap(), vec![200, 200, 50]);
        assert_eq!(
            stats,
            InsertStats {
                rows_inserted: 250,
                rows_failed: 200,
                batches_inserted: 2,
                batches_failed: 1,
            }
        );
        assert_eq!(store.inner.row_count("customer_churn"), 250);
    }

    #[tokio::test]
    async fn test_empty_input_issues_no_inserts() {
        let store = MemoryStore::new();
        let inserter = BatchInserter::new(&store, 200);

        let stats = inserter
            .insert_rows("customer_churn", &[], &ProgressTracker::hidden(0))
            .await;

        assert_eq!(stats, InsertStats::default());
        assert!(store.batch_sizes().is_empty());
    }
}
