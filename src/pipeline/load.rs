// file: src/pipeline/load.rs
// description: reads the staged artifact and appends its rows to the remote table in batches
// reference: internal data structures

use crate::database::schema::COLUMN_RENAMES;
use crate::database::{BatchInserter, InsertStats, TableStore};
use crate::error::Result;
use crate::models::StoredRow;
use crate::pipeline::progress::ProgressTracker;
use crate::pipeline::transform::read_staged;
use crate::utils::telemetry::PerformanceMetrics;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub batch_size: usize,
    pub show_progress: bool,
}

/// Returns `Ok(None)` when the staged artifact does not exist yet. Every call
/// appends, so loading the same file twice doubles the rows in the table.
pub async fn load(
    store: &dyn TableStore,
    staged_path: &Path,
    table: &str,
    options: LoadOptions,
) -> Result<Option<InsertStats>> {
    if !staged_path.exists() {
        error!("File not found at {}", staged_path.display());
        info!("Please run the transform stage first to generate the transformed data");
        return Ok(None);
    }

    store.ping(table).await?;

    let staged = read_staged(staged_path)?;
    for (from, to) in COLUMN_RENAMES {
        debug!("Column mapping: {} -> {}", from, to);
    }

    let rows: Vec<StoredRow> = staged.iter().map(StoredRow::from).collect();
    info!(
        "Loading {} rows into \"{}\" on {} in batches of {}",
        rows.len(),
        table,
        store.describe(),
        options.batch_size
    );

    let progress = if options.show_progress {
        ProgressTracker::new(rows.len())
    } else {
        ProgressTracker::hidden(rows.len())
    };

    let inserter = BatchInserter::new(store, options.batch_size);
    let stats = inserter.insert_rows(table, &rows, &progress).await;
    progress.finish();

    let metrics = PerformanceMetrics::new(
        "load",
        stats.rows_inserted,
        Duration::from_secs(progress.elapsed_secs()),
    );
    debug!("{}", metrics.format());

    info!(
        "Finished loading data into \"{}\" ({} rows inserted, {} batches failed)",
        table, stats.rows_inserted, stats.batches_failed
    );

    Ok(Some(stats))
}
