// file: src/pipeline/orchestrator.rs
// description: runs extract, transform, load, validate and analyze in sequence
// reference: orchestrates the single-pass churn workflow

use crate::config::Config;
use crate::database::TableStore;
use crate::error::Result;
use crate::pipeline::analyze::{analyze, AnalysisSummary};
use crate::pipeline::extract::extract;
use crate::pipeline::load::{load, LoadOptions};
use crate::pipeline::progress::PipelineStats;
use crate::pipeline::transform::transform;
use crate::pipeline::validate::{validate, ValidationReport};
use crate::utils::logging::format_step;
use crate::utils::telemetry::OperationTimer;
use std::time::Instant;
use tracing::{info, warn};

const STAGES: usize = 5;

pub struct PipelineOrchestrator<'a> {
    config: Config,
    store: &'a dyn TableStore,
    show_progress: bool,
}

/// Everything a full run produced.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub stats: PipelineStats,
    pub validation: ValidationReport,
    pub analysis: AnalysisSummary,
}

impl<'a> PipelineOrchestrator<'a> {
    pub fn new(config: Config, store: &'a dyn TableStore) -> Self {
        Self {
            config,
            store,
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub async fn run(&self) -> Result<PipelineRun> {
        let started = Instant::now();
        let paths = &self.config.paths;
        let table = self.config.store.table_name.as_str();
        let mut stats = PipelineStats::new();

        info!("{}", format_step(1, STAGES, "Extract"));
        let timer = OperationTimer::new("extract");
        let raw_path = extract(&paths.source_csv, &paths.raw_csv)?;
        timer.finish();

        info!("{}", format_step(2, STAGES, "Transform"));
        let timer = OperationTimer::new("transform");
        let transformed = transform(&raw_path, &paths.staged_csv)?;
        stats.raw_rows = transformed.raw_rows;
        stats.staged_rows = transformed.rows;
        timer.finish_with_count(stats.staged_rows);

        info!("{}", format_step(3, STAGES, "Load"));
        let timer = OperationTimer::new("load");
        let options = LoadOptions {
            batch_size: self.config.store.batch_size,
            show_progress: self.show_progress,
        };
        stats.insert = load(self.store, &transformed.staged_path, table, options).await?;
        match &stats.insert {
            Some(insert) => {
                timer.finish_with_count(insert.rows_inserted);
            }
            None => warn!("Load skipped, validating whatever the table already holds"),
        }

        info!("{}", format_step(4, STAGES, "Validate"));
        let validation = validate(self.store, table).await?;
        stats.rows_validated = validation.row_count;

        info!("{}", format_step(5, STAGES, "Analyze"));
        let timer = OperationTimer::new("analyze");
        let analysis = analyze(self.store, table, &paths.summary_csv).await?;
        stats.metrics_written = analysis.metrics().len();
        timer.finish_with_count(stats.metrics_written);

        stats.duration_secs = started.elapsed().as_secs();
        info!(
            "Pipeline complete in {}s: {} raw rows, {} staged ({:.1} rows/s), {:.1}% loaded",
            stats.duration_secs,
            stats.raw_rows,
            stats.staged_rows,
            stats.rows_per_second(),
            stats.load_rate()
        );

        Ok(PipelineRun {
            stats,
            validation,
            analysis,
        })
    }
}
