// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for pipeline execution
// reference: uses indicatif for progress bars and tracks processing metrics

use crate::database::InsertStats;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    pub raw_rows: usize,
    pub staged_rows: usize,
    pub insert: Option<InsertStats>,
    pub rows_validated: usize,
    pub metrics_written: usize,
    pub duration_secs: u64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows_per_second(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.staged_rows as f64 / self.duration_secs as f64
    }

    /// Share of staged rows that reached the table, as a percentage.
    pub fn load_rate(&self) -> f64 {
        match &self.insert {
            Some(insert) if self.staged_rows > 0 => {
                (insert.rows_inserted as f64 / self.staged_rows as f64) * 100.0
            }
            _ => 0.0,
        }
    }
}

/// Row-level progress bar for batch loading.
pub struct ProgressTracker {
    bar: ProgressBar,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_rows: usize) -> Self {
        Self::with_color(total_rows, true)
    }

    pub fn with_color(total_rows: usize, colored: bool) -> Self {
        let bar = ProgressBar::new(total_rows as u64);
        bar.set_style(bar_style(colored));

        Self {
            bar,
            start_time: Instant::now(),
        }
    }

    /// Tracks without drawing anything.
    pub fn hidden(total_rows: usize) -> Self {
        let tracker = Self::with_color(total_rows, false);
        tracker.bar.set_draw_target(ProgressDrawTarget::hidden());
        tracker
    }

    pub fn batch_done(&self, rows: usize, batch: usize, ok: bool) {
        self.bar.inc(rows as u64);
        let outcome = if ok { "inserted" } else { "failed" };
        self.bar.set_message(format!("batch {} {}", batch, outcome));
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("Load complete");
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

fn bar_style(colored: bool) -> ProgressStyle {
    let template = if colored {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows ({eta}) {msg}"
    } else {
        "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} rows ({eta}) {msg}"
    };

    ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars(if colored { "█▓▒░" } else { "=>-" })
}
