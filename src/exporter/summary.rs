// file: src/exporter/summary.rs
// description: writes flattened analysis metrics as a two-column csv artifact

use crate::error::{PipelineError, Result};
use crate::models::SummaryMetric;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SummaryWriter {
    path: PathBuf,
}

impl SummaryWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces any previous summary at the same path.
    pub fn write(&self, metrics: &[SummaryMetric]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PipelineError::file_operation(parent, e))?;
        }

        let file = File::create(&self.path).map_err(|e| PipelineError::file_operation(&self.path, e))?;
        let mut writer = csv::Writer::from_writer(file);

        writer.write_record(["metric", "value"])?;
        for metric in metrics {
            writer.write_record([metric.metric.name(), metric.value.to_string()])?;
        }
        writer.flush()?;

        debug!("Wrote {} metrics to {}", metrics.len(), self.path.display());
        Ok(())
    }
}
