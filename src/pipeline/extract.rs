// file: src/pipeline/extract.rs
// description: copies the source dataset verbatim into the raw artifact location
// reference: https://doc.rust-lang.org/std/fs/fn.copy.html

use crate::error::{PipelineError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn extract(source: &Path, raw_path: &Path) -> Result<PathBuf> {
    if let Some(parent) = raw_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PipelineError::file_operation(parent, e))?;
    }

    let bytes = fs::copy(source, raw_path).map_err(|e| PipelineError::file_operation(source, e))?;

    info!(
        "Data extracted and saved at: {} ({} bytes)",
        raw_path.display(),
        bytes
    );

    Ok(raw_path.to_path_buf())
}
