// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

pub mod analyze;
pub mod extract;
pub mod load;
mod orchestrator;
pub mod progress;
pub mod transform;
pub mod validate;

pub use analyze::{analyze, AnalysisSummary, PivotCell};
pub use extract::extract;
pub use load::{load, LoadOptions};
pub use orchestrator::{PipelineOrchestrator, PipelineRun};
pub use progress::{PipelineStats, ProgressTracker};
pub use transform::{transform, TransformReport};
pub use validate::{validate, ValidationReport};
