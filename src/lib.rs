// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod database;
pub mod error;
pub mod exporter;
pub mod models;
pub mod pipeline;
pub mod utils;

pub use config::{Config, PathsConfig, StoreConfig, StoreCredentials};
pub use database::{BatchInserter, InsertStats, MemoryStore, SupabaseClient, TableStore};
pub use error::{PipelineError, Result};
pub use exporter::SummaryWriter;
pub use models::{
    ChargeSegment, ChurnLabel, ContractType, InternetService, Metric, MetricValue, RawCustomer,
    Row, StagedCustomer, StoredRow, SummaryMetric, TenureBucket,
};
pub use pipeline::{
    AnalysisSummary, LoadOptions, PipelineOrchestrator, PipelineRun, PipelineStats,
    TransformReport, ValidationReport,
};
pub use utils::{OperationTimer, PerformanceMetrics, Validator};
