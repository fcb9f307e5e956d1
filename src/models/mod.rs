// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod customer;
pub mod number;
pub mod segment;
pub mod stored;
pub mod summary;

pub use customer::{Imputation, RawCustomer, StagedCustomer};
pub use segment::{ChargeSegment, ChurnLabel, ContractType, InternetService, TenureBucket};
pub use stored::{Row, StoredRow};
pub use summary::{Metric, MetricValue, SummaryMetric};
