// file: src/pipeline/analyze.rs
// description: summary statistics over the stored rows, flattened into named metrics
// reference: internal data structures

use crate::database::TableStore;
use crate::error::{PipelineError, Result};
use crate::exporter::SummaryWriter;
use crate::models::number::round2;
use crate::models::stored::{field_f64, field_str};
use crate::models::{
    ChurnLabel, ContractType, InternetService, Metric, Row, SummaryMetric, TenureBucket,
};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct PivotCell {
    pub bucket: TenureBucket,
    pub churn: ChurnLabel,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    pub row_count: usize,
    pub churn_percentage: f64,
    /// Contracts with at least one monthly charge, in contract order.
    pub avg_monthly_by_contract: Vec<(ContractType, f64)>,
    pub segment_counts: Vec<(TenureBucket, usize)>,
    pub internet_service_counts: Vec<(InternetService, usize)>,
    /// Every bucket and churn label combination, zero when absent.
    pub pivot: Vec<PivotCell>,
}

impl AnalysisSummary {
    pub fn from_rows(rows: &[Row]) -> Result<Self> {
        if rows.is_empty() {
            return Err(PipelineError::Analysis(
                "Table has no rows to analyze".to_string(),
            ));
        }

        let churned = rows
            .iter()
            .filter(|r| field_str(r, "churn") == Some(ChurnLabel::Yes.label()))
            .count();
        let churn_percentage = round2(churned as f64 / rows.len() as f64 * 100.0);

        let mut charges: BTreeMap<ContractType, (f64, usize)> = BTreeMap::new();
        let mut segments: BTreeMap<TenureBucket, usize> = BTreeMap::new();
        let mut services: BTreeMap<InternetService, usize> = BTreeMap::new();
        let mut pivot: BTreeMap<(TenureBucket, ChurnLabel), usize> = BTreeMap::new();
        let mut unrecognized = 0usize;

        for row in rows {
            let contract = field_str(row, "contract").and_then(ContractType::from_label);
            let bucket = field_str(row, "tenure_group").and_then(TenureBucket::from_label);
            let service = field_str(row, "internetservice").and_then(InternetService::from_label);
            let churn = field_str(row, "churn").and_then(ChurnLabel::from_label);

            if let (Some(contract), Some(charge)) = (contract, field_f64(row, "monthlycharges")) {
                let entry = charges.entry(contract).or_insert((0.0, 0));
                entry.0 += charge;
                entry.1 += 1;
            }

            if let Some(bucket) = bucket {
                *segments.entry(bucket).or_default() += 1;
            }

            if let Some(service) = service {
                *services.entry(service).or_default() += 1;
            }

            if let (Some(bucket), Some(churn)) = (bucket, churn) {
                *pivot.entry((bucket, churn)).or_default() += 1;
            }

            if contract.is_none() || bucket.is_none() || service.is_none() || churn.is_none() {
                unrecognized += 1;
            }
        }

        if unrecognized > 0 {
            warn!(
                "{} rows carry missing or unrecognized category labels and are left out of the breakdowns",
                unrecognized
            );
        }

        Ok(Self {
            row_count: rows.len(),
            churn_percentage,
            avg_monthly_by_contract: charges
                .into_iter()
                .map(|(contract, (sum, n))| (contract, round2(sum / n as f64)))
                .collect(),
            segment_counts: TenureBucket::ALL
                .iter()
                .map(|b| (*b, segments.get(b).copied().unwrap_or(0)))
                .collect(),
            internet_service_counts: InternetService::ALL
                .iter()
                .map(|s| (*s, services.get(s).copied().unwrap_or(0)))
                .collect(),
            pivot: TenureBucket::ALL
                .iter()
                .flat_map(|bucket| {
                    ChurnLabel::ALL.iter().map(|churn| PivotCell {
                        bucket: *bucket,
                        churn: *churn,
                        count: pivot.get(&(*bucket, *churn)).copied().unwrap_or(0),
                    })
                })
                .collect(),
        })
    }

    /// Flattens every statistic into (name, value) metrics in report order.
    pub fn metrics(&self) -> Vec<SummaryMetric> {
        let mut metrics = vec![SummaryMetric::decimal(
            Metric::ChurnPercentage,
            self.churn_percentage,
        )];

        metrics.extend(
            self.avg_monthly_by_contract
                .iter()
                .map(|(contract, avg)| SummaryMetric::decimal(Metric::AvgMonthly(*contract), *avg)),
        );
        metrics.extend(
            self.segment_counts
                .iter()
                .map(|(bucket, n)| SummaryMetric::count(Metric::SegmentCount(*bucket), *n)),
        );
        metrics.extend(
            self.internet_service_counts
                .iter()
                .map(|(service, n)| SummaryMetric::count(Metric::InternetService(*service), *n)),
        );
        metrics.extend(
            self.pivot
                .iter()
                .map(|cell| SummaryMetric::count(Metric::Pivot(cell.bucket, cell.churn), cell.count)),
        );

        metrics
    }

    pub fn format(&self) -> String {
        let mut lines = vec![format!("Analysis Summary ({} rows)", self.row_count), "=".repeat(40)];
        lines.extend(
            self.metrics()
                .iter()
                .map(|m| format!("{:<32} {}", m.metric.name(), m.value)),
        );
        lines.join("\n")
    }
}

pub async fn analyze(
    store: &dyn TableStore,
    table: &str,
    summary_path: &Path,
) -> Result<AnalysisSummary> {
    let rows = store.select_all(table).await?;
    let summary = AnalysisSummary::from_rows(&rows)?;
    let metrics = summary.metrics();
    debug!("Computed {} metrics from \"{}\"", metrics.len(), table);

    let writer = SummaryWriter::new(summary_path);
    writer.write(&metrics)?;
    info!(
        "Analysis is done and saved the report at '{}'",
        writer.path().display()
    );

    Ok(summary)
}
