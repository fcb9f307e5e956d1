// file: src/models/summary.rs
// description: flattened (name, value) metrics produced by the analysis stage
// reference: internal data structures

use crate::models::segment::{metric_key, ChurnLabel, ContractType, InternetService, TenureBucket};
use std::fmt;

/// Every metric the analysis can emit. Names are derived from the variant, never from raw data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    ChurnPercentage,
    AvgMonthly(ContractType),
    SegmentCount(TenureBucket),
    InternetService(InternetService),
    Pivot(TenureBucket, ChurnLabel),
}

impl Metric {
    pub fn name(&self) -> String {
        match self {
            Metric::ChurnPercentage => "churn_percentage".to_string(),
            Metric::AvgMonthly(contract) => format!("avg_monthly_{}", metric_key(contract.label())),
            Metric::SegmentCount(bucket) => format!("segment_count_{}", metric_key(bucket.label())),
            Metric::InternetService(service) => {
                format!("internet_service_{}", metric_key(service.label()))
            }
            Metric::Pivot(bucket, churn) => format!(
                "pivot_{}_{}",
                metric_key(bucket.label()),
                metric_key(churn.label())
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Count(u64),
    Decimal(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Count(n) => write!(f, "{}", n),
            MetricValue::Decimal(v) if v.fract() == 0.0 => write!(f, "{:.1}", v),
            MetricValue::Decimal(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryMetric {
    pub metric: Metric,
    pub value: MetricValue,
}

impl SummaryMetric {
    pub fn count(metric: Metric, count: usize) -> Self {
        Self {
            metric,
            value: MetricValue::Count(count as u64),
        }
    }

    pub fn decimal(metric: Metric, value: f64) -> Self {
        Self {
            metric,
            value: MetricValue::Decimal(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names() {
        assert_eq!(Metric::ChurnPercentage.name(), "churn_percentage");
        assert_eq!(
            Metric::AvgMonthly(ContractType::MonthToMonth).name(),
            "avg_monthly_month-to-month"
        );
        assert_eq!(Metric::AvgMonthly(ContractType::OneYear).name(), "avg_monthly_one_year");
        assert_eq!(Metric::SegmentCount(TenureBucket::Champion).name(), "segment_count_champion");
        assert_eq!(
            Metric::InternetService(InternetService::FiberOptic).name(),
            "internet_service_fiber_optic"
        );
        assert_eq!(
            Metric::Pivot(TenureBucket::New, ChurnLabel::Yes).name(),
            "pivot_new_yes"
        );
    }

    #[test]
    fn test_metric_value_display() {
        assert_eq!(MetricValue::Count(7).to_string(), "7");
        assert_eq!(MetricValue::Decimal(30.0).to_string(), "30.0");
        assert_eq!(MetricValue::Decimal(64.76).to_string(), "64.76");
    }
}
