// file: src/models/stored.rs
// description: row shape persisted in the remote table and helpers for reading rows back
// reference: https://docs.rs/serde_json

use crate::error::{PipelineError, Result};
use crate::models::customer::StagedCustomer;
use crate::models::number::serialize_whole;
use crate::models::segment::{ChargeSegment, TenureBucket};
use serde::Serialize;
use serde_json::{Map, Value};

/// A remote table row: lowercase column name to value.
pub type Row = Map<String, Value>;

/// The subset of a staged record that is persisted, under the store's column names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredRow {
    #[serde(serialize_with = "serialize_whole")]
    pub tenure: f64,
    pub monthlycharges: f64,
    pub totalcharges: f64,
    pub churn: Option<String>,
    pub internetservice: Option<String>,
    pub contract: Option<String>,
    pub paymentmethod: Option<String>,
    pub tenure_group: TenureBucket,
    pub monthly_charge_segment: ChargeSegment,
    pub has_internet_service: u8,
    pub is_multi_line_user: u8,
    pub contract_type_code: Option<u8>,
}

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl StoredRow {
    pub fn to_row(&self) -> Result<Row> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(PipelineError::Store(format!(
                "Stored row serialized to a non-object value: {}",
                other
            ))),
        }
    }
}

impl From<&StagedCustomer> for StoredRow {
    fn from(staged: &StagedCustomer) -> Self {
        Self {
            tenure: staged.tenure,
            monthlycharges: staged.monthly_charges,
            totalcharges: staged.total_charges,
            churn: non_blank(&staged.churn),
            internetservice: non_blank(&staged.internet_service),
            contract: non_blank(&staged.contract),
            paymentmethod: non_blank(&staged.payment_method),
            tenure_group: staged.tenure_group,
            monthly_charge_segment: staged.monthly_charge_segment,
            has_internet_service: staged.has_internet_service,
            is_multi_line_user: staged.is_multi_line_user,
            contract_type_code: staged.contract_type_code,
        }
    }
}

pub fn is_missing(row: &Row, column: &str) -> bool {
    matches!(row.get(column), None | Some(Value::Null))
}

pub fn field_str<'a>(row: &'a Row, column: &str) -> Option<&'a str> {
    row.get(column).and_then(Value::as_str)
}

/// Numeric value of a column; numeric text is accepted since some stores return decimals as strings.
pub fn field_f64(row: &Row, column: &str) -> Option<f64> {
    match row.get(column)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
