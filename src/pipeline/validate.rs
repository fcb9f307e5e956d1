// file: src/pipeline/validate.rs
// description: read-only data quality checks over the rows stored in the remote table
// reference: internal data structures

use crate::database::TableStore;
use crate::database::schema::{self, GENERATED_COLUMNS, KEY_NUMERIC_COLUMNS};
use crate::error::Result;
use crate::models::segment::ContractType;
use crate::models::stored::{field_f64, is_missing};
use crate::models::Row;
use crate::utils::logging::{format_success, format_warning};
use chrono::Utc;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub table: String,
    pub row_count: usize,
    pub missing_tenure: usize,
    pub missing_monthly_charges: usize,
    pub missing_total_charges: usize,
    pub unique_rows: usize,
    pub duplicate_rows: usize,
    pub contract_codes_valid: bool,
    pub has_tenure_group: bool,
    pub has_monthly_charge_segment: bool,
    pub missing_columns: Vec<String>,
}

impl ValidationReport {
    pub fn from_rows(table: &str, rows: &[Row]) -> Self {
        let [missing_tenure, missing_monthly_charges, missing_total_charges] =
            KEY_NUMERIC_COLUMNS.map(|column| rows.iter().filter(|r| is_missing(r, column)).count());
        let duplicate_rows = count_duplicates(rows);

        Self {
            table: table.to_string(),
            row_count: rows.len(),
            missing_tenure,
            missing_monthly_charges,
            missing_total_charges,
            unique_rows: rows.len() - duplicate_rows,
            duplicate_rows,
            contract_codes_valid: rows.iter().all(has_valid_contract_code),
            has_tenure_group: schema::has_column(rows, "tenure_group"),
            has_monthly_charge_segment: schema::has_column(rows, "monthly_charge_segment"),
            missing_columns: schema::missing_columns(rows)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// True when every check passed. Informational only; nothing is blocked on it.
    pub fn is_clean(&self) -> bool {
        self.missing_tenure == 0
            && self.missing_monthly_charges == 0
            && self.missing_total_charges == 0
            && self.duplicate_rows == 0
            && self.contract_codes_valid
            && self.has_tenure_group
            && self.has_monthly_charge_segment
    }

    pub fn format(&self) -> String {
        let check = |ok: bool, msg: String| {
            if ok { format_success(&msg) } else { format_warning(&msg) }
        };

        let mut lines = vec![
            format!("Data Validation Summary ({})", self.table),
            "=".repeat(40),
            format!("Checked at: {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC")),
            format!("Rows: {}", self.row_count),
            check(
                self.missing_tenure == 0,
                format!("Missing values in tenure: {}", self.missing_tenure),
            ),
            check(
                self.missing_monthly_charges == 0,
                format!("Missing values in monthly charges: {}", self.missing_monthly_charges),
            ),
            check(
                self.missing_total_charges == 0,
                format!("Missing values in total charges: {}", self.missing_total_charges),
            ),
            format!("Unique rows: {}", self.unique_rows),
            check(
                self.duplicate_rows == 0,
                format!("Duplicate rows: {}", self.duplicate_rows),
            ),
            check(
                self.contract_codes_valid,
                format!("Contract code valid values (0, 1, 2): {}", self.contract_codes_valid),
            ),
            check(
                self.has_tenure_group,
                format!("tenure_group column exists: {}", self.has_tenure_group),
            ),
            check(
                self.has_monthly_charge_segment,
                format!(
                    "monthly_charge_segment column exists: {}",
                    self.has_monthly_charge_segment
                ),
            ),
        ];

        if !self.missing_columns.is_empty() {
            lines.push(format_warning(&format!(
                "Columns absent from table: {}",
                self.missing_columns.join(", ")
            )));
        }

        lines.join("\n")
    }
}

fn has_valid_contract_code(row: &Row) -> bool {
    match field_f64(row, "contract_type_code") {
        Some(code) if code.fract() == 0.0 => ContractType::is_valid_code(code as i64),
        _ => false,
    }
}

/// Rows identical to an earlier row once store-assigned columns are ignored.
fn count_duplicates(rows: &[Row]) -> usize {
    let mut seen = HashSet::with_capacity(rows.len());
    let mut duplicates = 0;

    for row in rows {
        let content: BTreeMap<&str, &Value> = row
            .iter()
            .filter(|(k, _)| !GENERATED_COLUMNS.contains(&k.as_str()))
            .map(|(k, v)| (k.as_str(), v))
            .collect();

        let key = serde_json::to_string(&content).unwrap_or_default();
        if !seen.insert(key) {
            duplicates += 1;
        }
    }

    duplicates
}

pub async fn validate(store: &dyn TableStore, table: &str) -> Result<ValidationReport> {
    let rows = store.select_all(table).await?;
    let report = ValidationReport::from_rows(table, &rows);

    info!(
        "Validated {} rows from \"{}\" ({} duplicates, contract codes valid: {})",
        report.row_count, table, report.duplicate_rows, report.contract_codes_valid
    );

    Ok(report)
}
