// file: src/pipeline/transform.rs
// description: derives categorical features from the raw artifact and writes the staged artifact
// reference: https://docs.rs/csv

use crate::database::schema::STAGED_COLUMNS;
use crate::error::{PipelineError, Result};
use crate::models::number::median;
use crate::models::{Imputation, RawCustomer, StagedCustomer};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct TransformReport {
    pub staged_path: PathBuf,
    pub raw_rows: usize,
    pub rows: usize,
    pub imputation: Imputation,
    pub filled_tenure: usize,
    pub filled_monthly_charges: usize,
    pub filled_total_charges: usize,
}

pub fn read_raw(path: &Path) -> Result<Vec<RawCustomer>> {
    let file = File::open(path).map_err(|e| PipelineError::file_operation(path, e))?;
    let mut reader = csv::Reader::from_reader(file);
    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<RawCustomer>, csv::Error>>()?;
    Ok(rows)
}

pub fn read_staged(path: &Path) -> Result<Vec<StagedCustomer>> {
    let file = File::open(path).map_err(|e| PipelineError::file_operation(path, e))?;
    let mut reader = csv::Reader::from_reader(file);
    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<StagedCustomer>, csv::Error>>()?;
    Ok(rows)
}

fn write_staged(path: &Path, rows: &[StagedCustomer]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PipelineError::file_operation(parent, e))?;
    }

    // Header written up front so an empty dataset still yields a header row.
    let file = File::create(path).map_err(|e| PipelineError::file_operation(path, e))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.write_record(STAGED_COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Median of a column; fails only when values are missing and nothing can fill them.
fn column_median(column: &str, values: &[Option<f64>]) -> Result<f64> {
    match median(values.iter().flatten().copied()) {
        Some(m) => Ok(m),
        None if values.iter().all(Option::is_some) => Ok(0.0),
        None => Err(PipelineError::Validation(format!(
            "Column {} has no numeric values to impute from",
            column
        ))),
    }
}

pub fn compute_imputation(rows: &[RawCustomer]) -> Result<Imputation> {
    let tenure: Vec<Option<f64>> = rows.iter().map(|r| r.tenure).collect();
    let monthly: Vec<Option<f64>> = rows.iter().map(|r| r.monthly_charges).collect();
    let total: Vec<Option<f64>> = rows.iter().map(|r| r.total_charges).collect();

    Ok(Imputation {
        tenure: column_median("tenure", &tenure)?,
        monthly_charges: column_median("MonthlyCharges", &monthly)?,
        total_charges: column_median("TotalCharges", &total)?,
    })
}

pub fn transform_rows(rows: Vec<RawCustomer>) -> Result<(Vec<StagedCustomer>, Imputation)> {
    let imputation = compute_imputation(&rows)?;
    debug!("Imputation medians: {:?}", imputation);

    let staged = rows
        .into_iter()
        .map(|raw| StagedCustomer::from_raw(raw, &imputation))
        .collect();

    Ok((staged, imputation))
}

pub fn transform(raw_path: &Path, staged_path: &Path) -> Result<TransformReport> {
    let raw = read_raw(raw_path)?;
    let raw_rows = raw.len();
    info!("Read {} raw rows from {}", raw_rows, raw_path.display());

    let filled_tenure = raw.iter().filter(|r| r.tenure.is_none()).count();
    let filled_monthly_charges = raw.iter().filter(|r| r.monthly_charges.is_none()).count();
    let filled_total_charges = raw.iter().filter(|r| r.total_charges.is_none()).count();

    let (staged, imputation) = transform_rows(raw)?;
    write_staged(staged_path, &staged)?;

    info!(
        "Churn data is successfully transformed and saved to the path '{}'",
        staged_path.display()
    );

    Ok(TransformReport {
        staged_path: staged_path.to_path_buf(),
        raw_rows,
        rows: staged.len(),
        imputation,
        filled_tenure,
        filled_monthly_charges,
        filled_total_charges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChargeSegment, TenureBucket};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const HEADER: &str = "customerID,gender,SeniorCitizen,Partner,Dependents,tenure,PhoneService,MultipleLines,InternetService,OnlineSecurity,OnlineBackup,DeviceProtection,TechSupport,StreamingTV,StreamingMovies,Contract,PaperlessBilling,PaymentMethod,MonthlyCharges,TotalCharges,Churn";

    fn line(id: &str, tenure: &str, lines: &str, internet: &str, contract: &str, monthly: &str, total: &str, churn: &str) -> String {
        format!(
            "{id},Male,0,No,No,{tenure},Yes,{lines},{internet},No,No,No,No,No,No,{contract},Yes,Mailed check,{monthly},{total},{churn}"
        )
    }

    fn write_raw(dir: &TempDir, lines: &[String]) -> PathBuf {
        let path = dir.path().join("raw.csv");
        let mut content = String::from(HEADER);
        content.push('\n');
        for l in lines {
            content.push_str(l);
            content.push('\n');
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn sample(dir: &TempDir) -> PathBuf {
        write_raw(
            dir,
            &[
                line("0001", "1", "No phone service", "DSL", "Month-to-month", "29.85", "29.85", "No"),
                line("0002", "34", "No", "DSL", "One year", "56.95", "1889.5", "No"),
                line("0003", "2", "Yes", "Fiber optic", "Month-to-month", "70.70", "151.65", "Yes"),
                line("0004", "45", "No", "No", "Two year", "20.25", "", "No"),
                line("0005", "72", "Yes", "Fiber optic", "Two year", "104.8", " ", "No"),
                line("0006", "", "Yes", "DSL", "Biennial", "", "3046.05", "Yes"),
            ],
        )
    }

    #[test]
    fn test_transform_preserves_row_count() {
        let dir = TempDir::new().unwrap();
        let raw = sample(&dir);
        let staged_path = dir.path().join("staged/churn_transformed.csv");

        let report = transform(&raw, &staged_path).unwrap();
        let staged = read_staged(&staged_path).unwrap();

        assert_eq!(report.raw_rows, 6);
        assert_eq!(report.rows, 6);
        assert_eq!(staged.len(), read_raw(&raw).unwrap().len());
    }

    #[test]
    fn test_transform_drops_identifier_columns() {
        let dir = TempDir::new().unwrap();
        let raw = sample(&dir);
        let staged_path = dir.path().join("staged.csv");
        transform(&raw, &staged_path).unwrap();

        let mut reader = csv::Reader::from_path(&staged_path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();

        assert!(!headers.contains(&"customerID".to_string()));
        assert!(!headers.contains(&"gender".to_string()));
        assert_eq!(headers.len(), 21 - 2 + 5);
        assert_eq!(
            &headers[headers.len() - 5..],
            &[
                "tenure_group",
                "monthly_charge_segment",
                "has_internet_service",
                "is_multi_line_user",
                "contract_type_code"
            ]
        );
    }

    #[test]
    fn test_blank_total_charges_use_median_not_zero() {
        let dir = TempDir::new().unwrap();
        let raw = sample(&dir);
        let staged_path = dir.path().join("staged.csv");

        let report = transform(&raw, &staged_path).unwrap();
        let staged = read_staged(&staged_path).unwrap();

        // present totals: 29.85, 151.65, 1889.5, 3046.05
        let expected = (151.65 + 1889.5) / 2.0;
        assert_eq!(report.filled_total_charges, 2);
        assert_eq!(report.imputation.total_charges, expected);
        assert_eq!(staged[3].total_charges, expected);
        assert_eq!(staged[4].total_charges, expected);
        assert_ne!(staged[3].total_charges, 0.0);
    }

    #[test]
    fn test_missing_tenure_and_monthly_filled_before_bucketing() {
        let dir = TempDir::new().unwrap();
        let raw = sample(&dir);
        let staged_path = dir.path().join("staged.csv");

        let report = transform(&raw, &staged_path).unwrap();
        let staged = read_staged(&staged_path).unwrap();

        // tenures 1, 2, 34, 45, 72 -> 34; charges 20.25, 29.85, 56.95, 70.70, 104.8 -> 56.95
        assert_eq!(report.imputation.tenure, 34.0);
        assert_eq!(staged[5].tenure, 34.0);
        assert_eq!(staged[5].tenure_group, TenureBucket::Regular);
        assert_eq!(staged[5].monthly_charges, 56.95);
        assert_eq!(staged[5].monthly_charge_segment, ChargeSegment::Medium);
    }

    #[test]
    fn test_derived_columns() {
        let dir = TempDir::new().unwrap();
        let raw = sample(&dir);
        let staged_path = dir.path().join("staged.csv");
        transform(&raw, &staged_path).unwrap();
        let staged = read_staged(&staged_path).unwrap();

        let codes: Vec<Option<u8>> = staged.iter().map(|s| s.contract_type_code).collect();
        assert_eq!(codes, vec![Some(0), Some(1), Some(0), Some(2), Some(2), None]);

        let internet: Vec<u8> = staged.iter().map(|s| s.has_internet_service).collect();
        assert_eq!(internet, vec![1, 1, 1, 0, 1, 1]);

        let multi: Vec<u8> = staged.iter().map(|s| s.is_multi_line_user).collect();
        assert_eq!(multi, vec![0, 0, 1, 0, 1, 1]);

        for row in &staged {
            assert!(TenureBucket::ALL.contains(&row.tenure_group));
            assert!(ChargeSegment::ALL.contains(&row.monthly_charge_segment));
        }
        assert_eq!(staged[4].tenure_group, TenureBucket::Champion);
        assert_eq!(staged[4].monthly_charge_segment, ChargeSegment::High);
    }

    #[test]
    fn test_whole_tenure_written_without_fraction() {
        let dir = TempDir::new().unwrap();
        let raw = sample(&dir);
        let staged_path = dir.path().join("staged.csv");
        transform(&raw, &staged_path).unwrap();

        let content = fs::read_to_string(&staged_path).unwrap();
        let first = content.lines().nth(1).unwrap();
        assert!(first.starts_with("0,No,No,1,Yes,"), "unexpected row: {}", first);
    }

    #[test]
    fn test_all_missing_column_with_gaps_is_rejected() {
        let dir = TempDir::new().unwrap();
        let raw = write_raw(
            &dir,
            &[line("0001", "", "No", "DSL", "One year", "20.0", "20.0", "No")],
        );

        let result = transform(&raw, &dir.path().join("staged.csv"));
        assert!(matches!(result, Err(PipelineError::Validation(_))));
    }

    #[test]
    fn test_header_only_raw_file_yields_header_only_staged_file() {
        let dir = TempDir::new().unwrap();
        let raw = write_raw(&dir, &[]);
        let staged_path = dir.path().join("staged.csv");

        let report = transform(&raw, &staged_path).unwrap();

        let content = fs::read_to_string(&staged_path).unwrap();
        assert_eq!(report.rows, 0);
        assert_eq!(content.lines().count(), 1);
        assert_eq!(content.trim_end(), STAGED_COLUMNS.join(","));
        assert!(read_staged(&staged_path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_raw_file() {
        let dir = TempDir::new().unwrap();
        let result = transform(&dir.path().join("missing.csv"), &dir.path().join("staged.csv"));
        assert!(matches!(result, Err(PipelineError::FileOperation { .. })));
    }
}
