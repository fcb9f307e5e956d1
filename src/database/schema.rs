// file: src/database/schema.rs
// description: column naming contract between the staged artifact and the remote table
// reference: internal data structures

use crate::models::Row;

/// Header of the staged artifact, in field order of `StagedCustomer`.
pub const STAGED_COLUMNS: [&str; 24] = [
    "SeniorCitizen",
    "Partner",
    "Dependents",
    "tenure",
    "PhoneService",
    "MultipleLines",
    "InternetService",
    "OnlineSecurity",
    "OnlineBackup",
    "DeviceProtection",
    "TechSupport",
    "StreamingTV",
    "StreamingMovies",
    "Contract",
    "PaperlessBilling",
    "PaymentMethod",
    "MonthlyCharges",
    "TotalCharges",
    "Churn",
    "tenure_group",
    "monthly_charge_segment",
    "has_internet_service",
    "is_multi_line_user",
    "contract_type_code",
];

/// Staged column name to remote column name, for columns whose name changes.
pub const COLUMN_RENAMES: [(&str, &str); 6] = [
    ("MonthlyCharges", "monthlycharges"),
    ("TotalCharges", "totalcharges"),
    ("Churn", "churn"),
    ("InternetService", "internetservice"),
    ("Contract", "contract"),
    ("PaymentMethod", "paymentmethod"),
];

/// Columns written to the remote table, in insert order.
pub const STORED_COLUMNS: [&str; 12] = [
    "tenure",
    "monthlycharges",
    "totalcharges",
    "churn",
    "internetservice",
    "contract",
    "paymentmethod",
    "tenure_group",
    "monthly_charge_segment",
    "has_internet_service",
    "is_multi_line_user",
    "contract_type_code",
];

/// Numeric columns checked for missing values after loading.
pub const KEY_NUMERIC_COLUMNS: [&str; 3] = ["tenure", "monthlycharges", "totalcharges"];

/// Store-assigned columns that do not come from the staged artifact.
pub const GENERATED_COLUMNS: [&str; 2] = ["id", "created_at"];

pub fn has_column(rows: &[Row], column: &str) -> bool {
    rows.iter().any(|row| row.contains_key(column))
}

/// Expected stored columns that appear in none of the rows.
pub fn missing_columns(rows: &[Row]) -> Vec<&'static str> {
    STORED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !has_column(rows, column))
        .collect()
}
