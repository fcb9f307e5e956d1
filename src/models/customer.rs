// file: src/models/customer.rs
// description: raw and staged customer records as read from and written to csv artifacts
// reference: https://docs.rs/csv

use crate::models::number::serialize_whole;
use crate::models::segment::{
    multi_line_flag, ChargeSegment, ContractType, InternetService, TenureBucket,
};
use serde::{Deserialize, Serialize};

/// One row of the source dataset, as delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCustomer {
    #[serde(rename = "customerID")]
    pub customer_id: String,
    #[serde(rename = "gender")]
    pub gender: String,
    #[serde(rename = "SeniorCitizen")]
    pub senior_citizen: String,
    #[serde(rename = "Partner")]
    pub partner: String,
    #[serde(rename = "Dependents")]
    pub dependents: String,
    #[serde(rename = "tenure")]
    pub tenure: Option<f64>,
    #[serde(rename = "PhoneService")]
    pub phone_service: String,
    #[serde(rename = "MultipleLines")]
    pub multiple_lines: String,
    #[serde(rename = "InternetService")]
    pub internet_service: String,
    #[serde(rename = "OnlineSecurity")]
    pub online_security: String,
    #[serde(rename = "OnlineBackup")]
    pub online_backup: String,
    #[serde(rename = "DeviceProtection")]
    pub device_protection: String,
    #[serde(rename = "TechSupport")]
    pub tech_support: String,
    #[serde(rename = "StreamingTV")]
    pub streaming_tv: String,
    #[serde(rename = "StreamingMovies")]
    pub streaming_movies: String,
    #[serde(rename = "Contract")]
    pub contract: String,
    #[serde(rename = "PaperlessBilling")]
    pub paperless_billing: String,
    #[serde(rename = "PaymentMethod")]
    pub payment_method: String,
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: Option<f64>,
    /// Text in the source; blanks and other non-numeric values read as missing.
    #[serde(rename = "TotalCharges", deserialize_with = "csv::invalid_option")]
    pub total_charges: Option<f64>,
    #[serde(rename = "Churn")]
    pub churn: String,
}

/// Column medians used to fill missing numeric values before derivation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Imputation {
    pub tenure: f64,
    pub monthly_charges: f64,
    pub total_charges: f64,
}

/// A transformed row: identifiers removed, numerics filled, five derived columns added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagedCustomer {
    #[serde(rename = "SeniorCitizen")]
    pub senior_citizen: String,
    #[serde(rename = "Partner")]
    pub partner: String,
    #[serde(rename = "Dependents")]
    pub dependents: String,
    #[serde(rename = "tenure", serialize_with = "serialize_whole")]
    pub tenure: f64,
    #[serde(rename = "PhoneService")]
    pub phone_service: String,
    #[serde(rename = "MultipleLines")]
    pub multiple_lines: String,
    #[serde(rename = "InternetService")]
    pub internet_service: String,
    #[serde(rename = "OnlineSecurity")]
    pub online_security: String,
    #[serde(rename = "OnlineBackup")]
    pub online_backup: String,
    #[serde(rename = "DeviceProtection")]
    pub device_protection: String,
    #[serde(rename = "TechSupport")]
    pub tech_support: String,
    #[serde(rename = "StreamingTV")]
    pub streaming_tv: String,
    #[serde(rename = "StreamingMovies")]
    pub streaming_movies: String,
    #[serde(rename = "Contract")]
    pub contract: String,
    #[serde(rename = "PaperlessBilling")]
    pub paperless_billing: String,
    #[serde(rename = "PaymentMethod")]
    pub payment_method: String,
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: f64,
    #[serde(rename = "TotalCharges")]
    pub total_charges: f64,
    #[serde(rename = "Churn")]
    pub churn: String,
    pub tenure_group: TenureBucket,
    pub monthly_charge_segment: ChargeSegment,
    pub has_internet_service: u8,
    pub is_multi_line_user: u8,
    pub contract_type_code: Option<u8>,
}

impl StagedCustomer {
    pub fn from_raw(raw: RawCustomer, fill: &Imputation) -> Self {
        let tenure = raw.tenure.unwrap_or(fill.tenure);
        let monthly_charges = raw.monthly_charges.unwrap_or(fill.monthly_charges);
        let total_charges = raw.total_charges.unwrap_or(fill.total_charges);

        let has_internet_service = InternetService::flag(&raw.internet_service);
        let is_multi_line_user = multi_line_flag(&raw.multiple_lines);
        let contract_type_code = ContractType::from_label(&raw.contract).map(|c| c.code());

        Self {
            senior_citizen: raw.senior_citizen,
            partner: raw.partner,
            dependents: raw.dependents,
            tenure,
            phone_service: raw.phone_service,
            multiple_lines: raw.multiple_lines,
            internet_service: raw.internet_service,
            online_security: raw.online_security,
            online_backup: raw.online_backup,
            device_protection: raw.device_protection,
            tech_support: raw.tech_support,
            streaming_tv: raw.streaming_tv,
            streaming_movies: raw.streaming_movies,
            contract: raw.contract,
            paperless_billing: raw.paperless_billing,
            payment_method: raw.payment_method,
            monthly_charges,
            total_charges,
            churn: raw.churn,
            tenure_group: TenureBucket::from_tenure(tenure),
            monthly_charge_segment: ChargeSegment::from_monthly_charge(monthly_charges),
            has_internet_service,
            is_multi_line_user,
            contract_type_code,
        }
    }
}
