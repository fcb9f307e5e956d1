// file: src/models/segment.rs
// description: categorical features derived from or matched against customer fields
// reference: internal data structures

use serde::{Deserialize, Serialize};

/// Lowercases a label and replaces spaces with underscores for metric names.
pub fn metric_key(label: &str) -> String {
    label.replace(' ', "_").to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TenureBucket {
    New,
    Regular,
    Loyal,
    Champion,
}

impl TenureBucket {
    pub const ALL: [TenureBucket; 4] = [
        TenureBucket::New,
        TenureBucket::Regular,
        TenureBucket::Loyal,
        TenureBucket::Champion,
    ];

    /// First matching range wins: 12 is `New`, and tenures strictly between 36
    /// and 37 fall through to `Champion`.
    pub fn from_tenure(tenure: f64) -> Self {
        if (0.0..=12.0).contains(&tenure) {
            TenureBucket::New
        } else if (12.0..=36.0).contains(&tenure) {
            TenureBucket::Regular
        } else if (37.0..=60.0).contains(&tenure) {
            TenureBucket::Loyal
        } else {
            TenureBucket::Champion
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TenureBucket::New => "New",
            TenureBucket::Regular => "Regular",
            TenureBucket::Loyal => "Loyal",
            TenureBucket::Champion => "Champion",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChargeSegment {
    Low,
    Medium,
    High,
}

impl ChargeSegment {
    pub const ALL: [ChargeSegment; 3] = [ChargeSegment::Low, ChargeSegment::Medium, ChargeSegment::High];

    pub fn from_monthly_charge(charge: f64) -> Self {
        if charge < 30.0 {
            ChargeSegment::Low
        } else if (30.0..=70.0).contains(&charge) {
            ChargeSegment::Medium
        } else {
            ChargeSegment::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContractType {
    MonthToMonth,
    OneYear,
    TwoYear,
}

impl ContractType {
    pub const ALL: [ContractType; 3] = [
        ContractType::MonthToMonth,
        ContractType::OneYear,
        ContractType::TwoYear,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContractType::MonthToMonth => "Month-to-month",
            ContractType::OneYear => "One year",
            ContractType::TwoYear => "Two year",
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            ContractType::MonthToMonth => 0,
            ContractType::OneYear => 1,
            ContractType::TwoYear => 2,
        }
    }

    pub fn is_valid_code(code: i64) -> bool {
        Self::ALL.iter().any(|c| i64::from(c.code()) == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InternetService {
    Dsl,
    FiberOptic,
    No,
}

impl InternetService {
    pub const ALL: [InternetService; 3] = [
        InternetService::Dsl,
        InternetService::FiberOptic,
        InternetService::No,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }

    pub fn label(&self) -> &'static str {
        match self {
            InternetService::Dsl => "DSL",
            InternetService::FiberOptic => "Fiber optic",
            InternetService::No => "No",
        }
    }

    /// 0 only for the literal "No"; any other value, blank included, counts as service.
    pub fn flag(label: &str) -> u8 {
        if label == InternetService::No.label() { 0 } else { 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChurnLabel {
    No,
    Yes,
}

impl ChurnLabel {
    pub const ALL: [ChurnLabel; 2] = [ChurnLabel::No, ChurnLabel::Yes];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Yes" => Some(ChurnLabel::Yes),
            "No" => Some(ChurnLabel::No),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChurnLabel::Yes => "Yes",
            ChurnLabel::No => "No",
        }
    }
}

pub fn multi_line_flag(multiple_lines: &str) -> u8 {
    if multiple_lines == "Yes" { 1 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenure_bucket_boundaries() {
        assert_eq!(TenureBucket::from_tenure(0.0), TenureBucket::New);
        assert_eq!(TenureBucket::from_tenure(12.0), TenureBucket::New);
        assert_eq!(TenureBucket::from_tenure(13.0), TenureBucket::Regular);
        assert_eq!(TenureBucket::from_tenure(36.0), TenureBucket::Regular);
        assert_eq!(TenureBucket::from_tenure(36.5), TenureBucket::Champion);
        assert_eq!(TenureBucket::from_tenure(37.0), TenureBucket::Loyal);
        assert_eq!(TenureBucket::from_tenure(60.0), TenureBucket::Loyal);
        assert_eq!(TenureBucket::from_tenure(61.0), TenureBucket::Champion);
        assert_eq!(TenureBucket::from_tenure(72.0), TenureBucket::Champion);
        assert_eq!(TenureBucket::from_tenure(-1.0), TenureBucket::Champion);
    }

    #[test]
    fn test_charge_segment_boundaries() {
        assert_eq!(ChargeSegment::from_monthly_charge(18.25), ChargeSegment::Low);
        assert_eq!(ChargeSegment::from_monthly_charge(29.99), ChargeSegment::Low);
        assert_eq!(ChargeSegment::from_monthly_charge(30.0), ChargeSegment::Medium);
        assert_eq!(ChargeSegment::from_monthly_charge(70.0), ChargeSegment::Medium);
        assert_eq!(ChargeSegment::from_monthly_charge(70.01), ChargeSegment::High);
    }

    #[test]
    fn test_contract_codes() {
        assert_eq!(ContractType::from_label("Month-to-month").map(|c| c.code()), Some(0));
        assert_eq!(ContractType::from_label("One year").map(|c| c.code()), Some(1));
        assert_eq!(ContractType::from_label("Two year").map(|c| c.code()), Some(2));
        assert_eq!(ContractType::from_label("Three year"), None);
        assert_eq!(ContractType::from_label("one year"), None);
        assert!(ContractType::is_valid_code(2));
        assert!(!ContractType::is_valid_code(3));
    }

    #[test]
    fn test_flags() {
        assert_eq!(InternetService::flag("No"), 0);
        assert_eq!(InternetService::flag("DSL"), 1);
        assert_eq!(InternetService::flag(""), 1);
        assert_eq!(multi_line_flag("Yes"), 1);
        assert_eq!(multi_line_flag("No phone service"), 0);
    }

    #[test]
    fn test_metric_key() {
        assert_eq!(metric_key("Fiber optic"), "fiber_optic");
        assert_eq!(metric_key("Month-to-month"), "month-to-month");
    }
}
