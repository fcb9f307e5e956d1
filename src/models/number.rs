// file: src/models/number.rs
// description: serde helpers and small numeric routines for csv and json fields
// reference: https://serde.rs/field-attrs.html

use serde::Serializer;

const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Writes integral floats as integers so a tenure of `12.0` lands as `12`.
pub fn serialize_whole<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Median of the present values, or `None` when there are none.
pub fn median(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }

    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;

    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
