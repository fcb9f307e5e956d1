// file: src/utils/validation.rs
// description: input validation for configuration values and cli overrides
// reference: input validation patterns

use crate::error::{PipelineError, Result};

pub struct Validator;

impl Validator {
    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PipelineError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_batch_size(size: usize) -> Result<()> {
        if size == 0 {
            return Err(PipelineError::Validation(
                "Batch size must be greater than 0".to_string(),
            ));
        }

        if size > 10000 {
            return Err(PipelineError::Validation(
                "Batch size too large (max 10000)".to_string(),
            ));
        }

        Ok(())
    }

    /// Table names end up in request paths, so only plain identifiers are allowed.
    pub fn validate_table_name(name: &str) -> Result<()> {
        let mut chars = name.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');

        if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(PipelineError::Validation(format!(
                "Invalid table name: {:?}",
                name
            )));
        }

        Ok(())
    }
}
