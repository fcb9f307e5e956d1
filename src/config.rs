// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use crate::utils::validation::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const STORE_URL_VAR: &str = "SUPABASE_URL";
pub const STORE_KEY_VAR: &str = "SUPABASE_KEY";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub paths: PathsConfig,
    pub store: StoreConfig,
}

/// Locations of the file artifacts produced by each stage.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    pub source_csv: PathBuf,
    pub raw_csv: PathBuf,
    pub staged_csv: PathBuf,
    pub summary_csv: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    pub table_name: String,
    pub batch_size: usize,
    pub page_size: usize,
    pub timeout_secs: u64,
}

/// Secrets for the hosted table store. Never part of the TOML file.
#[derive(Clone)]
pub struct StoreCredentials {
    pub url: String,
    pub key: String,
}

impl std::fmt::Debug for StoreCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreCredentials")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl StoreCredentials {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let (Some(url), Some(key)) = (read(STORE_URL_VAR), read(STORE_KEY_VAR)) else {
            return Err(PipelineError::Config(format!(
                "Missing {} or {} in the environment or .env",
                STORE_URL_VAR, STORE_KEY_VAR
            )));
        };

        Validator::validate_url(&url)
            .map_err(|e| PipelineError::Config(format!("{}: {}", STORE_URL_VAR, e)))?;

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            key,
        })
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("CHURN_ETL")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            paths: PathsConfig {
                source_csv: PathBuf::from("datasets/WA_Fn-UseC_-Telco-Customer-Churn.csv"),
                raw_csv: PathBuf::from("data/raw/churn_raw.csv"),
                staged_csv: PathBuf::from("data/staged/churn_transformed.csv"),
                summary_csv: PathBuf::from("data/processed/analysis_summary.csv"),
            },
            store: StoreConfig {
                table_name: "customer_churn".to_string(),
                batch_size: 200,
                page_size: 1000,
                timeout_secs: 30,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        Validator::validate_batch_size(self.store.batch_size)
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        if self.store.page_size == 0 {
            return Err(PipelineError::Config(
                "page_size must be greater than 0".to_string(),
            ));
        }

        Validator::validate_table_name(&self.store.table_name)
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.store.batch_size, 200);
        assert_eq!(config.store.table_name, "customer_churn");
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        std::fs::write(
            &path,
            r#"
[paths]
source_csv = "in.csv"
raw_csv = "out/raw.csv"
staged_csv = "out/staged.csv"
summary_csv = "out/summary.csv"

[store]
table_name = "churn_test"
batch_size = 50
page_size = 500
timeout_secs = 5
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.store.table_name, "churn_test");
        assert_eq!(config.store.batch_size, 50);
        assert_eq!(config.paths.staged_csv, PathBuf::from("out/staged.csv"));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let mut config = Config::default_config();
        config.store.batch_size = 0;
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_bad_table_name_rejected() {
        let mut config = Config::default_config();
        config.store.table_name = "churn;drop".to_string();
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_credentials_present() {
        let creds = StoreCredentials::from_lookup(lookup_from(&[
            (STORE_URL_VAR, "https://abc.supabase.co/"),
            (STORE_KEY_VAR, "secret"),
        ]))
        .unwrap();

        assert_eq!(creds.url, "https://abc.supabase.co");
        assert_eq!(creds.key, "secret");
        assert!(!format!("{:?}", creds).contains("secret"));
    }

    #[test]
    fn test_credentials_missing_key_is_config_error() {
        let result =
            StoreCredentials::from_lookup(lookup_from(&[(STORE_URL_VAR, "https://abc.supabase.co")]));
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_credentials_blank_url_is_config_error() {
        let result = StoreCredentials::from_lookup(lookup_from(&[
            (STORE_URL_VAR, "   "),
            (STORE_KEY_VAR, "secret"),
        ]));
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_credentials_bad_url_scheme() {
        let result = StoreCredentials::from_lookup(lookup_from(&[
            (STORE_URL_VAR, "abc.supabase.co"),
            (STORE_KEY_VAR, "secret"),
        ]));
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }
}
