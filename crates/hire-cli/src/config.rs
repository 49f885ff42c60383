//! CLI configuration file
//!
//! ```yaml
//! strictness: strict
//! collect_all: true
//! max_violations: 20
//! enum_catalog: /etc/hire/enums.yaml
//! log_filter: hire=debug
//! ```
//!
//! Every key is optional. Command-line flags win over the file.

use anyhow::Context;
use hire_validation::ValidationConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    #[serde(flatten)]
    pub validation: ValidationConfig,

    /// Enumeration file laid over the builtin catalog
    pub enum_catalog: Option<PathBuf>,

    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            validation: ValidationConfig::default(),
            enum_catalog: None,
            log_filter: "warn".to_string(),
        }
    }
}

impl CliConfig {
    /// Read a config file; `.json` parses as JSON, anything else as YAML.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(config)
    }
}
