//! Enumeration catalog loader
//!
//! Deployments regenerate their persistence enumerations independently of
//! this code. The loader reads those token sets from a JSON or YAML file and
//! lays them over the builtin catalog before any schema is built:
//!
//! ```yaml
//! enums:
//!   MeetingType: [INTERVIEW, VIDEO, PHONE, IN_PERSON]
//!   WorkType: [REMOTE, HYBRID, ON_SITE]
//! ```

use crate::enums::{EnumCatalog, EnumSet};
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, trace};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    enums: BTreeMap<String, Vec<String>>,
}

/// Loads enumeration sets from files
pub struct EnumCatalogLoader {
    base: EnumCatalog,
}

impl EnumCatalogLoader {
    /// Loader whose files overlay the builtin catalog
    pub fn new() -> Self {
        Self {
            base: EnumCatalog::builtin(),
        }
    }

    /// Loader whose files overlay `base`
    pub fn with_base(base: EnumCatalog) -> Self {
        Self { base }
    }

    /// Read a catalog file; `.yaml`/`.yml` parse as YAML, anything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read, does not parse, or
    /// declares a set with no tokens.
    pub fn load_file(&self, path: &Path) -> Result<EnumCatalog> {
        trace!("Loading enum catalog from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;

        if path
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml")
        {
            self.load_yaml(&content)
        } else {
            self.load_json(&content)
        }
    }

    /// Parse a JSON catalog
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] on malformed input.
    pub fn load_json(&self, json: &str) -> Result<EnumCatalog> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| Error::InvalidFormat(format!("JSON parse error: {e}")))?;
        self.convert(file)
    }

    /// Parse a YAML catalog
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] on malformed input.
    pub fn load_yaml(&self, yaml: &str) -> Result<EnumCatalog> {
        let file: CatalogFile = serde_yaml::from_str(yaml)
            .map_err(|e| Error::InvalidFormat(format!("YAML parse error: {e}")))?;
        self.convert(file)
    }

    fn convert(&self, file: CatalogFile) -> Result<EnumCatalog> {
        let mut loaded = EnumCatalog::new();
        for (name, tokens) in file.enums {
            if tokens.is_empty() {
                return Err(Error::InvalidEnum {
                    location: format!("catalog/{name}"),
                    reason: "enumeration has no tokens".to_string(),
                });
            }
            debug!("Loaded enumeration {} ({} tokens)", name, tokens.len());
            loaded.insert(EnumSet::new(name, tokens));
        }

        let count = loaded.len();
        let mut catalog = self.base.clone();
        catalog.overlay(loaded);
        info!("Enum catalog ready: {} loaded, {} total", count, catalog.len());
        Ok(catalog)
    }
}

impl Default for EnumCatalogLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_yaml_overlays_builtin() {
        let yaml = "enums:\n  WorkType: [REMOTE, OFFICE]\n";
        let catalog = EnumCatalogLoader::new().load_yaml(yaml).unwrap();

        let work = catalog.require("WorkType").unwrap();
        assert_eq!(work.tokens(), ["REMOTE", "OFFICE"]);
        assert!(catalog.get("MeetingType").is_some());
    }

    #[test]
    fn test_load_json_with_empty_base() {
        let json = r#"{"enums": {"AITone": ["WARM", "NEUTRAL"]}}"#;
        let catalog = EnumCatalogLoader::with_base(EnumCatalog::new())
            .load_json(json)
            .unwrap();

        assert_eq!(catalog.names(), ["AITone"]);
    }

    #[test]
    fn test_empty_enumeration_rejected() {
        let json = r#"{"enums": {"AITone": []}}"#;
        let err = EnumCatalogLoader::new().load_json(json).unwrap_err();
        assert!(matches!(err, Error::InvalidEnum { .. }));
    }

    #[test]
    fn test_malformed_input_rejected() {
        let loader = EnumCatalogLoader::new();
        assert!(matches!(
            loader.load_json("{\"enums\": 3}"),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            loader.load_yaml("catalog:\n  - nope\n"),
            Err(Error::InvalidFormat(_))
        ));
    }
}
