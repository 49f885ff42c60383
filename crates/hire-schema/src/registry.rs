//! Schema registry

use crate::schema::Schema;
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Schemas by name.
///
/// Filled once at startup, then only read; share it behind an `Arc` between
/// request handlers.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Arc<Schema>>,
}

impl SchemaRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under its own name
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateSchema`] when the name is taken.
    pub fn register(&mut self, schema: Schema) -> Result<()> {
        let name = schema.name().to_string();
        if self.schemas.contains_key(&name) {
            return Err(Error::DuplicateSchema(name));
        }
        self.schemas.insert(name, Arc::new(schema));
        Ok(())
    }

    /// Get a schema by name
    pub fn get(&self, name: &str) -> Option<&Arc<Schema>> {
        self.schemas.get(name)
    }

    /// Get a schema that must exist
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown name.
    pub fn require(&self, name: &str) -> Result<&Arc<Schema>> {
        self.get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Check if a schema exists
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Schema>> {
        self.schemas.values()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{object, string};

    fn schema(name: &str) -> Schema {
        Schema::builder(name)
            .params(object().required("id", string().min_length(1)))
            .build()
            .unwrap()
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = SchemaRegistry::new();
        registry.register(schema("getJob")).unwrap();
        registry.register(schema("getCompany")).unwrap();

        assert!(registry.contains("getJob"));
        assert_eq!(registry.get("getCompany").map(|s| s.name()), Some("getCompany"));
        assert!(registry.get("getUser").is_none());
        assert_eq!(registry.names().collect::<Vec<_>>(), ["getCompany", "getJob"]);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = SchemaRegistry::new();
        registry.register(schema("getJob")).unwrap();
        let err = registry.register(schema("getJob")).unwrap_err();
        assert!(matches!(err, Error::DuplicateSchema(name) if name == "getJob"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_require_unknown_schema() {
        let registry = SchemaRegistry::new();
        assert!(registry.is_empty());
        assert!(matches!(registry.require("nope"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SchemaRegistry>();
    }
}
