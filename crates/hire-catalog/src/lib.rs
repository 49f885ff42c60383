#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

//! # hire-catalog
//!
//! Request schemas of the recruiting platform.
//!
//! Every endpoint of the platform API has a schema here, grouped by domain.
//! Schemas are built once at startup from an [`EnumCatalog`] and collected
//! into a [`SchemaRegistry`]; any definition error aborts the build.
//!
//! ```
//! use hire_catalog::{builtin_registry, scheduling};
//!
//! let registry = builtin_registry().unwrap();
//! assert!(registry.contains(scheduling::CREATE_MEETING));
//! ```

mod common;

pub mod accounts;
pub mod assistant;
pub mod careers;
pub mod companies;
pub mod integrations;
pub mod jobs;
pub mod messaging;
pub mod notifications;
pub mod ratings;
pub mod scheduling;
pub mod workflows;

use hire_schema::{EnumCatalog, Result, Schema, SchemaRegistry};
use tracing::{debug, info};

type DomainSchemas = fn(&EnumCatalog) -> Result<Vec<Schema>>;

const DOMAINS: &[(&str, DomainSchemas)] = &[
    ("scheduling", scheduling::schemas),
    ("ratings", ratings::schemas),
    ("messaging", messaging::schemas),
    ("integrations", integrations::schemas),
    ("assistant", assistant::schemas),
    ("jobs", jobs::schemas),
    ("companies", companies::schemas),
    ("accounts", accounts::schemas),
    ("careers", careers::schemas),
    ("notifications", notifications::schemas),
    ("workflows", workflows::schemas),
];

/// Build every schema of the platform against `catalog`
pub fn build_registry(catalog: &EnumCatalog) -> Result<SchemaRegistry> {
    let mut registry = SchemaRegistry::new();
    for (domain, schemas) in DOMAINS {
        let schemas = schemas(catalog)?;
        debug!(domain, count = schemas.len(), "domain schemas built");
        for schema in schemas {
            registry.register(schema)?;
        }
    }
    info!(
        schemas = registry.len(),
        enums = catalog.len(),
        "schema registry ready"
    );
    Ok(registry)
}

/// Registry built against [`EnumCatalog::builtin`]
pub fn builtin_registry() -> Result<SchemaRegistry> {
    build_registry(&EnumCatalog::builtin())
}

/// Domain names in registration order
pub fn domains() -> impl Iterator<Item = &'static str> {
    DOMAINS.iter().map(|(name, _)| *name)
}
