//! # hire-cli
//!
//! Command-line front end of the recruiting request validator.
//!
//! Validates request payload files against the platform schemas, lists the
//! registered schemas and checks that the registry builds against a given
//! enumeration catalog.

mod config;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use config::CliConfig;
use hire_payload::RequestPayload;
use hire_schema::{EnumCatalog, EnumCatalogLoader, SchemaRegistry};
use hire_validation::{StrictnessLevel, ValidationEngine, ValidationReporter, ValidationResult};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit code of a rejected payload
const REJECTED: u8 = 2;

#[derive(Parser)]
#[command(name = "hire")]
#[command(about = "Recruiting platform request validator")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enumeration catalog laid over the builtin one
    #[arg(short, long, global = true)]
    enums: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    /// Validate a request payload file against a schema
    Validate {
        /// Payload file: `{"body": …, "params": …, "query": …}`
        input: PathBuf,

        /// Schema name (e.g., createMeeting, listRatings)
        #[arg(short, long)]
        schema: String,

        /// Clock for temporal rules, RFC 3339 (defaults to now)
        #[arg(long)]
        at: Option<DateTime<Utc>>,

        /// Handling of undeclared keys
        #[arg(long, value_enum)]
        strictness: Option<Strictness>,

        /// Report only the first failing constraint per field
        #[arg(long)]
        first_only: bool,

        /// Output format of a rejection
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// List registered schemas and the sections they declare
    Schemas,

    /// Build the registry and report what it holds
    Check,
}

#[derive(Clone, Copy, ValueEnum)]
enum Strictness {
    Strict,
    Moderate,
    Lenient,
}

impl From<Strictness> for StrictnessLevel {
    fn from(s: Strictness) -> Self {
        match s {
            Strictness::Strict => StrictnessLevel::Strict,
            Strictness::Moderate => StrictnessLevel::Moderate,
            Strictness::Lenient => StrictnessLevel::Lenient,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let catalog_path = cli.enums.as_deref().or(config.enum_catalog.as_deref());
    let catalog = load_catalog(catalog_path)?;
    let registry = hire_catalog::build_registry(&catalog)?;

    match cli.command {
        Commands::Validate {
            input,
            schema,
            at,
            strictness,
            first_only,
            format,
        } => {
            tracing::info!("Validating {} against {}", input.display(), schema);
            let mut validation = config.validation.clone();
            if let Some(s) = strictness {
                validation.strictness = s.into();
            }
            if first_only {
                validation.collect_all = false;
            }
            let engine = ValidationEngine::with_config(validation);
            validate(&engine, &registry, &input, &schema, at, format)
        }
        Commands::Schemas => {
            for schema in registry.iter() {
                let sections: Vec<_> = schema
                    .sections()
                    .iter()
                    .map(|s| s.section.as_str())
                    .collect();
                println!("{}\t{}", schema.name(), sections.join(","));
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check => {
            println!(
                "OK: {} schemas built against {} enumerations",
                registry.len(),
                catalog.len()
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<EnumCatalog> {
    match path {
        Some(path) => {
            tracing::info!("Loading enumerations from {}", path.display());
            EnumCatalogLoader::new()
                .load_file(path)
                .with_context(|| format!("loading enumerations from {}", path.display()))
        }
        None => Ok(EnumCatalog::builtin()),
    }
}

fn validate(
    engine: &ValidationEngine,
    registry: &SchemaRegistry,
    input: &Path,
    name: &str,
    at: Option<DateTime<Utc>>,
    format: Format,
) -> anyhow::Result<ExitCode> {
    let schema = registry
        .get(name)
        .ok_or_else(|| hire_validation::Error::UnknownSchema(name.to_string()))?;
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("reading payload {}", input.display()))?;
    let payload = RequestPayload::from_json(&content)?;

    match engine.validate_at(schema, &payload, at.unwrap_or_else(Utc::now)) {
        ValidationResult::Accepted(normalised) => {
            println!("{}", serde_json::to_string_pretty(&normalised)?);
            Ok(ExitCode::SUCCESS)
        }
        ValidationResult::Rejected(violations) => {
            let reporter = ValidationReporter::new();
            match format {
                Format::Json => println!("{}", reporter.to_json(&violations)?),
                Format::Text => print!("{}", reporter.to_text(&violations)),
            }
            Ok(ExitCode::from(REJECTED))
        }
    }
}
