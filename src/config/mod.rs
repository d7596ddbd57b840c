pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::{NameFields, NameOrder};
#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "name-roster")]
#[command(about = "A small ETL tool for person-name records")]
pub struct CliConfig {
    /// File (.csv/.json) or http(s) endpoint holding person records
    #[arg(long, default_value = "people.csv")]
    pub source: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "csv,json")]
    pub output_formats: Vec<String>,

    /// Treat space-separated full names as family-name-first
    #[arg(long)]
    pub family_first: bool,

    /// Keep whatever casing the source has
    #[arg(long)]
    pub no_titlecase: bool,

    #[arg(long)]
    pub max_records: Option<usize>,

    /// Source key holding a full name
    #[arg(long)]
    pub full_name_field: Option<String>,

    /// Source key holding the first name (use with --last-name-field)
    #[arg(long)]
    pub first_name_field: Option<String>,

    #[arg(long)]
    pub last_name_field: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn source(&self) -> &str {
        &self.source
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }

    fn name_order(&self) -> NameOrder {
        if self.family_first {
            NameOrder::FamilyFirst
        } else {
            NameOrder::GivenFirst
        }
    }

    fn titlecase(&self) -> bool {
        !self.no_titlecase
    }

    fn max_records(&self) -> Option<usize> {
        self.max_records
    }

    fn name_fields(&self) -> NameFields {
        NameFields {
            full_name: self.full_name_field.clone(),
            first_name: self.first_name_field.clone(),
            last_name: self.last_name_field.clone(),
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_source_location("source", &self.source)?;
        validation::validate_output_path("output_path", &self.output_path)?;
        validation::validate_output_formats("output_formats", &self.output_formats)?;
        Ok(())
    }
}
