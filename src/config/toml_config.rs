use crate::domain::model::{NameFields, NameOrder};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, RosterError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub transform: TransformConfig,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub location: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractConfig {
    pub max_records: Option<usize>,
    pub full_name_field: Option<String>,
    pub first_name_field: Option<String>,
    pub last_name_field: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformConfig {
    pub family_first: Option<bool>,
    pub titlecase: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RosterError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RosterError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` placeholders with environment values before
    /// the document is parsed. An unset variable is a configuration error.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let pattern = regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| {
            RosterError::ConfigValidationError {
                field: "env_substitution".to_string(),
                message: format!("Invalid substitution pattern: {}", e),
            }
        })?;

        let mut missing: Option<String> = None;
        let substituted = pattern.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    missing.get_or_insert_with(|| var_name.to_string());
                    String::new()
                }
            }
        });

        if let Some(var_name) = missing {
            return Err(RosterError::MissingConfigError {
                field: format!("environment variable {}", var_name),
            });
        }

        Ok(substituted.into_owned())
    }
}

impl ConfigProvider for TomlConfig {
    fn source(&self) -> &str {
        &self.source.location
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn name_order(&self) -> NameOrder {
        if self.transform.family_first.unwrap_or(false) {
            NameOrder::FamilyFirst
        } else {
            NameOrder::GivenFirst
        }
    }

    fn titlecase(&self) -> bool {
        self.transform.titlecase.unwrap_or(true)
    }

    fn max_records(&self) -> Option<usize> {
        self.extract.max_records
    }

    fn name_fields(&self) -> NameFields {
        NameFields {
            full_name: self.extract.full_name_field.clone(),
            first_name: self.extract.first_name_field.clone(),
            last_name: self.extract.last_name_field.clone(),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        validation::validate_source_location("source.location", &self.source.location)?;
        validation::validate_output_path("load.output_path", &self.load.output_path)?;
        validation::validate_output_formats("load.output_formats", &self.load.output_formats)?;
        Ok(())
    }
}
