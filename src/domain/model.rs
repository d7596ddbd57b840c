use crate::domain::ports::FullName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A pair of required name fields. The record itself carries no validation;
/// text cleanup happens in the pipeline before construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamePair {
    pub first_name: String,
    pub last_name: String,
}

impl NamePair {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        let first_name = first_name.into();
        let last_name = last_name.into();
        Self {
            first_name,
            last_name,
        }
    }

    /// Roster ordering key: family name first, case-insensitive.
    pub fn sort_key(&self) -> String {
        format!(
            "{}, {}",
            self.last_name.to_lowercase(),
            self.first_name.to_lowercase()
        )
    }

    pub fn initials(&self) -> String {
        [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|part| part.chars().next())
            .map(|c| format!("{}.", c.to_uppercase()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for NamePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

impl FullName for NamePair {
    fn first_name(&self) -> &str {
        &self.first_name
    }

    fn last_name(&self) -> &str {
        &self.last_name
    }
}

/// A person record the way sources tend to deliver it. The field aliases
/// accept both snake_case and camelCase payloads. Anything beyond the name
/// shape is optional and dropped when converting to a `NamePair`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(alias = "firstName", alias = "given_name")]
    pub first_name: String,
    #[serde(alias = "lastName", alias = "family_name", alias = "surname")]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl FullName for Person {
    fn first_name(&self) -> &str {
        &self.first_name
    }

    fn last_name(&self) -> &str {
        &self.last_name
    }
}

impl From<Person> for NamePair {
    fn from(person: Person) -> Self {
        Self {
            first_name: person.first_name,
            last_name: person.last_name,
        }
    }
}

/// Controls how space-separated full names are split and formatted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameOrder {
    #[default]
    GivenFirst,
    FamilyFirst,
}

/// Optional overrides for the source keys the transform probes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NameFields {
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// One record as extracted from a source, before any name resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    pub fields: HashMap<String, serde_json::Value>,
}

impl RawRecord {
    pub fn new(fields: HashMap<String, serde_json::Value>) -> Self {
        Self { fields }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|value| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct RosterResult {
    pub roster: Vec<NamePair>,
    pub rejected: Vec<RawRecord>,
    pub csv_output: String,
    pub tsv_output: String,
}

/// Envelope for the JSON output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterReport {
    pub generated_at: DateTime<Utc>,
    pub count: usize,
    pub roster: Vec<NamePair>,
}
