use crate::core::names;
use crate::domain::model::{NameOrder, NamePair, Person, RawRecord, RosterReport, RosterResult};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::{Result, RosterError};
use chrono::Utc;
use reqwest::Client;
use std::collections::HashMap;

pub struct RosterPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> RosterPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    async fn extract_api(&self, endpoint: &str) -> Result<Vec<RawRecord>> {
        tracing::debug!("Making API request to: {}", endpoint);
        let response = self.client.get(endpoint).send().await?.error_for_status()?;

        tracing::debug!("API response status: {}", response.status());
        let body: serde_json::Value = response.json().await?;
        Ok(records_from_value(body))
    }

    async fn extract_csv(&self, path: &str) -> Result<Vec<RawRecord>> {
        let bytes = self.storage.read_file(path).await?;
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let headers = reader.headers()?.clone();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let mut fields = HashMap::new();
            for (header, cell) in headers.iter().zip(row.iter()) {
                fields.insert(
                    header.to_string(),
                    serde_json::Value::String(cell.to_string()),
                );
            }
            records.push(RawRecord::new(fields));
        }
        Ok(records)
    }

    async fn extract_json(&self, path: &str) -> Result<Vec<RawRecord>> {
        let bytes = self.storage.read_file(path).await?;
        let body: serde_json::Value = serde_json::from_slice(&bytes)?;
        Ok(records_from_value(body))
    }

    /// Resolve a record into a name pair: explicit field overrides first,
    /// then a typed decode of records that already carry the pair shape,
    /// then the well-known full-name keys.
    fn resolve_name(&self, record: &RawRecord) -> Option<NamePair> {
        let fields = self.config.name_fields();
        let order = self.config.name_order();

        if let (Some(first_key), Some(last_key)) = (&fields.first_name, &fields.last_name) {
            if let (Some(first), Some(last)) = (record.text(first_key), record.text(last_key)) {
                let first = names::tidy(first);
                let last = names::tidy(last);
                if !first.is_empty() && !last.is_empty() {
                    return Some(NamePair::new(first, last));
                }
            }
        }

        if let Some(full_key) = &fields.full_name {
            if let Some(text) = record.text(full_key) {
                if let Ok(pair) = names::parse_full_name(text, order) {
                    return Some(pair);
                }
            }
        }

        let value = serde_json::Value::Object(record.fields.clone().into_iter().collect());
        if let Ok(person) = serde_json::from_value::<Person>(value) {
            let first = names::tidy(&person.first_name);
            let last = names::tidy(&person.last_name);
            if !first.is_empty() && !last.is_empty() {
                return Some(NamePair::from(Person {
                    first_name: first,
                    last_name: last,
                    email: person.email,
                }));
            }
        }

        for key in ["name", "full_name", "fullName"] {
            if let Some(text) = record.text(key) {
                if let Ok(pair) = names::parse_full_name(text, order) {
                    return Some(pair);
                }
            }
        }

        None
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for RosterPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawRecord>> {
        let source = self.config.source();
        let mut records = if source.starts_with("http://") || source.starts_with("https://") {
            self.extract_api(source).await?
        } else if source.ends_with(".csv") {
            self.extract_csv(source).await?
        } else if source.ends_with(".json") {
            self.extract_json(source).await?
        } else {
            return Err(RosterError::ProcessingError {
                message: format!("Unsupported source: {}", source),
            });
        };

        if let Some(max) = self.config.max_records() {
            if records.len() > max {
                tracing::debug!(
                    "Truncating {} records to max_records = {}",
                    records.len(),
                    max
                );
                records.truncate(max);
            }
        }

        if records.is_empty() {
            tracing::warn!("Source produced no records");
        }

        Ok(records)
    }

    async fn transform(&self, data: Vec<RawRecord>) -> Result<RosterResult> {
        let mut roster = Vec::new();
        let mut rejected = Vec::new();

        for record in data {
            match self.resolve_name(&record) {
                Some(mut pair) => {
                    if self.config.titlecase() {
                        pair.first_name = names::title_case(&pair.first_name);
                        pair.last_name = names::title_case(&pair.last_name);
                    }
                    roster.push(pair);
                }
                None => {
                    tracing::warn!("No usable name in record, moving it to the rejected bucket");
                    rejected.push(record);
                }
            }
        }

        roster.sort_by_key(|pair| pair.sort_key());

        let csv_output = render_table(&roster, b',')?;
        let tsv_output = render_table(&roster, b'\t')?;

        Ok(RosterResult {
            roster,
            rejected,
            csv_output,
            tsv_output,
        })
    }

    async fn load(&self, result: RosterResult) -> Result<String> {
        let output_path = self.config.output_path();

        for format in self.config.output_formats() {
            let (filename, payload) = match format.as_str() {
                "csv" => ("roster.csv", result.csv_output.clone().into_bytes()),
                "tsv" => ("roster.tsv", result.tsv_output.clone().into_bytes()),
                "json" => {
                    let report = RosterReport {
                        generated_at: Utc::now(),
                        count: result.roster.len(),
                        roster: result.roster.clone(),
                    };
                    ("roster.json", serde_json::to_vec_pretty(&report)?)
                }
                other => {
                    tracing::warn!("Skipping unknown output format: {}", other);
                    continue;
                }
            };

            let target = format!("{}/{}", output_path, filename);
            tracing::debug!("Writing {} bytes to {}", payload.len(), target);
            self.storage.write_file(&target, &payload).await?;
        }

        if !result.rejected.is_empty() {
            let target = format!("{}/rejected.json", output_path);
            let payload = serde_json::to_vec_pretty(&result.rejected)?;
            tracing::debug!(
                "Writing {} rejected records to {}",
                result.rejected.len(),
                target
            );
            self.storage.write_file(&target, &payload).await?;
        }

        Ok(output_path.to_string())
    }
}

fn records_from_value(body: serde_json::Value) -> Vec<RawRecord> {
    match body {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::Object(obj) => Some(RawRecord::new(obj.into_iter().collect())),
                other => {
                    tracing::warn!("Skipping non-object record: {}", other);
                    None
                }
            })
            .collect(),
        serde_json::Value::Object(obj) => vec![RawRecord::new(obj.into_iter().collect())],
        other => {
            tracing::warn!("Source body is neither an object nor an array: {}", other);
            Vec::new()
        }
    }
}

fn render_table(roster: &[NamePair], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(["first_name", "last_name", "full_name"])?;
    for pair in roster {
        let full = names::format_ordered(pair, NameOrder::GivenFirst);
        writer.write_record([
            pair.first_name.as_str(),
            pair.last_name.as_str(),
            full.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| RosterError::ProcessingError {
            message: format!("Could not finish table output: {}", e),
        })?;
    String::from_utf8(bytes).map_err(|e| RosterError::ProcessingError {
        message: format!("Table output is not valid UTF-8: {}", e),
    })
}
