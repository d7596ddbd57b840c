use crate::utils::error::{Result, RosterError};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(RosterError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// A source is either an http(s) endpoint or a local .csv/.json file.
pub fn validate_source_location(field_name: &str, source: &str) -> Result<()> {
    if source.trim().is_empty() {
        return Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: source.to_string(),
            reason: "Source cannot be empty".to_string(),
        });
    }

    if source.starts_with("http://") || source.starts_with("https://") {
        return validate_url(field_name, source);
    }

    match std::path::Path::new(source)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some("csv") | Some("json") => Ok(()),
        Some(extension) => Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: source.to_string(),
            reason: format!(
                "Unsupported source extension: {}. Expected csv or json",
                extension
            ),
        }),
        None => Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: source.to_string(),
            reason: "Source has no file extension and is not an http(s) URL".to_string(),
        }),
    }
}

pub fn validate_output_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "At least one output format is required".to_string(),
        });
    }

    let allowed: HashSet<&str> = ["csv", "tsv", "json"].into_iter().collect();
    for format in formats {
        if !allowed.contains(format.as_str()) {
            return Err(RosterError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: "Unsupported output format. Allowed formats: csv, tsv, json".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
