use anyhow::Result;
use name_roster::config::toml_config::TomlConfig;
use name_roster::utils::validation::Validate;
use name_roster::{LocalStorage, RosterEngine, RosterPipeline};
use tempfile::TempDir;

#[tokio::test]
async fn test_toml_driven_roster_build() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let temp_path = temp_dir.path().to_str().unwrap();
    let normalized_path = temp_path.replace('\\', "/");

    let input_path = format!("{}/people.json", normalized_path);
    tokio::fs::write(
        &input_path,
        serde_json::to_vec(&serde_json::json!([
            {"name": "donna noble"},
            {"first_name": "wilfred", "last_name": "mott"}
        ]))?,
    )
    .await?;

    let config_content = format!(
        r#"
[pipeline]
name = "toml-roster-test"
description = "TOML-driven test"
version = "1.0.0"

[source]
location = "{input}"

[extract]
max_records = 10

[load]
output_path = "{out}/output"
output_formats = ["csv", "json"]
"#,
        input = input_path,
        out = normalized_path
    );

    let config_path = format!("{}/roster-config.toml", temp_path);
    tokio::fs::write(&config_path, config_content).await?;

    let config = TomlConfig::from_file(&config_path)?;
    config.validate()?;

    let storage = LocalStorage::new(".");
    let pipeline = RosterPipeline::new(storage, config);
    let engine = RosterEngine::new(pipeline);

    let output_path = engine.run().await?;
    assert!(output_path.ends_with("/output"));

    let csv_content =
        std::fs::read_to_string(format!("{}/output/roster.csv", normalized_path))?;
    assert!(csv_content.contains("Wilfred,Mott,Wilfred Mott"));
    assert!(csv_content.contains("Donna,Noble,Donna Noble"));

    // Every record resolved, so no rejected bucket is written.
    assert!(!std::path::Path::new(&format!("{}/output/rejected.json", normalized_path)).exists());

    Ok(())
}

#[tokio::test]
async fn test_toml_config_resolves_environment_variables() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let temp_path = temp_dir.path().to_str().unwrap();
    let normalized_path = temp_path.replace('\\', "/");

    let input_path = format!("{}/people.json", normalized_path);
    tokio::fs::write(
        &input_path,
        serde_json::to_vec(&serde_json::json!([{"name": "martha jones"}]))?,
    )
    .await?;

    std::env::set_var("ROSTER_IT_SOURCE", &input_path);

    let config_content = format!(
        r#"
[pipeline]
name = "env-test"
description = "Environment substitution test"
version = "1.0.0"

[source]
location = "${{ROSTER_IT_SOURCE}}"

[load]
output_path = "{out}/output"
output_formats = ["csv"]
"#,
        out = normalized_path
    );

    let config_path = format!("{}/roster-config.toml", temp_path);
    tokio::fs::write(&config_path, config_content).await?;

    let config = TomlConfig::from_file(&config_path)?;
    config.validate()?;

    let storage = LocalStorage::new(".");
    let pipeline = RosterPipeline::new(storage, config);
    let engine = RosterEngine::new(pipeline);
    engine.run().await?;

    let csv_content =
        std::fs::read_to_string(format!("{}/output/roster.csv", normalized_path))?;
    assert!(csv_content.contains("Martha,Jones,Martha Jones"));

    Ok(())
}

#[tokio::test]
async fn test_toml_field_overrides_reach_the_pipeline() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let temp_path = temp_dir.path().to_str().unwrap();
    let normalized_path = temp_path.replace('\\', "/");

    let input_path = format!("{}/attendees.csv", normalized_path);
    tokio::fs::write(
        &input_path,
        "attendee_given,attendee_family\nsarah jane,smith\n",
    )
    .await?;

    let config_content = format!(
        r#"
[pipeline]
name = "override-test"
description = "Field override test"
version = "1.0.0"

[source]
location = "{input}"

[extract]
first_name_field = "attendee_given"
last_name_field = "attendee_family"

[load]
output_path = "{out}/output"
output_formats = ["csv"]
"#,
        input = input_path,
        out = normalized_path
    );

    let config_path = format!("{}/roster-config.toml", temp_path);
    tokio::fs::write(&config_path, config_content).await?;

    let config = TomlConfig::from_file(&config_path)?;
    config.validate()?;

    let storage = LocalStorage::new(".");
    let pipeline = RosterPipeline::new(storage, config);
    let engine = RosterEngine::new(pipeline);
    engine.run().await?;

    let csv_content =
        std::fs::read_to_string(format!("{}/output/roster.csv", normalized_path))?;
    assert!(csv_content.contains("Sarah Jane,Smith,Sarah Jane Smith"));

    Ok(())
}
