use httpmock::prelude::*;
use name_roster::{CliConfig, LocalStorage, RosterEngine, RosterPipeline};
use tempfile::TempDir;

fn test_config(source: String, output_path: String) -> CliConfig {
    CliConfig {
        source,
        output_path,
        output_formats: vec!["csv".to_string(), "tsv".to_string(), "json".to_string()],
        family_first: false,
        no_titlecase: false,
        max_records: None,
        full_name_field: None,
        first_name_field: None,
        last_name_field: None,
        verbose: false,
        log_json: false,
    }
}

#[tokio::test]
async fn test_end_to_end_csv_file() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("people.csv");
    let output_path = temp_dir.path().join("output");

    std::fs::write(
        &input_path,
        "full_name,email\n\"pond,   amy\",amy@example.com\nrory williams,rory@example.com\nPrince,prince@example.com\n",
    )
    .unwrap();

    let config = test_config(
        input_path.to_str().unwrap().to_string(),
        output_path.to_str().unwrap().to_string(),
    );

    let storage = LocalStorage::new(".");
    let pipeline = RosterPipeline::new(storage, config);
    let engine = RosterEngine::new(pipeline);

    let result = engine.run().await;
    assert!(result.is_ok());

    let csv_content = std::fs::read_to_string(output_path.join("roster.csv")).unwrap();
    assert!(csv_content.starts_with("first_name,last_name,full_name"));
    assert!(csv_content.contains("Amy,Pond,Amy Pond"));
    assert!(csv_content.contains("Rory,Williams,Rory Williams"));

    // Sorted by family name: Pond before Williams.
    let amy = csv_content.find("Amy,Pond").unwrap();
    let rory = csv_content.find("Rory,Williams").unwrap();
    assert!(amy < rory);

    let tsv_content = std::fs::read_to_string(output_path.join("roster.tsv")).unwrap();
    assert!(tsv_content.contains("Amy\tPond\tAmy Pond"));

    // The mononym cannot fill both required fields and lands in the
    // rejected bucket instead of the roster.
    assert!(!csv_content.contains("Prince"));
    let rejected_content = std::fs::read_to_string(output_path.join("rejected.json")).unwrap();
    assert!(rejected_content.contains("Prince"));

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output_path.join("roster.json")).unwrap())
            .unwrap();
    assert_eq!(report["count"], 2);
    assert_eq!(report["roster"][0]["first_name"], "Amy");
    assert_eq!(report["roster"][0]["last_name"], "Pond");
    assert!(report["generated_at"].is_string());
}

#[tokio::test]
async fn test_end_to_end_with_mock_api() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output");

    let server = MockServer::start();
    let mock_data = serde_json::json!([
        {"firstName": "rose", "lastName": "tyler", "email": "rose@example.com"},
        {"name": "Jack Harkness"},
        {"id": 99}
    ]);

    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/users");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(mock_data);
    });

    let config = test_config(
        server.url("/users"),
        output_path.to_str().unwrap().to_string(),
    );

    let storage = LocalStorage::new(".");
    let pipeline = RosterPipeline::new(storage, config);
    let engine = RosterEngine::new(pipeline);

    let result = engine.run().await;
    assert!(result.is_ok());
    api_mock.assert();

    let csv_content = std::fs::read_to_string(output_path.join("roster.csv")).unwrap();
    assert!(csv_content.contains("Jack,Harkness,Jack Harkness"));
    assert!(csv_content.contains("Rose,Tyler,Rose Tyler"));

    let rejected_content = std::fs::read_to_string(output_path.join("rejected.json")).unwrap();
    assert!(rejected_content.contains("99"));
}

#[tokio::test]
async fn test_api_failure_fails_the_run() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output");

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/down");
        then.status(500);
    });

    let config = test_config(
        server.url("/down"),
        output_path.to_str().unwrap().to_string(),
    );

    let storage = LocalStorage::new(".");
    let pipeline = RosterPipeline::new(storage, config);
    let engine = RosterEngine::new(pipeline);

    let result = engine.run().await;
    assert!(result.is_err());
    api_mock.assert();

    // Nothing should have been written.
    assert!(!output_path.join("roster.csv").exists());
}

#[tokio::test]
async fn test_family_first_source_without_case_normalization() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("people.csv");
    let output_path = temp_dir.path().join("output");

    std::fs::write(&input_path, "name\nYamada Taro\nMcDonald Ronald\n").unwrap();

    let mut config = test_config(
        input_path.to_str().unwrap().to_string(),
        output_path.to_str().unwrap().to_string(),
    );
    config.family_first = true;
    config.no_titlecase = true;

    let storage = LocalStorage::new(".");
    let pipeline = RosterPipeline::new(storage, config);
    let engine = RosterEngine::new(pipeline);

    engine.run().await.unwrap();

    let csv_content = std::fs::read_to_string(output_path.join("roster.csv")).unwrap();
    assert!(csv_content.contains("Taro,Yamada,Taro Yamada"));
    // Casing is untouched when normalization is off.
    assert!(csv_content.contains("Ronald,McDonald,Ronald McDonald"));
}
