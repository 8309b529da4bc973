use std::fs;
use std::path::Path;

use qa_lens::config::EnvironmentsConfig;
use qa_lens::sources::json::read_document;
use qa_lens::{Config, Dataset, EnvironmentLoader, IngestError};
use tempfile::TempDir;

fn bundle(total: u64, passed: u64) -> String {
    format!(
        r#"{{"summary": {{"total": {total}, "passed": {passed}, "failed": {}, "skipped": 0, "duration": 1200, "startTime": "2025-03-01T10:00:00Z", "projectName": "shop"}},
            "tests": [{{"title": "checkout", "file": "e2e/checkout.spec.ts", "status": "passed", "duration": 1200}}]}}"#,
        total - passed
    )
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn environment_files_map_to_their_names() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "test-results-qa.json", &bundle(10, 9));
    write(dir.path(), "test-results-dev.json", &bundle(4, 2));
    write(dir.path(), "test-results.json", &bundle(1, 1));

    let envs = EnvironmentLoader::from_config(dir.path(), &EnvironmentsConfig::default())
        .unwrap()
        .load()
        .unwrap();

    let keys: Vec<&str> = envs.keys().map(String::as_str).collect();
    assert_eq!(keys, ["dev", "qa"]);

    let qa = read_document(&dir.path().join("test-results-qa.json"))
        .unwrap()
        .unwrap();
    assert_eq!(envs["qa"], qa);
    let summary = envs["dev"].summary().unwrap();
    assert_eq!(
        (summary.total(), summary.passed(), summary.failed()),
        (4, 2, 2)
    );
    assert_eq!(summary.get("projectName").unwrap(), "shop");
}

#[test]
fn regex_naming_replaces_affixes() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "results_staging.json", &bundle(2, 2));
    write(dir.path(), "test-results-qa.json", &bundle(2, 1));
    let config = EnvironmentsConfig {
        pattern: Some(r"^results_(?P<env>[a-z]+)\.json$".into()),
        ..EnvironmentsConfig::default()
    };

    let envs = EnvironmentLoader::from_config(dir.path(), &config)
        .unwrap()
        .load()
        .unwrap();
    assert_eq!(envs.keys().collect::<Vec<_>>(), ["staging"]);
}

#[test]
fn invalid_regex_is_reported() {
    let config = EnvironmentsConfig {
        pattern: Some("(?P<env>".into()),
        ..EnvironmentsConfig::default()
    };
    let err = EnvironmentLoader::from_config("data", &config).err().unwrap();
    assert!(matches!(err, IngestError::Naming { .. }));
}

#[test]
fn no_environment_files_is_an_empty_set() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "test-results.json", &bundle(1, 1));
    let envs = EnvironmentLoader::from_config(dir.path(), &EnvironmentsConfig::default())
        .unwrap()
        .load()
        .unwrap();
    assert!(envs.is_empty());
}

#[test]
fn dataset_collects_every_source() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "test-results.json", &bundle(1, 1));
    write(dir.path(), "test-results-qa.json", &bundle(10, 9));
    write(
        dir.path(),
        "test-analysis-complete.json",
        r#"{"metadata": {"projectName": "shop"}, "scores": {"overall": 42}}"#,
    );

    let dataset = Dataset::load(dir.path(), &Config::default()).unwrap();
    assert!(!dataset.is_empty());
    assert_eq!(dataset.table.len(), 1);
    assert_eq!(dataset.environment_names(), ["qa"]);

    let analysis = dataset.analysis.as_ref().unwrap();
    assert_eq!(analysis.project_name(), Some("shop"));
    assert_eq!(analysis.overall_score(), Some(42.0));

    let latest = dataset.active_document(None).unwrap();
    assert_eq!(latest.summary().unwrap().total(), 1);
    let qa = dataset.active_document(Some("qa")).unwrap();
    assert_eq!(qa.summary().unwrap().total(), 10);
    let unknown = dataset.active_document(Some("prod")).unwrap();
    assert_eq!(unknown.summary().unwrap().total(), 1);
}

#[test]
fn empty_directory_has_nothing_to_show() {
    let dir = TempDir::new().unwrap();
    let dataset = Dataset::load(dir.path(), &Config::default()).unwrap();
    assert!(dataset.is_empty());
    assert!(dataset.analysis.is_none());
    assert!(dataset.active_document(None).is_none());
}

#[test]
fn loosely_typed_environment_summary_still_loads() {
    let dir = TempDir::new().unwrap();
    let raw = r#"{"summary": {"total": 4.0, "passed": 3, "failed": null, "duration": 1200},
                  "tests": []}"#;
    write(dir.path(), "test-results.json", &bundle(1, 1));
    write(dir.path(), "test-results-qa.json", raw);

    let dataset = Dataset::load(dir.path(), &Config::default()).unwrap();
    let qa = &dataset.environments["qa"];
    let summary = qa.summary().unwrap();
    assert_eq!((summary.total(), summary.passed(), summary.failed()), (4, 3, 0));
    assert_eq!(summary.pass_rate(), 75.0);

    let original: serde_json::Value = serde_json::from_str(raw).unwrap();
    assert_eq!(serde_json::to_value(qa).unwrap(), original);
    assert!(!serde_json::to_string(&qa.summary()).unwrap().contains("1200.0"));
}

#[test]
fn malformed_environment_file_fails_the_load() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "test-results.json", &bundle(1, 1));
    write(dir.path(), "test-results-qa.json", "{ not json");

    let err = Dataset::load(dir.path(), &Config::default()).unwrap_err();
    assert!(err.to_string().contains("test-results-qa.json"));
}
