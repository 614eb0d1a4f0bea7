use std::io::Write;

use camino::Utf8Path;
use symbolcopy::config::AppConfig;
use tempfile::NamedTempFile;

fn load(json: &str) -> anyhow::Result<AppConfig> {
    let mut tmp = NamedTempFile::new()?;
    tmp.write_all(json.as_bytes())?;
    let path = Utf8Path::from_path(tmp.path()).unwrap();
    AppConfig::load(Some(path))
}

#[test]
fn missing_file_argument_gives_defaults() {
    let config = AppConfig::load(None).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.debounce_ms, 150);
    assert_eq!(config.toast_ms, 1500);
    assert_eq!(config.search.threshold, 0.3);
    assert_eq!(config.sources.len(), 10);
}

#[test]
fn empty_object_is_a_valid_config() {
    assert_eq!(load("{}").unwrap(), AppConfig::default());
}

#[test]
fn partial_config_overrides_only_named_fields() {
    let config = load(r#"{"debounce_ms": 300, "search": {"threshold": 0.1}}"#).unwrap();
    assert_eq!(config.debounce_ms, 300);
    assert_eq!(config.search.threshold, 0.1);
    assert!(config.search.extended);
    assert_eq!(config.toast_ms, 1500);
}

#[test]
fn custom_sources_replace_the_manifest() {
    let config = load(r#"{"sources": [{"path": "extra.json", "kind": "kaomoji"}]}"#).unwrap();
    assert_eq!(config.sources.len(), 1);
    assert_eq!(config.sources[0].path.as_str(), "extra.json");
}

#[test]
fn malformed_config_is_an_error() {
    assert!(load("{not json").is_err());
    let bad_url = load(r#"{"base_url": "not a url"}"#).unwrap();
    assert!(bad_url.base_url().is_err());
}

#[test]
fn config_round_trips_through_json() {
    let config = AppConfig::default();
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["sources"][0]["path"], "symbols.json");
    assert_eq!(json["sources"][0]["kind"], "symbols");
    let back: AppConfig = serde_json::from_value(json).unwrap();
    assert_eq!(back, config);
}
