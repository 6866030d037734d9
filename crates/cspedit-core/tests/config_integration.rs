//! Config file load/save tests against a temporary directory.

use std::path::PathBuf;

use cspedit_core::{Config, ConfigError, FetchOptions};

#[test]
fn test_load_creates_default_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config, Config::default());

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("[fetch]"));
    assert!(written.contains("[output]"));
}

#[test]
fn test_set_save_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::load_from(&path).unwrap();
    config.set("fetch.timeout_secs", "3").unwrap();
    config.set("output.path", "out/policy.csp").unwrap();
    config.save_to(&path).unwrap();

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.fetch.timeout_secs, 3);
    assert_eq!(reloaded.output.path, PathBuf::from("out/policy.csp"));

    let options = FetchOptions::from_config(&reloaded.fetch);
    assert_eq!(options.timeout, std::time::Duration::from_secs(3));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[fetch\ntimeout_secs = ").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseFailed(_)));
}

#[test]
fn test_save_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope").join("config.toml");

    let err = Config::default().save_to(&path).unwrap_err();
    assert!(matches!(err, ConfigError::SaveFailed { .. }));
}
