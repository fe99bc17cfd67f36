//! Tests for server configuration loading.

use seega::ServerConfig;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 55555);
    assert_eq!(config.log_filter(), "info");
    assert_eq!(config.bind_address(), "127.0.0.1:55555");
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("seega.toml");
    fs::write(&path, "port = 8080\nlog_filter = \"seega=debug\"\n").expect("Write failed");

    let config = ServerConfig::from_file(&path).expect("Load failed");
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 8080);
    assert_eq!(config.log_filter(), "seega=debug");
}

#[test]
fn test_overrides_win_over_file() {
    let config = ServerConfig::default().with_overrides(Some("0.0.0.0".to_string()), None);
    assert_eq!(config.bind_address(), "0.0.0.0:55555");

    let config = config.with_overrides(None, Some(9000));
    assert_eq!(config.bind_address(), "0.0.0.0:9000");
}

#[test]
fn test_invalid_toml_is_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("bad.toml");
    fs::write(&path, "port = \"not a number\"").expect("Write failed");

    let err = ServerConfig::from_file(&path).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_missing_file_is_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = ServerConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}
