//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::fs;
use std::path::PathBuf;

use isocube_core::RotationAngles;
use isocube_terminal::{AppConfig, ConfigError};
use serial_test::serial;

fn write_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("isocube-{}-{name}.toml", std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
#[serial]
fn test_file_overrides_defaults() {
    let path = write_config(
        "file",
        r#"
[window]
title = "From File"
width = 640
height = 480

[rotation]
angles = [5.0, 10.0, 15.0]
"#,
    );

    let config = AppConfig::load(Some(path.as_path())).unwrap();
    assert_eq!(config.window.title, "From File");
    assert_eq!(config.window.width, 640);
    assert_eq!(config.angles(), Some(RotationAngles::new(5.0, 10.0, 15.0)));
    // untouched sections keep their defaults
    assert_eq!(config.shape.scale, 100.0);
    assert_eq!(config.animation.dwell_ms, 400);

    fs::remove_file(path).unwrap();
}

#[test]
#[serial]
fn test_env_override() {
    let path = write_config("env", "[window]\nwidth = 640\n");
    std::env::set_var("ISOCUBE_WINDOW__WIDTH", "320");
    std::env::set_var("ISOCUBE_ANIMATION__DWELL_MS", "50");

    let config = AppConfig::load(Some(path.as_path()));

    std::env::remove_var("ISOCUBE_WINDOW__WIDTH");
    std::env::remove_var("ISOCUBE_ANIMATION__DWELL_MS");
    fs::remove_file(path).unwrap();

    let config = config.unwrap();
    assert_eq!(config.window.width, 320);
    assert_eq!(config.animation.dwell_ms, 50);
}

#[test]
#[serial]
fn test_invalid_scale_is_rejected() {
    let path = write_config("invalid", "[shape]\nscale = 0.0\n");
    let result = AppConfig::load(Some(path.as_path()));
    fs::remove_file(path).unwrap();
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
#[serial]
fn test_missing_explicit_file() {
    let path = std::env::temp_dir().join("isocube-does-not-exist.toml");
    assert!(matches!(
        AppConfig::load(Some(path.as_path())),
        Err(ConfigError::MissingFile(_))
    ));
}
