//! Integration tests for config file resolution and loading
//!
//! Uses serial_test to prevent ENV variable race conditions.
//! Tests that manipulate STORSYNC_* variables are marked with #[serial].

use serial_test::serial;
use std::env;
use std::fs;
use std::path::Path;
use storsync_common::config::{
    resolve_config_path, CATALOG_PASSWORD_ENV_VAR, CONFIG_ENV_VAR, SOURCE_PASSWORD_ENV_VAR,
};
use storsync_common::{Error, TomlConfig};
use tempfile::TempDir;

const CONFIG_TEXT: &str = r#"
[source]
base_uri = "https://dsm.example.com:3033/api/rest"
username = "admin"
password = "from-file"
api_version = "3.0"

[catalog]
base_uri = "https://d42.example.com/api/1.0"
username = "importer"
password = "from-file"

[http]
timeout_secs = 45
accept_invalid_certs = true

[logging]
level = "debug"
"#;

fn write_config(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("storsync.toml");
    fs::write(&path, CONFIG_TEXT).unwrap();
    path
}

fn clear_env() {
    env::remove_var(CONFIG_ENV_VAR);
    env::remove_var(SOURCE_PASSWORD_ENV_VAR);
    env::remove_var(CATALOG_PASSWORD_ENV_VAR);
}

#[test]
#[serial]
fn test_load_reads_all_sections() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir);

    let config = TomlConfig::load(&path).unwrap();

    assert_eq!(config.source.api_version, "3.0");
    assert_eq!(config.source.password, "from-file");
    assert_eq!(config.catalog.username, "importer");
    assert_eq!(config.http.timeout_secs, 45);
    assert!(config.http.accept_invalid_certs);
    assert_eq!(config.logging.level, "debug");
}

#[test]
#[serial]
fn test_password_env_overrides_file() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir);

    env::set_var(SOURCE_PASSWORD_ENV_VAR, "from-env");
    let config = TomlConfig::load(&path).unwrap();
    clear_env();

    assert_eq!(config.source.password, "from-env");
    assert_eq!(config.catalog.password, "from-file");
}

#[test]
#[serial]
fn test_blank_env_password_ignored() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir);

    env::set_var(CATALOG_PASSWORD_ENV_VAR, "   ");
    let config = TomlConfig::load(&path).unwrap();
    clear_env();

    assert_eq!(config.catalog.password, "from-file");
}

#[test]
#[serial]
fn test_load_missing_file_is_config_error() {
    clear_env();
    let result = TomlConfig::load(Path::new("/nonexistent/storsync-test/storsync.toml"));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_cli_path_wins_over_env() {
    clear_env();
    env::set_var(CONFIG_ENV_VAR, "/tmp/from-env.toml");

    let resolved = resolve_config_path(Some(Path::new("/tmp/from-cli.toml"))).unwrap();
    clear_env();

    assert_eq!(resolved, Path::new("/tmp/from-cli.toml"));
}

#[test]
#[serial]
fn test_env_path_used_without_cli() {
    clear_env();
    env::set_var(CONFIG_ENV_VAR, "/tmp/from-env.toml");

    let resolved = resolve_config_path(None).unwrap();
    clear_env();

    assert_eq!(resolved, Path::new("/tmp/from-env.toml"));
}
