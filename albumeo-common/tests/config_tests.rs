//! Integration tests for config-file resolution
//!
//! Uses serial_test because several tests set ALBUMEO_CONFIG; they must not
//! run in parallel with each other.

use albumeo_common::config::{load_config, load_config_file, resolve_config_path, CONFIG_ENV_VAR};
use albumeo_common::Error;
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn test_cli_argument_overrides_env() {
    let cli_file = write_config("[server]\nport = 7001\n");
    let env_file = write_config("[server]\nport = 7002\n");
    std::env::set_var(CONFIG_ENV_VAR, env_file.path());

    let config = load_config(Some(cli_file.path())).unwrap();
    assert_eq!(config.server.port, 7001);

    std::env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_env_used_without_cli_argument() {
    let env_file = write_config("[logging]\nlevel = \"debug\"\n");
    std::env::set_var(CONFIG_ENV_VAR, env_file.path());

    assert_eq!(
        resolve_config_path(None).as_deref(),
        Some(env_file.path())
    );
    let config = load_config(None).unwrap();
    assert_eq!(config.logging.level, "debug");

    std::env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_blank_env_is_ignored() {
    std::env::set_var(CONFIG_ENV_VAR, "   ");

    let resolved = resolve_config_path(None);
    assert!(resolved.map_or(true, |p| p.to_string_lossy().trim() != ""));

    std::env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_missing_explicit_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = load_config_file(&missing).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
#[serial]
fn test_invalid_values_rejected_on_load() {
    let file = write_config("[search]\nmax_limit = 10\ndefault_limit = 11\n");
    assert!(load_config(Some(file.path())).is_err());
}
