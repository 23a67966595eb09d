//! Unit tests for configuration and graceful degradation
//!
//! Covers:
//! - Root folder priority order (CLI > ENV > TOML > default)
//! - Missing or broken config files fall back to defaults
//! - Root folder layout (database, images, thumbnails, specimens)
//!
//! Note: Uses serial_test to prevent ENV variable race conditions.
//! Tests that touch ORACLE_ROOT_FOLDER or ORACLE_ROOT are marked #[serial].

use oracle_common::config::{
    CameraConfig, CompiledDefaults, RootFolderInitializer, RootFolderResolver, TomlConfig,
    ROOT_ENV, ROOT_FOLDER_ENV,
};
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

fn clear_root_env() {
    env::remove_var(ROOT_FOLDER_ENV);
    env::remove_var(ROOT_ENV);
}

#[test]
fn test_compiled_defaults() {
    let defaults = CompiledDefaults::for_current_platform();

    assert!(!defaults.root_folder.as_os_str().is_empty());
    assert_eq!(defaults.bind, "0.0.0.0:8000");
    assert_eq!(defaults.max_upload_bytes, 25 * 1024 * 1024);
}

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    clear_root_env();

    let root_folder = RootFolderResolver::new("test-module").resolve();

    assert_eq!(root_folder, CompiledDefaults::for_current_platform().root_folder);
}

#[test]
#[serial]
fn test_resolver_env_var_root_folder() {
    clear_root_env();
    env::set_var(ROOT_FOLDER_ENV, "/tmp/oracle-test-env-folder");

    let root_folder = RootFolderResolver::new("test-module").resolve();
    assert_eq!(root_folder, PathBuf::from("/tmp/oracle-test-env-folder"));

    clear_root_env();
}

#[test]
#[serial]
fn test_resolver_root_folder_env_takes_precedence_over_root_env() {
    clear_root_env();
    env::set_var(ROOT_FOLDER_ENV, "/tmp/oracle-priority-1");
    env::set_var(ROOT_ENV, "/tmp/oracle-priority-2");

    let root_folder = RootFolderResolver::new("test-module").resolve();
    assert_eq!(root_folder, PathBuf::from("/tmp/oracle-priority-1"));

    clear_root_env();
}

#[test]
#[serial]
fn test_resolver_cli_beats_env_and_toml() {
    clear_root_env();
    env::set_var(ROOT_ENV, "/tmp/oracle-from-env");

    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/oracle-from-toml")),
        ..Default::default()
    };

    let root_folder = RootFolderResolver::new("test-module")
        .with_cli_arg(Some(PathBuf::from("/tmp/oracle-from-cli")))
        .with_toml_config(&toml)
        .resolve();
    assert_eq!(root_folder, PathBuf::from("/tmp/oracle-from-cli"));

    clear_root_env();
}

#[test]
#[serial]
fn test_resolver_env_beats_toml() {
    clear_root_env();
    env::set_var(ROOT_ENV, "/tmp/oracle-from-env");

    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/oracle-from-toml")),
        ..Default::default()
    };

    let root_folder = RootFolderResolver::new("test-module")
        .with_toml_config(&toml)
        .resolve();
    assert_eq!(root_folder, PathBuf::from("/tmp/oracle-from-env"));

    clear_root_env();
}

#[test]
#[serial]
fn test_resolver_toml_used_without_env() {
    clear_root_env();

    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/oracle-from-toml")),
        ..Default::default()
    };

    let root_folder = RootFolderResolver::new("test-module")
        .with_toml_config(&toml)
        .resolve();
    assert_eq!(root_folder, PathBuf::from("/tmp/oracle-from-toml"));
}

#[test]
fn test_initializer_layout() {
    let root = PathBuf::from("/tmp/oracle-test-root");
    let initializer = RootFolderInitializer::new(root.clone());

    assert_eq!(initializer.database_path(), root.join("oracle.db"));
    assert_eq!(initializer.images_dir(), root.join("images"));
    assert_eq!(initializer.thumbnails_dir(), root.join("images").join("thumbs"));
    assert_eq!(initializer.specimens_path(), root.join("specimens.json"));
}

#[test]
fn test_initializer_creates_directories_idempotently() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("nested").join("root");
    let initializer = RootFolderInitializer::new(root.clone());

    initializer.ensure_directory_exists().unwrap();
    initializer.ensure_directory_exists().unwrap();
    initializer.ensure_image_dirs().unwrap();
    initializer.ensure_image_dirs().unwrap();

    assert!(root.is_dir());
    assert!(initializer.images_dir().is_dir());
    assert!(initializer.thumbnails_dir().is_dir());
    assert!(!initializer.database_exists());
}

#[test]
fn test_toml_partial_file_fills_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
root_folder = "/srv/oracle"

[camera]
timeout_ms = 1500
"#,
    )
    .unwrap();

    let config = TomlConfig::load(&path).unwrap();

    assert_eq!(config.root_folder, Some(PathBuf::from("/srv/oracle")));
    assert_eq!(config.bind, None);
    assert_eq!(config.camera.timeout_ms, 1500);
    assert_eq!(config.camera.binaries, CameraConfig::default().binaries);
    assert!(config.thumbnails.enabled);
    assert_eq!(config.thumbnails.max_dimension, 320);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_toml_syntax_error_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "root_folder = [unterminated").unwrap();

    let err = TomlConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("Parse"));
}

#[test]
fn test_load_or_default_survives_broken_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "this is not toml ===").unwrap();

    let loaded = TomlConfig::load_or_default(Some(&path));
    assert_eq!(loaded.config, TomlConfig::default());
    assert!(loaded.path.is_none());
    assert!(loaded.warning.unwrap().contains("continuing with defaults"));
}

#[test]
fn test_load_or_default_survives_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("does-not-exist.toml");

    let loaded = TomlConfig::load_or_default(Some(&path));
    assert_eq!(loaded.config, TomlConfig::default());
    assert!(loaded.warning.is_some());
}

#[test]
fn test_load_or_default_reports_source_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "bind = \"127.0.0.1:8123\"\n").unwrap();

    let loaded = TomlConfig::load_or_default(Some(&path));
    assert_eq!(loaded.config.bind.as_deref(), Some("127.0.0.1:8123"));
    assert_eq!(loaded.path, Some(path));
    assert!(loaded.warning.is_none());
}
