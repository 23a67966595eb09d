//! oracle-scan service configuration
//!
//! Merges command-line values with the TOML config file and compiled
//! defaults. Root folder resolution itself lives in `oracle_common::config`.

use oracle_common::config::{
    CameraConfig, CompiledDefaults, RootFolderInitializer, RootFolderResolver, ThumbnailConfig,
    TomlConfig,
};
use std::path::PathBuf;

/// Module name used in logs and the health endpoint
pub const MODULE_NAME: &str = "oracle-scan";

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub root_folder: PathBuf,
    pub bind: String,
    pub static_dir: PathBuf,
    pub specimens_path: PathBuf,
    pub max_upload_bytes: usize,
    pub camera: CameraConfig,
    pub thumbnails: ThumbnailConfig,
}

impl ServiceConfig {
    /// Merge sources; command-line values win over TOML, TOML over defaults
    pub fn resolve(cli_root: Option<PathBuf>, cli_bind: Option<String>, toml: TomlConfig) -> Self {
        let defaults = CompiledDefaults::for_current_platform();

        let root_folder = RootFolderResolver::new(MODULE_NAME)
            .with_cli_arg(cli_root)
            .with_toml_config(&toml)
            .resolve();

        let specimens_path = toml
            .specimens_path
            .unwrap_or_else(|| RootFolderInitializer::new(root_folder.clone()).specimens_path());

        Self {
            bind: cli_bind.or(toml.bind).unwrap_or(defaults.bind),
            static_dir: toml.static_dir.unwrap_or(defaults.static_dir),
            specimens_path,
            max_upload_bytes: toml.max_upload_bytes.unwrap_or(defaults.max_upload_bytes),
            camera: toml.camera,
            thumbnails: toml.thumbnails,
            root_folder,
        }
    }

    /// Defaults rooted at `root_folder`, ignoring environment and config files
    pub fn for_root(root_folder: PathBuf) -> Self {
        let defaults = CompiledDefaults::for_current_platform();
        let specimens_path = RootFolderInitializer::new(root_folder.clone()).specimens_path();

        Self {
            root_folder,
            bind: defaults.bind,
            static_dir: defaults.static_dir,
            specimens_path,
            max_upload_bytes: defaults.max_upload_bytes,
            camera: CameraConfig::default(),
            thumbnails: ThumbnailConfig::default(),
        }
    }

    pub fn root(&self) -> RootFolderInitializer {
        RootFolderInitializer::new(self.root_folder.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_cli_values_override_toml() {
        let toml = TomlConfig {
            root_folder: Some(PathBuf::from("/srv/from-toml")),
            bind: Some("127.0.0.1:9000".to_string()),
            ..Default::default()
        };

        let config = ServiceConfig::resolve(
            Some(PathBuf::from("/srv/from-cli")),
            Some("127.0.0.1:7000".to_string()),
            toml,
        );

        assert_eq!(config.root_folder, PathBuf::from("/srv/from-cli"));
        assert_eq!(config.bind, "127.0.0.1:7000");
        assert_eq!(config.specimens_path, PathBuf::from("/srv/from-cli/specimens.json"));
    }

    #[test]
    #[serial]
    fn test_toml_values_used_when_cli_absent() {
        let toml = TomlConfig {
            bind: Some("127.0.0.1:9000".to_string()),
            specimens_path: Some(PathBuf::from("/etc/oracle/specimens.json")),
            max_upload_bytes: Some(1024),
            ..Default::default()
        };

        let config = ServiceConfig::resolve(Some(PathBuf::from("/srv/root")), None, toml);

        assert_eq!(config.bind, "127.0.0.1:9000");
        assert_eq!(config.specimens_path, PathBuf::from("/etc/oracle/specimens.json"));
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.camera.timeout_ms, 700);
    }

    #[test]
    fn test_for_root_defaults() {
        let config = ServiceConfig::for_root(PathBuf::from("/tmp/oracle"));

        assert_eq!(config.bind, "0.0.0.0:8000");
        assert_eq!(config.specimens_path, PathBuf::from("/tmp/oracle/specimens.json"));
        assert_eq!(config.root().database_path(), PathBuf::from("/tmp/oracle/oracle.db"));
        assert!(config.thumbnails.enabled);
    }
}
