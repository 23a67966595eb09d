//! Configuration loading and root folder resolution
//!
//! Root folder priority order:
//! 1. Command-line argument (highest priority)
//! 2. `ORACLE_ROOT_FOLDER`, then `ORACLE_ROOT` environment variable
//! 3. `root_folder` key of the TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! Missing or broken config files never abort startup; they produce a warning
//! and the compiled defaults are used instead.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Primary root folder environment variable
pub const ROOT_FOLDER_ENV: &str = "ORACLE_ROOT_FOLDER";

/// Alternative (shorter) root folder environment variable
pub const ROOT_ENV: &str = "ORACLE_ROOT";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "oracle.db";

/// Image directory name inside the root folder
pub const IMAGES_DIR: &str = "images";

/// Thumbnail directory name inside the images directory
pub const THUMBNAILS_DIR: &str = "thumbs";

/// Specimens list file name inside the root folder
pub const SPECIMENS_FILE: &str = "specimens.json";

/// Compiled-in defaults used when nothing else is configured
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub bind: String,
    pub static_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl CompiledDefaults {
    /// Defaults for the platform this binary was built for
    pub fn for_current_platform() -> Self {
        Self {
            root_folder: default_root_folder(),
            bind: "0.0.0.0:8000".to_string(),
            static_dir: PathBuf::from("static"),
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/oracle (or /var/lib/oracle without a home directory)
        dirs::data_local_dir()
            .map(|d| d.join("oracle"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/oracle"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("oracle"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/oracle"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("oracle"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\oracle"))
    } else {
        PathBuf::from("./oracle_data")
    }
}

/// Camera binary settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Candidate binaries in preference order (names or paths)
    pub binaries: Vec<String>,
    /// Directory checked for each candidate when it is not on PATH
    pub fallback_dir: PathBuf,
    /// Value passed to the binary's `--timeout` flag
    pub timeout_ms: u64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            // Modern rpicam-still first, legacy libcamera-still second
            binaries: vec!["rpicam-still".to_string(), "libcamera-still".to_string()],
            fallback_dir: PathBuf::from("/usr/bin"),
            timeout_ms: 700,
        }
    }
}

/// Thumbnail generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    pub enabled: bool,
    /// Longest edge of a generated thumbnail, in pixels
    pub max_dimension: u32,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_dimension: 320,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Contents of the TOML config file
///
/// Every field is optional so a partial file is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_folder: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specimens_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_upload_bytes: Option<usize>,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub thumbnails: ThumbnailConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Parse a config file, failing on I/O or syntax errors
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
    }

    /// Load the explicit path if given, otherwise the platform config file.
    ///
    /// Never fails: a missing or broken file yields the defaults plus a
    /// warning for the caller to log once tracing is up.
    pub fn load_or_default(explicit: Option<&Path>) -> LoadedConfig {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) => path,
                None => {
                    return LoadedConfig {
                        config: Self::default(),
                        path: None,
                        warning: None,
                    }
                }
            },
        };

        match Self::load(&path) {
            Ok(config) => LoadedConfig {
                config,
                path: Some(path),
                warning: None,
            },
            Err(e) => LoadedConfig {
                config: Self::default(),
                path: None,
                warning: Some(format!("{} - continuing with defaults", e)),
            },
        }
    }
}

/// Result of [`TomlConfig::load_or_default`]
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: TomlConfig,
    /// File the config came from, if one was read successfully
    pub path: Option<PathBuf>,
    /// Why the defaults were used instead of an existing file
    pub warning: Option<String>,
}

impl LoadedConfig {
    /// Log where the config came from (call after tracing is initialized)
    pub fn log_source(&self) {
        match (&self.path, &self.warning) {
            (_, Some(warning)) => warn!("{}", warning),
            (Some(path), None) => info!("Loaded config file: {}", path.display()),
            (None, None) => debug!("No config file found, using defaults"),
        }
    }
}

/// Locate the platform config file, if one exists
///
/// Linux checks `~/.config/oracle/config.toml` then `/etc/oracle/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("oracle").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/oracle/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Resolves the root folder from CLI, environment, TOML and defaults
#[derive(Debug, Clone)]
pub struct RootFolderResolver {
    module_name: String,
    cli_arg: Option<PathBuf>,
    toml_root: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            cli_arg: None,
            toml_root: None,
        }
    }

    /// Command-line override (priority 1)
    pub fn with_cli_arg(mut self, cli_arg: Option<PathBuf>) -> Self {
        self.cli_arg = cli_arg;
        self
    }

    /// TOML `root_folder` value (priority 3)
    pub fn with_toml_config(mut self, config: &TomlConfig) -> Self {
        self.toml_root = config.root_folder.clone();
        self
    }

    /// Resolve using the documented priority order
    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            debug!(module = %self.module_name, "Root folder from command line");
            return path.clone();
        }

        for var in [ROOT_FOLDER_ENV, ROOT_ENV] {
            if let Ok(path) = std::env::var(var) {
                if !path.trim().is_empty() {
                    debug!(module = %self.module_name, "Root folder from {}", var);
                    return PathBuf::from(path);
                }
            }
        }

        if let Some(path) = &self.toml_root {
            debug!(module = %self.module_name, "Root folder from config file");
            return path.clone();
        }

        debug!(module = %self.module_name, "Root folder from compiled default");
        CompiledDefaults::for_current_platform().root_folder
    }
}

/// Creates and describes the layout of a root folder
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }

    /// Create the root folder if missing (idempotent)
    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_folder.exists() {
            info!("Creating root folder: {}", self.root_folder.display());
        }
        std::fs::create_dir_all(&self.root_folder)?;
        Ok(())
    }

    /// Create the images and thumbnails directories (idempotent)
    pub fn ensure_image_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(self.images_dir())?;
        std::fs::create_dir_all(self.thumbnails_dir())?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE)
    }

    pub fn database_exists(&self) -> bool {
        self.database_path().exists()
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root_folder.join(IMAGES_DIR)
    }

    pub fn thumbnails_dir(&self) -> PathBuf {
        self.images_dir().join(THUMBNAILS_DIR)
    }

    pub fn specimens_path(&self) -> PathBuf {
        self.root_folder.join(SPECIMENS_FILE)
    }
}
