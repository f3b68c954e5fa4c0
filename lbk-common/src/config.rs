//! Configuration loading and root folder resolution
//!
//! Bootstrap configuration comes from an optional TOML file. Everything a user
//! works with (accounts, leads, imported files) lives in the database inside the
//! root folder, so the TOML file stays small.
//!
//! # Root folder priority
//!
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`LEADBOOK_ROOT_FOLDER`)
//! 3. TOML config file (`root_folder`)
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "LEADBOOK_ROOT_FOLDER";

/// Database file created inside the root folder
pub const DATABASE_FILE_NAME: &str = "leadbook.db";

/// Default HTTP port for the lead service
pub const DEFAULT_PORT: u16 = 5727;

/// Built-in defaults used when neither CLI, environment nor TOML supply a value
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub port: u16,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl CompiledDefaults {
    /// Defaults for the platform this binary was compiled for
    pub fn for_current_platform() -> Self {
        Self {
            root_folder: default_root_folder(),
            port: DEFAULT_PORT,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

/// Bootstrap configuration loaded from TOML file
///
/// Every field is optional; a missing or partial file yields defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Root folder holding the database
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Import behavior
    #[serde(default)]
    pub import: ImportConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Import configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportConfig {
    /// Reprocess files whose content fingerprint is already registered
    /// instead of rejecting them as already uploaded
    #[serde(default)]
    pub reprocess_duplicates: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Load and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read TOML failed ({}): {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))
    }

    /// Load the config file, falling back to defaults
    ///
    /// A missing file is normal (zero-config startup) and only logged at info.
    /// An unreadable or malformed file is logged as a warning; startup continues
    /// with defaults either way.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(default_config_path) {
            Some(path) => path,
            None => {
                warn!("Could not determine config directory, using defaults");
                return Self::default();
            }
        };

        if !path.exists() {
            info!(path = %path.display(), "No config file found, using defaults");
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                info!(path = %path.display(), "Loaded config file");
                config
            }
            Err(e) => {
                warn!(error = %e, "Ignoring config file, using defaults");
                Self::default()
            }
        }
    }
}

/// Platform config file location (`<config dir>/leadbook/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("leadbook").join("config.toml"))
}

/// Resolves the root folder following the documented priority order
#[derive(Debug, Clone, Default)]
pub struct RootFolderResolver {
    cli_arg: Option<PathBuf>,
    toml_root: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root folder passed on the command line
    pub fn with_cli_arg(mut self, path: Option<PathBuf>) -> Self {
        self.cli_arg = path;
        self
    }

    /// Root folder from the TOML config
    pub fn with_toml_config(mut self, config: &TomlConfig) -> Self {
        self.toml_root = config.root_folder.clone();
        self
    }

    /// Resolve the root folder; never fails, the compiled default is the last resort
    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        if let Some(path) = &self.toml_root {
            return path.clone();
        }

        CompiledDefaults::for_current_platform().root_folder
    }
}

/// Creates the root folder on first run and locates the database inside it
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

    /// Create the root folder directory if missing
    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_folder.exists() {
            std::fs::create_dir_all(&self.root_folder)?;
            info!(path = %self.root_folder.display(), "Created root folder");
        } else if !self.root_folder.is_dir() {
            return Err(Error::Config(format!(
                "Root folder is not a directory: {}",
                self.root_folder.display()
            )));
        }
        Ok(())
    }

    /// Path of the SQLite database file
    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE_NAME)
    }
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/leadbook
        dirs::data_local_dir()
            .map(|d| d.join("leadbook"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/leadbook"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/leadbook
        dirs::data_dir()
            .map(|d| d.join("leadbook"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/leadbook"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\leadbook
        dirs::data_local_dir()
            .map(|d| d.join("leadbook"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\leadbook"))
    } else {
        PathBuf::from("./leadbook_data")
    }
}
