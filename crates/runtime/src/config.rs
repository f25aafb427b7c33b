//! Runtime configuration resolved from the process environment.
use std::env;
use std::path::PathBuf;

/// Where the plugin keeps its persisted configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub config_path: PathBuf,
}

impl RuntimeConfig {
    pub const CONFIG_FILE_NAME: &'static str = "config.json";

    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DESTROY_CONFIG_PATH` - Full path of the configuration file
    /// - `DESTROY_DATA_DIR` - Directory holding `config.json` (ignored when
    ///   `DESTROY_CONFIG_PATH` is set)
    ///
    /// Without either, the platform data directory is used.
    pub fn from_env() -> Self {
        Self::resolve(
            read_env("DESTROY_CONFIG_PATH"),
            read_env("DESTROY_DATA_DIR"),
        )
    }

    fn resolve(config_path: Option<PathBuf>, data_dir: Option<PathBuf>) -> Self {
        let config_path = config_path.unwrap_or_else(|| {
            data_dir
                .unwrap_or_else(default_data_dir)
                .join(Self::CONFIG_FILE_NAME)
        });
        Self { config_path }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

/// Platform-specific data directory for the plugin.
///
/// Follows platform conventions:
/// - macOS: `~/Library/Application Support/destroy`
/// - Linux: `~/.local/share/destroy` (or `$XDG_DATA_HOME/destroy`)
/// - Windows: `%APPDATA%\destroy`
/// - Fallback: `./data`
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "destroy")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./data"))
}

fn read_env(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
