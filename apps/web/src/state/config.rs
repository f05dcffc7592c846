//! # App Configuration
//!
//! Configuration loaded once at startup. Read-only afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │   Defaults (this file)                                                 │
//! │        │                                                                │
//! │        ▼  overridden by                                                 │
//! │   stockroom.toml  ($STOCKROOM_CONFIG, or the platform config dir)      │
//! │        │                                                                │
//! │        ▼  overridden by                                                 │
//! │   STOCKROOM_DB_PATH / STOCKROOM_START_PAGE /                           │
//! │   STOCKROOM_RENAME_POLICY / STOCKROOM_LOG                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # stockroom.toml
//! database_path = "/var/lib/stockroom/stockroom.db"
//! start_page = "index.html"
//! category_rename = "cascade"   # cascade | detach
//! log_filter = "info,stockroom=debug,sqlx=warn"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use stockroom_core::CategoryRenamePolicy;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "STOCKROOM_CONFIG";

const DB_PATH_ENV: &str = "STOCKROOM_DB_PATH";
const START_PAGE_ENV: &str = "STOCKROOM_START_PAGE";
const RENAME_POLICY_ENV: &str = "STOCKROOM_RENAME_POLICY";
const LOG_ENV: &str = "STOCKROOM_LOG";

const CONFIG_FILE_NAME: &str = "stockroom.toml";
const DATABASE_FILE_NAME: &str = "stockroom.db";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`AppConfig`].
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside its accepted set.
    #[error("Invalid config value: {0}")]
    Invalid(String),

    /// No platform data directory could be determined.
    #[error("Could not determine app data directory")]
    NoDataDir,

    /// The data directory could not be created.
    #[error("Failed to create data directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file. `None` means `<data dir>/stockroom.db`.
    pub database_path: Option<PathBuf>,

    /// Where logout navigates to.
    pub start_page: String,

    /// What a category rename does to its products.
    pub category_rename: CategoryRenamePolicy,

    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: None,
            start_page: "index.html".to_string(),
            category_rename: CategoryRenamePolicy::Cascade,
            log_filter: "info,stockroom=debug,sqlx=warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration: defaults, then file, then environment.
    ///
    /// A missing file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path).map_err(|source| {
                    ConfigError::Read {
                        path: path.clone(),
                        source,
                    }
                })?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Applies `STOCKROOM_*` environment overrides.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(DB_PATH_ENV) {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }

        if let Some(page) = lookup(START_PAGE_ENV) {
            self.start_page = page;
        }

        if let Some(policy) = lookup(RENAME_POLICY_ENV) {
            self.category_rename = policy
                .parse()
                .map_err(|e: stockroom_core::ValidationError| ConfigError::Invalid(e.to_string()))?;
            debug!(policy = %self.category_rename, "Overriding rename policy from environment");
        }

        if let Some(filter) = lookup(LOG_ENV) {
            self.log_filter = filter;
        }

        Ok(())
    }

    /// Returns the config file location: `$STOCKROOM_CONFIG` or the
    /// platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Resolves the database file, creating the data directory if needed.
    ///
    /// ## Platform-Specific Defaults
    /// - **macOS**: `~/Library/Application Support/com.stockroom.stockroom/stockroom.db`
    /// - **Windows**: `%APPDATA%\stockroom\stockroom\data\stockroom.db`
    /// - **Linux**: `~/.local/share/stockroom/stockroom.db`
    pub fn resolve_database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or(ConfigError::NoDataDir)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join(DATABASE_FILE_NAME))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "stockroom", "stockroom")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.start_page, "index.html");
        assert_eq!(config.category_rename, CategoryRenamePolicy::Cascade);
        assert_eq!(config.database_path, None);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(r#"category_rename = "detach""#).unwrap();

        assert_eq!(config.category_rename, CategoryRenamePolicy::Detach);
        assert_eq!(config.start_page, "index.html");
    }

    #[test]
    fn test_unknown_policy_in_file_is_parse_error() {
        let result: Result<AppConfig, _> = toml::from_str(r#"category_rename = "merge""#);

        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut config: AppConfig = toml::from_str(r#"start_page = "login.html""#).unwrap();

        config
            .apply_overrides(lookup(&[
                (START_PAGE_ENV, "home.html"),
                (DB_PATH_ENV, "/tmp/inv.db"),
                (RENAME_POLICY_ENV, "Detach"),
            ]))
            .unwrap();

        assert_eq!(config.start_page, "home.html");
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/inv.db")));
        assert_eq!(config.category_rename, CategoryRenamePolicy::Detach);
    }

    #[test]
    fn test_invalid_policy_override_is_rejected() {
        let mut config = AppConfig::default();

        let err = config
            .apply_overrides(lookup(&[(RENAME_POLICY_ENV, "sideways")]))
            .unwrap_err();

        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let path = std::env::temp_dir().join("stockroom-does-not-exist.toml");

        let config = AppConfig::load(Some(path)).unwrap();

        assert_eq!(config.start_page, AppConfig::default().start_page);
    }

    #[test]
    fn test_explicit_database_path_is_used_verbatim() {
        let config = AppConfig {
            database_path: Some(PathBuf::from("/tmp/explicit.db")),
            ..AppConfig::default()
        };

        assert_eq!(
            config.resolve_database_path().unwrap(),
            PathBuf::from("/tmp/explicit.db")
        );
    }
}
