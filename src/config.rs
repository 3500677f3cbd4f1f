//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\hook-normalizer\config.toml
//! - macOS: ~/Library/Application Support/hook-normalizer/config.toml
//! - Linux: ~/.config/hook-normalizer/config.toml
//!
//! Settings are loaded once at startup. The enrichment toggle in particular
//! is copied into the resolver when it is built and never re-read.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External catalog (TMDB) client settings
    pub catalog: CatalogConfig,

    /// Feature toggles
    pub features: FeatureConfig,
}

/// External catalog client settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// TMDB v3 API key
    pub api_key: Option<String>,

    /// API root, without trailing slash
    pub base_url: String,

    /// Response language sent with every request
    pub language: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.themoviedb.org/3".to_string(),
            language: "zh-CN".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Feature toggles
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Verify and resolve TMDB ids through the catalog
    pub tmdb_enabled: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self { tmdb_enabled: true }
    }
}

impl Config {
    /// Enrichment runs only when switched on and a key is available.
    pub fn enrichment_enabled(&self) -> bool {
        self.features.tmdb_enabled
            && self
                .catalog
                .api_key
                .as_deref()
                .is_some_and(|key| !key.trim().is_empty())
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hook-normalizer"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match load_from(&path) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", path);
            config
        }
        Err(e) => {
            tracing::error!("{}", e);
            tracing::warn!("Using default configuration");
            Config::default()
        }
    }
}

/// Load configuration from an explicit path, failing on any error
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[catalog]
api_key = "my-key"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.catalog.api_key.as_deref(), Some("my-key"));
        assert_eq!(config.catalog.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.catalog.timeout_secs, 10);
        assert!(config.features.tmdb_enabled);
    }

    #[test]
    fn test_enrichment_needs_key_and_toggle() {
        let mut config = Config::default();
        assert!(!config.enrichment_enabled());

        config.catalog.api_key = Some("key".to_string());
        assert!(config.enrichment_enabled());

        config.features.tmdb_enabled = false;
        assert!(!config.enrichment_enabled());

        config.features.tmdb_enabled = true;
        config.catalog.api_key = Some("   ".to_string());
        assert!(!config.enrichment_enabled());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[catalog]\napi_key = \"test-key-123\"\nlanguage = \"en-US\"\n\n[features]\ntmdb_enabled = false\n",
        )
        .unwrap();

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.catalog.api_key.as_deref(), Some("test-key-123"));
        assert_eq!(loaded.catalog.language, "en-US");
        assert!(!loaded.features.tmdb_enabled);
    }

    #[test]
    fn test_load_from_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(matches!(load_from(&path), Err(ConfigError::Read(_, _))));
    }

    #[test]
    fn test_load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[catalog\napi_key = ").unwrap();

        assert!(matches!(load_from(&path), Err(ConfigError::Parse(_, _))));
    }
}
